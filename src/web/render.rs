//! HTML rendering for the browse page.

use crate::vfs::path::{encode_key, path_for_prefix};
use crate::vfs::{Crumb, VisibleEntry, display_name, format_size};

/// Everything needed to draw one browse page
#[derive(Debug)]
pub struct PageView<'a> {
    pub bucket: &'a str,
    pub prefix: &'a str,
    /// `None` at root
    pub parent: Option<String>,
    pub crumbs: Vec<Crumb>,
    /// Visible children, or the message shown in their place
    pub listing: Result<Vec<VisibleEntry>, String>,
}

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;min-width:40em}\
th,td{text-align:left;padding:.25em 1em}\
td.size{text-align:right}\
.error{color:#b00}";

pub fn page(view: &PageView<'_>) -> String {
    let mut html = String::new();
    let title = format!("{}/{}", view.bucket, view.prefix);

    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape_html(&title)
    ));
    html.push_str("<h1>S3 Browser</h1>");

    html.push_str(&breadcrumb_bar(view.bucket, &view.crumbs));

    html.push_str(
        "<form method=\"get\" action=\"/go\">\
         <input type=\"text\" name=\"prefix\" placeholder=\"Enter folder path\">\
         <button type=\"submit\">Go</button></form>",
    );

    if let Some(parent) = &view.parent {
        html.push_str(&format!(
            "<p><a href=\"{}\">&larr; Up</a></p>",
            escape_html(&path_for_prefix(parent))
        ));
    }

    match &view.listing {
        Ok(entries) => html.push_str(&listing_table(view.bucket, view.prefix, entries)),
        Err(message) => {
            html.push_str(&format!("<p class=\"error\">{}</p>", escape_html(message)));
        }
    }

    html.push_str(&format!(
        "<h2>Upload</h2>\
         <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\
         <input type=\"hidden\" name=\"prefix\" value=\"{}\">\
         <input type=\"file\" name=\"file\">\
         <button type=\"submit\">Upload</button></form>",
        escape_html(view.prefix)
    ));

    html.push_str("</body></html>");
    html
}

fn breadcrumb_bar(bucket: &str, crumbs: &[Crumb]) -> String {
    let mut bar = String::from("<nav>");
    bar.push_str(&format!(
        "<a href=\"{}\">{}</a>",
        path_for_prefix(""),
        escape_html(bucket)
    ));
    for crumb in crumbs {
        bar.push_str(&format!(
            " / <a href=\"{}\">{}</a>",
            escape_html(&path_for_prefix(&crumb.prefix)),
            escape_html(&crumb.label)
        ));
    }
    bar.push_str("</nav>");
    bar
}

fn listing_table(bucket: &str, prefix: &str, entries: &[VisibleEntry]) -> String {
    if entries.is_empty() {
        return "<p>This folder is empty.</p>".to_string();
    }

    let mut table =
        String::from("<table><tr><th>Name</th><th>Size</th><th>Last modified</th></tr>");
    for entry in entries {
        let name = escape_html(display_name(&entry.key, prefix));
        let modified = escape_html(entry.last_modified.as_deref().unwrap_or("-"));
        if entry.is_folder {
            table.push_str(&format!(
                "<tr><td><a href=\"{}\">{name}</a></td><td class=\"size\">-</td><td>{modified}</td></tr>",
                escape_html(&path_for_prefix(&entry.key)),
            ));
        } else {
            table.push_str(&format!(
                "<tr><td><a href=\"{}\">{name}</a></td><td class=\"size\">{}</td><td>{modified}</td></tr>",
                escape_html(&download_href(bucket, &entry.key)),
                format_size(entry.size),
            ));
        }
    }
    table.push_str("</table>");
    table
}

/// Link to the download endpoint for an object
pub fn download_href(bucket: &str, key: &str) -> String {
    format!("/download/{}/{}", urlencoding::encode(bucket), encode_key(key))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
