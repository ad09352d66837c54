use crate::error::BrowseError;

/// URL path segment under which the current prefix is encoded
pub const PATH_ROUTE: &str = "/path/";

/// Move into a child. The child's full key becomes the new prefix.
pub fn drill_down(prefix: &str, child_key: &str) -> Result<String, BrowseError> {
    if !child_key.starts_with(prefix) {
        return Err(BrowseError::InvalidNavigation {
            prefix: prefix.to_string(),
            target: child_key.to_string(),
        });
    }
    Ok(child_key.to_string())
}

/// Move one folder level up. Root stays at root.
///
/// Only the last segment is dropped; empty interior segments (`a//b/`) are
/// part of the key and survive.
pub fn drill_up(prefix: &str) -> String {
    let body = prefix.strip_suffix('/').unwrap_or(prefix);
    match body.rfind('/') {
        Some(i) if i > 0 => {
            let parent = &body[..i];
            if prefix.ends_with('/') {
                format!("{parent}/")
            } else {
                parent.to_string()
            }
        }
        _ => String::new(),
    }
}

/// Extract the prefix from a `/path/<prefix>` URL path
pub fn prefix_from_path(url_path: &str) -> String {
    if url_path == PATH_ROUTE.trim_end_matches('/') {
        return String::new();
    }
    let rest = url_path.strip_prefix(PATH_ROUTE).unwrap_or(url_path);
    rest.trim_start_matches('/').to_string()
}

/// Encode a prefix back into a `/path/<prefix>` URL path, one segment at a time
pub fn path_for_prefix(prefix: &str) -> String {
    format!("{PATH_ROUTE}{}", encode_key(prefix))
}

/// Percent-encode a key for use in a URL path, keeping `/` separators
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// One step of the drill path from root to the current prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub prefix: String,
}

/// Drill path from root (exclusive) to `prefix` (inclusive)
pub fn breadcrumbs(prefix: &str) -> Vec<Crumb> {
    let segments = segments(prefix);
    let last = segments.len().saturating_sub(1);
    let mut crumbs = Vec::with_capacity(segments.len());
    let mut acc = String::new();

    for (i, segment) in segments.iter().enumerate() {
        acc.push_str(segment);
        if i < last || prefix.ends_with('/') {
            acc.push('/');
        }
        crumbs.push(Crumb {
            label: segment.to_string(),
            prefix: acc.clone(),
        });
    }

    crumbs
}

/// Text shown for a key listed under `prefix`
pub fn display_name<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

fn segments(prefix: &str) -> Vec<&str> {
    prefix.split('/').filter(|s| !s.is_empty()).collect()
}
