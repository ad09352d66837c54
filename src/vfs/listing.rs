use super::{ObjectEntry, VisibleEntry};

/// Caller policy applied on top of the one-level visibility rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingPolicy {
    /// Drop 0-byte objects that are not folder markers (directory placeholders
    /// written by some tools without a trailing slash)
    pub skip_empty_objects: bool,
}

impl ListingPolicy {
    fn admits(&self, entry: &ObjectEntry) -> bool {
        !(self.skip_empty_objects && entry.size == 0 && !entry.is_folder_marker())
    }
}

/// Restrict a flat listing to the direct children of `prefix`.
///
/// An entry is visible when its key starts with `prefix` and the remainder has
/// no further `/`. A trailing `/` on the key itself marks a folder. The
/// prefix's own marker object (empty remainder) is the current level and is
/// never returned. Listing order is preserved.
pub fn visible_children(
    entries: &[ObjectEntry],
    prefix: &str,
    policy: ListingPolicy,
) -> Vec<VisibleEntry> {
    entries
        .iter()
        .filter(|entry| is_direct_child(&entry.key, prefix))
        .filter(|entry| policy.admits(entry))
        .map(VisibleEntry::from)
        .collect()
}

fn is_direct_child(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(remainder) => {
            let name = remainder.strip_suffix('/').unwrap_or(remainder);
            !name.is_empty() && !name.contains('/')
        }
        None => false,
    }
}
