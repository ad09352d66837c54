use serde::Serialize;

/// An object as returned by a listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
        }
    }

    /// Keys ending in `/` are folder markers
    pub fn is_folder_marker(&self) -> bool {
        self.key.ends_with('/')
    }
}

/// A direct child of the current prefix, classified as file or folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEntry {
    pub key: String,
    pub size: u64,
    pub is_folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl From<&ObjectEntry> for VisibleEntry {
    fn from(entry: &ObjectEntry) -> Self {
        Self {
            key: entry.key.clone(),
            size: entry.size,
            is_folder: entry.is_folder_marker(),
            last_modified: entry.last_modified.clone(),
        }
    }
}
