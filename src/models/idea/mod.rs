// Idea model
// The draggable source item on the scheduling board

use serde::{Deserialize, Serialize};

/// A content idea that can be dragged onto the calendar and turned into a
/// scheduled post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    #[serde(default)]
    pub id: i64,
    pub document_id: String,
    pub title: String,
}

impl Idea {
    pub fn new(document_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            document_id: document_id.into(),
            title: title.into(),
        }
    }
}
