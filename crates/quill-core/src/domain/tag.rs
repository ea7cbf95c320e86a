use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a free-form label attached to posts. Tags are created on
/// the fly the first time an author uses a name (first-or-create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    /// Create a new tag. The slug must already be unique for the tags table.
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
        }
    }
}
