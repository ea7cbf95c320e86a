use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - an editorial section a post can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}
