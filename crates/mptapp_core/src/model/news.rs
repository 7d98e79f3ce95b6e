//! Promotional news banner.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    /// Bundled or remote image asset name.
    pub image_name: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewsItem {
    pub fn new(
        image_name: impl Into<String>,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_name: image_name.into(),
            title: title.map(str::to_string),
            description: description.map(str::to_string),
        }
    }
}
