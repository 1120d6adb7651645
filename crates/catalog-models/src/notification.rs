use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::catalog_item::CatalogItem;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl NotificationRecord {
    /// Unread notice that an item has started trending
    pub fn trending(item: &CatalogItem, timestamp: DateTime<Utc>) -> Self {
        let title = if item.title.trim().is_empty() {
            "New title".to_string()
        } else {
            item.title.clone()
        };
        let subject = if item.title.trim().is_empty() {
            "A new title"
        } else {
            item.title.as_str()
        };

        Self {
            id: format!("trending-{}", item.id),
            message: format!("{} is now trending on StreamSavvy.", subject),
            title,
            timestamp,
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaKind;

    #[test]
    fn test_trending_notification_text() {
        let item = CatalogItem::new(42, "Oppenheimer", MediaKind::Movie);
        let n = NotificationRecord::trending(&item, Utc::now());
        assert_eq!(n.id, "trending-42");
        assert_eq!(n.title, "Oppenheimer");
        assert_eq!(n.message, "Oppenheimer is now trending on StreamSavvy.");
        assert!(!n.read);
    }

    #[test]
    fn test_trending_notification_without_title() {
        let item = CatalogItem::new(9, "", MediaKind::Series);
        let n = NotificationRecord::trending(&item, Utc::now());
        assert_eq!(n.title, "New title");
        assert_eq!(n.message, "A new title is now trending on StreamSavvy.");
    }
}
