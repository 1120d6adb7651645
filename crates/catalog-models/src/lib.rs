pub mod catalog_item;
pub mod details;
pub mod notification;
pub mod session;

pub use catalog_item::{CatalogItem, MediaKind, UNTITLED};
pub use details::{CastMember, CatalogPage, Genre, ItemDetails, Video};
pub use notification::NotificationRecord;
pub use session::{AccountRecord, SessionPhase, SessionState, UserProfile};
