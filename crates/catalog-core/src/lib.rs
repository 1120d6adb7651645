pub mod store;
pub mod records;
pub mod session;
pub mod watchlist;
pub mod notifications;
pub mod compose;
pub mod search;

#[cfg(test)]
mod test_support;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use session::{AccountOverview, SessionManager};
pub use watchlist::Watchlist;
pub use notifications::{detect_trending, NotificationCenter, TrendingTracker};
pub use compose::{dedup_by_id, CardArt, GenreFilter, Hero, HomeComposer, HomeOptions, HomePage, Section, SectionKey};
pub use search::{SearchController, SearchOutcome};
