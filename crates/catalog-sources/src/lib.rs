pub mod traits;
pub mod error;
pub mod images;
pub mod tmdb;
pub mod mock;

#[cfg(test)]
mod test_server;

pub use traits::{CatalogQuery, CatalogSource};
pub use error::{CatalogError, CatalogResult};
pub use images::ImageUrls;
pub use tmdb::TmdbClient;
pub use mock::{MockCatalogClient, LocalMovie, MovieFilter, MoviePage, SortOrder};
