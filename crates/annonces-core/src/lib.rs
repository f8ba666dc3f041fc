pub mod error;
pub mod extract;
pub mod models;
pub mod report;
pub mod scrape;
pub mod site;
pub mod testutil;
pub mod traits;

pub use error::AppError;
pub use models::{Listing, NOT_AVAILABLE};
pub use site::Category;
pub use traits::{Fetcher, SnapshotStore};
