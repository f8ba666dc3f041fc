//! CSV snapshot persistence for scraped listings.

pub mod csv_store;

pub use csv_store::CsvStore;
