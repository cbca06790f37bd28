//! Race result loading and the in-memory record store

pub mod csv_loader;
pub mod store;

// Re-export commonly used types
pub use csv_loader::{ingest, load_into, load_races, read_rows, RaceRow};
pub use store::{RaceRecord, RecordStore, StoreError};
