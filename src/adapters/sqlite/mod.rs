//! SQLite Adapter
//!
//! Local persistence for tokens that pass every risk gate.

mod store;

pub use store::SqliteTokenStore;
