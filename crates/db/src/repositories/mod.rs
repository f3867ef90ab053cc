//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn Storage` as the first argument.

pub mod item_repo;

pub use item_repo::ItemRepo;
