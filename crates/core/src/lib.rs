//! Domain types shared by the item service, its storage layer and the client.
//!
//! This crate has no I/O: it holds the `Item` model, the closed `ItemStatus`
//! enumeration, request validation and the [`error::CoreError`] taxonomy.

pub mod error;
pub mod item;
pub mod types;
