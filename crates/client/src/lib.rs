//! Client side of the item service.
//!
//! [`api::HttpItemsApi`] talks to the REST endpoints; [`store::ItemStore`]
//! holds the fetched collection together with the derived filtered and
//! paginated view and transient UI state; [`render`] turns a page into text.

pub mod api;
pub mod config;
pub mod render;
pub mod store;
pub mod view;
