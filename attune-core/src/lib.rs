//! Attune core library — fixed layout, category definitions, errors.
//!
//! Public API surface:
//! - [`layout`] — [`Layout`] and the [`SyncTarget`] / [`ConfigFile`] categories
//! - [`error`] — [`LayoutError`]

pub mod error;
pub mod layout;

pub use error::LayoutError;
pub use layout::{ConfigFile, Layout, SyncTarget};
