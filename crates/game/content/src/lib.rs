//! Built-in game content and content loaders.
//!
//! This crate houses the gun, bullet, ammo, and character catalogs the
//! simulation core resolves definitions from:
//! - [`ContentCatalog`] implements the core's catalog oracle over plain
//!   vectors of definitions
//! - [`ContentCatalog::builtin`] is the stock content set
//! - the `loaders` feature adds RON file loading with validation
//!
//! Content is consumed through the oracle trait and never appears in game
//! state; events reference definitions by name so differently-ordered
//! catalogs stay compatible.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ContentCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, LoadResult};
