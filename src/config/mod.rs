//! Configuration for the drawables command line tool
//!
//! Provides types and parsing for `drawables.toml` and the logic to find,
//! load, and merge it with command line overrides.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
