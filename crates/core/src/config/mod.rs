//! Configuration loading and schema definitions
//!
//! Search defaults and lexicon extensions shared by every caller of the engine.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
