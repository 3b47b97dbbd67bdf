//! Single-user note management library
//!
//! This library provides a note store that persists after every change, a
//! pure view projector that filters, sorts and aggregates notes, and a
//! command-line front end built on both.

mod cli;
mod config;
mod errors;
mod filter;
mod helper;
mod note;
mod projector;
mod session;
mod storage;
mod store;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use filter::*;
pub use helper::*;
pub use note::*;
pub use projector::*;
pub use session::*;
pub use storage::*;
pub use store::*;
pub use types::*;
