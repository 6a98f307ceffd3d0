//! # Domain Layer
//!
//! Core definitions, types, and traits that define the command contract of the application.
//! Independent of specific backends, serving as the contract for other layers.

pub mod allow_list;
pub mod config;
pub mod errors;
pub mod paths;
pub mod schema;
pub mod traits;
pub mod types;
