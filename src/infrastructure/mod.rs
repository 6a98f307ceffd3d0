//! # Infrastructure Layer
//!
//! Handles interactions with external systems: language-model backends and the host
//! (processes, filesystem). Implements the traits defined in the Domain layer.

pub mod llm;
pub mod tools;
