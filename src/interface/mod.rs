//! # Interface Layer
//!
//! Thin shells around the pipeline: one-shot CLI and the interactive shell.

pub mod cli;
pub mod shell;
