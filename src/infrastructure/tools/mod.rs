//! # Tools Module
//!
//! In-process execution of the host effects a command needs (child processes, filesystem).

pub mod executor;
