//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parsing, command execution and snapshot persistence.
//! - Keep the console layer decoupled from storage details.

pub mod contact_service;
