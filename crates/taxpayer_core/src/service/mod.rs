//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the store's four operations.
//! - Keep client/FFI layers decoupled from storage details.

pub mod taxpayer_service;
