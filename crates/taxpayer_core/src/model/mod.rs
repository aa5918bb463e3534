//! Domain model for taxpayer records.
//!
//! # Responsibility
//! - Define canonical data structures used by store and client logic.
//!
//! # Invariants
//! - Every record is identified by a unique, immutable `Tid`.
//! - Records are never deleted.

pub mod taxpayer;
