//! Flutter-facing bindings for the taxpayer records core.

pub mod api;
