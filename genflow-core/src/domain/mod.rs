//! Core domain types
//!
//! This module contains the domain structures shared across Genflow crates.
//! The tracker consumes lifecycle states, the CLI renders artifacts, and the
//! client stays entirely schema-free (payloads are `serde_json::Value`).

pub mod job;
pub mod result;
pub mod status;
