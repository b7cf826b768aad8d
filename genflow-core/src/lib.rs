//! Genflow Core
//!
//! Core types and pure logic for the Genflow generation-job client.
//!
//! This crate contains:
//! - Domain types: Job handles, lifecycle states, resolved artifacts
//! - Status classification: raw status payload -> normalized lifecycle state
//! - Result resolution: raw result payload -> canonical artifact URL
//! - DTOs: request/response bodies for the generation service API
//!
//! Everything here is pure: no I/O, no timers, no state. The HTTP client
//! lives in `genflow-client`, the polling machinery in `genflow-tracker`.

pub mod domain;
pub mod dto;
