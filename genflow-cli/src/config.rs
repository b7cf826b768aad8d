//! Configuration module
//!
//! Handles CLI configuration including the service URL and credential.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the generation service
    pub api_url: String,
    /// Bearer token for the service
    pub api_token: String,
}
