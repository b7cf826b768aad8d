//! Data transfer objects for the generation service API

pub mod submit;
