//! Job handle and artifact types

use serde::{Deserialize, Serialize};

/// Handle to a submitted generation job
///
/// The id is an opaque string minted by the service at submission time.
/// The kind records what the caller asked for (image vs video job); result
/// payloads do not carry it, so it travels with the handle instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub id: String,
    pub kind: ArtifactKind,
}

impl JobHandle {
    /// Creates a handle from a service-issued job id and the caller's intent
    pub fn new(id: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Media kind of a generation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Image,
    Video,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Image => write!(f, "image"),
            ArtifactKind::Video => write!(f, "video"),
        }
    }
}

/// Canonical result of a completed generation job
///
/// Produced once per job by the result resolver; immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    pub url: String,
    pub kind: ArtifactKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ArtifactKind::Image).unwrap(),
            "\"image\""
        );
        assert_eq!(
            serde_json::to_string(&ArtifactKind::Video).unwrap(),
            "\"video\""
        );
    }

    #[test]
    fn test_handle_creation() {
        let handle = JobHandle::new("j1", ArtifactKind::Video);
        assert_eq!(handle.id, "j1");
        assert_eq!(handle.kind, ArtifactKind::Video);
    }
}
