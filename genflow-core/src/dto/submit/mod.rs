//! Submission DTOs
//!
//! Request bodies for the three generation endpoints and the common
//! submission response. Defaults mirror what the service assumes when a
//! field is omitted, so constructors only require the caller's intent.

use serde::{Deserialize, Serialize};

/// Response returned by every submission endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Opaque job id to poll with
    pub id: String,
    /// Initial status string as reported by the service (usually "queued")
    pub status: String,
}

/// Request body for `POST /t2i` (text to image)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
}

impl TextToImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: "4:3".to_string(),
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }
}

/// Request body for `POST /t2v` (text to video)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToVideoRequest {
    pub prompt: String,
    pub duration: u32,
    pub resolution: String,
    pub aspect_ratio: String,
    pub camera_fixed: bool,
}

impl TextToVideoRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: 5,
            resolution: "720".to_string(),
            aspect_ratio: "16:9".to_string(),
            camera_fixed: false,
        }
    }
}

/// Request body for `POST /i2v/url` (image to video, source by URL)
///
/// The multipart variant (`POST /i2v`, file upload) shares the `prompt`,
/// `duration` and `enhance_prompt` fields but is assembled as form parts by
/// the client rather than serialized from this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageToVideoRequest {
    pub image_url: String,
    pub prompt: String,
    pub duration: u32,
    pub enhance_prompt: bool,
}

impl ImageToVideoRequest {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            prompt: String::new(),
            duration: 5,
            enhance_prompt: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t2v_defaults() {
        let req = TextToVideoRequest::new("monkey dancing");
        assert_eq!(req.duration, 5);
        assert_eq!(req.resolution, "720");
        assert_eq!(req.aspect_ratio, "16:9");
        assert!(!req.camera_fixed);
    }

    #[test]
    fn test_i2v_defaults() {
        let req = ImageToVideoRequest::new("https://example.com/cat.png");
        assert_eq!(req.prompt, "");
        assert_eq!(req.duration, 5);
        assert!(req.enhance_prompt);
    }

    #[test]
    fn test_t2i_serializes_expected_fields() {
        let req = TextToImageRequest::new("a lighthouse").with_aspect_ratio("16:9");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["prompt"], "a lighthouse");
        assert_eq!(value["aspect_ratio"], "16:9");
    }
}
