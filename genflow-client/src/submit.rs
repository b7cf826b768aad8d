//! Submission endpoints
//!
//! One method per generation endpoint. All of them return the service's
//! `{ id, status }` submission response; the id is then handed to the
//! tracker for polling.

use crate::GenerationClient;
use crate::error::{ClientError, Result};
use genflow_core::dto::submit::{
    ImageToVideoRequest, SubmitResponse, TextToImageRequest, TextToVideoRequest,
};
use std::path::Path;
use tracing::debug;

impl GenerationClient {
    /// Submit a text-to-image job (`POST /t2i`)
    pub async fn text_to_image(&self, req: TextToImageRequest) -> Result<SubmitResponse> {
        debug!(prompt = %req.prompt, "submitting t2i job");
        let response = self.post("/t2i").json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Submit a text-to-video job (`POST /t2v`)
    pub async fn text_to_video(&self, req: TextToVideoRequest) -> Result<SubmitResponse> {
        debug!(prompt = %req.prompt, duration = req.duration, "submitting t2v job");
        let response = self.post("/t2v").json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Submit an image-to-video job sourced from a URL (`POST /i2v/url`)
    pub async fn image_to_video_url(&self, req: ImageToVideoRequest) -> Result<SubmitResponse> {
        debug!(image_url = %req.image_url, "submitting i2v job from url");
        let response = self.post("/i2v/url").json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Submit an image-to-video job from a local file (`POST /i2v`, multipart)
    ///
    /// Reads the file and uploads it as the `file` part, with `prompt`,
    /// `duration` and `enhance_prompt` as plain form fields.
    pub async fn image_to_video_file(
        &self,
        path: &Path,
        prompt: &str,
        duration: u32,
        enhance_prompt: bool,
    ) -> Result<SubmitResponse> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::FileError(format!("{}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        debug!(file = %file_name, size = bytes.len(), "submitting i2v job from file");

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("duration", duration.to_string())
            .text("enhance_prompt", enhance_prompt.to_string());

        if !prompt.is_empty() {
            form = form.text("prompt", prompt.to_string());
        }

        let response = self.post("/i2v").multipart(form).send().await?;

        self.handle_response(response).await
    }
}
