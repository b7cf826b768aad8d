//! Generation command handlers
//!
//! Submits t2i/t2v/i2v jobs and, with `--watch`, tracks them through to a
//! resolved artifact URL.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use genflow_client::GenerationClient;
use genflow_core::domain::job::{ArtifactKind, JobHandle};
use genflow_core::dto::submit::{
    ImageToVideoRequest, SubmitResponse, TextToImageRequest, TextToVideoRequest,
};

use crate::config::Config;
use crate::watch::watch_job;

/// Arguments for `genflow t2i`
#[derive(Args)]
pub struct T2iArgs {
    /// Generation prompt
    #[arg(long)]
    pub prompt: String,

    /// Output aspect ratio
    #[arg(long, default_value = "4:3")]
    pub aspect_ratio: String,

    /// Poll the job to completion and print the artifact URL
    #[arg(long)]
    pub watch: bool,
}

/// Arguments for `genflow t2v`
#[derive(Args)]
pub struct T2vArgs {
    /// Generation prompt
    #[arg(long)]
    pub prompt: String,

    /// Clip duration in seconds
    #[arg(long, default_value_t = 5)]
    pub duration: u32,

    /// Output resolution
    #[arg(long, default_value = "720")]
    pub resolution: String,

    /// Output aspect ratio
    #[arg(long, default_value = "16:9")]
    pub aspect_ratio: String,

    /// Keep the camera fixed
    #[arg(long)]
    pub camera_fixed: bool,

    /// Poll the job to completion and print the artifact URL
    #[arg(long)]
    pub watch: bool,
}

/// Arguments for `genflow i2v`
#[derive(Args)]
pub struct I2vArgs {
    /// Source image URL
    #[arg(long, conflicts_with = "file")]
    pub image_url: Option<String>,

    /// Source image file to upload
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Generation prompt
    #[arg(long, default_value = "")]
    pub prompt: String,

    /// Clip duration in seconds
    #[arg(long, default_value_t = 5)]
    pub duration: u32,

    /// Disable server-side prompt enhancement
    #[arg(long)]
    pub no_enhance_prompt: bool,

    /// Poll the job to completion and print the artifact URL
    #[arg(long)]
    pub watch: bool,
}

/// Handle `genflow t2i`
pub async fn handle_t2i(args: T2iArgs, config: &Config) -> Result<()> {
    let client = GenerationClient::new(&config.api_url, &config.api_token);

    let req = TextToImageRequest::new(args.prompt).with_aspect_ratio(args.aspect_ratio);
    let submitted = client.text_to_image(req).await?;

    print_submitted(&submitted);
    finish(client, submitted, ArtifactKind::Image, args.watch).await
}

/// Handle `genflow t2v`
pub async fn handle_t2v(args: T2vArgs, config: &Config) -> Result<()> {
    let client = GenerationClient::new(&config.api_url, &config.api_token);

    let mut req = TextToVideoRequest::new(args.prompt);
    req.duration = args.duration;
    req.resolution = args.resolution;
    req.aspect_ratio = args.aspect_ratio;
    req.camera_fixed = args.camera_fixed;

    let submitted = client.text_to_video(req).await?;

    print_submitted(&submitted);
    finish(client, submitted, ArtifactKind::Video, args.watch).await
}

/// Handle `genflow i2v`
pub async fn handle_i2v(args: I2vArgs, config: &Config) -> Result<()> {
    let client = GenerationClient::new(&config.api_url, &config.api_token);
    let enhance_prompt = !args.no_enhance_prompt;

    let submitted = match (args.image_url, args.file) {
        (Some(image_url), None) => {
            let mut req = ImageToVideoRequest::new(image_url);
            req.prompt = args.prompt;
            req.duration = args.duration;
            req.enhance_prompt = enhance_prompt;
            client.image_to_video_url(req).await?
        }
        (None, Some(path)) => {
            client
                .image_to_video_file(&path, &args.prompt, args.duration, enhance_prompt)
                .await?
        }
        _ => return Err(anyhow!("exactly one of --image-url or --file is required")),
    };

    print_submitted(&submitted);
    finish(client, submitted, ArtifactKind::Video, args.watch).await
}

fn print_submitted(submitted: &SubmitResponse) {
    println!(
        "{} {} ({})",
        "Submitted job".bold(),
        submitted.id.cyan(),
        submitted.status
    );
}

async fn finish(
    client: GenerationClient,
    submitted: SubmitResponse,
    kind: ArtifactKind,
    watch: bool,
) -> Result<()> {
    if watch {
        watch_job(client, JobHandle::new(submitted.id, kind)).await
    } else {
        println!(
            "Track it with: {}",
            format!("genflow job watch {} --kind {}", submitted.id, kind).dimmed()
        );
        Ok(())
    }
}
