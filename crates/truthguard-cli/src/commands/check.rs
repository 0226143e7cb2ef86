//! Content verification command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use truthguard_core::storage::{StorageConfig, SupabaseStorage, DEFAULT_BUCKET};
use truthguard_core::submission::client::DEFAULT_ENDPOINT_URL;
use truthguard_core::submission::{EndpointClient, ImageFile, SubmissionState, Submitter};
use truthguard_core::{TruthguardError, TruthguardResult};

use crate::output;

#[derive(Args)]
pub struct CheckArgs {
    /// Text to verify
    #[arg(short, long)]
    pub text: Option<String>,

    /// Image file to verify (JPG, PNG, WEBP, ... up to 10MB)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Declared media type of the image (guessed from the extension by default)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Prompt for submissions until an empty entry
    #[arg(long, conflicts_with_all = ["text", "image", "json"])]
    pub interactive: bool,

    /// Analysis endpoint URL
    #[arg(long, env = "TRUTHGUARD_ENDPOINT", default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint: String,

    /// Key sent to the analysis endpoint
    #[arg(long, env = "TRUTHGUARD_ENDPOINT_KEY", hide_env_values = true)]
    pub endpoint_key: Option<String>,

    /// Object storage base URL; images are inlined when unset
    #[arg(long, env = "TRUTHGUARD_STORAGE_URL")]
    pub storage_url: Option<String>,

    /// Object storage key (defaults to the endpoint key)
    #[arg(long, env = "TRUTHGUARD_STORAGE_KEY", hide_env_values = true)]
    pub storage_key: Option<String>,

    /// Object storage bucket
    #[arg(long, env = "TRUTHGUARD_BUCKET", default_value = DEFAULT_BUCKET)]
    pub bucket: String,
}

pub async fn execute(args: CheckArgs) -> Result<()> {
    let submitter = build_submitter(&args)?;

    if args.interactive {
        return interactive(&submitter, args.content_type.as_deref()).await;
    }

    let mut state = SubmissionState::new();
    if let Some(text) = &args.text {
        state.set_text(text.clone());
    }
    if let Some(path) = &args.image {
        let image = ImageFile::from_path(path, args.content_type.as_deref())
            .await
            .with_context(|| format!("{} rejected", path.display()))?;
        state.select_image(image);
    }

    submit(&submitter, &mut state).await?;

    if let Some(error) = state.last_error() {
        anyhow::bail!("Analysis failed: {}", error);
    }
    let result = state
        .last_result()
        .context("Analysis finished without a result")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        output::print_result(result);
    }
    Ok(())
}

fn build_submitter(args: &CheckArgs) -> Result<Submitter> {
    let mut endpoint = EndpointClient::new(&args.endpoint);
    if let Some(key) = &args.endpoint_key {
        endpoint = endpoint.with_api_key(key.clone());
    }
    let mut submitter = Submitter::new(Arc::new(endpoint));

    if let Some(url) = &args.storage_url {
        let key = args
            .storage_key
            .as_ref()
            .or(args.endpoint_key.as_ref())
            .context("--storage-url requires --storage-key or --endpoint-key")?;
        let config = StorageConfig::new(url, key).with_bucket(&args.bucket);
        submitter = submitter.with_store(Arc::new(SupabaseStorage::new(config)));
    }

    Ok(submitter)
}

/// Run one submission with a spinner while it is in flight.
async fn submit(submitter: &Submitter, state: &mut SubmissionState) -> TruthguardResult<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing content...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = submitter.run(state).await;
    spinner.finish_and_clear();
    outcome
}

async fn interactive(submitter: &Submitter, content_type: Option<&str>) -> Result<()> {
    let mut state = SubmissionState::new();
    println!(
        "{} (leave both entries empty to quit)",
        "TruthGuard interactive check".cyan().bold()
    );

    loop {
        let text: String = Input::new()
            .with_prompt("Text")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read text")?;
        let image_path: String = Input::new()
            .with_prompt("Image path")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read image path")?;

        if text.trim().is_empty() && image_path.trim().is_empty() {
            break;
        }

        state.set_text(text);
        if image_path.trim().is_empty() {
            state.clear_image();
        } else {
            match ImageFile::from_path(Path::new(image_path.trim()), content_type).await {
                Ok(image) => state.select_image(image),
                Err(e) => {
                    output::print_notification(rejection_title(&e), &e.to_string());
                    continue;
                }
            }
        }

        let rejected = submit(submitter, &mut state).await.is_err();

        match (rejected, state.last_result(), state.last_error()) {
            (true, _, Some(error)) => output::print_notification("Input Required", error),
            (false, Some(result), _) => output::print_result(result),
            (false, None, Some(error)) => output::print_notification("Analysis Failed", error),
            _ => {}
        }
        state.dismiss_error();
    }

    Ok(())
}

fn rejection_title(err: &TruthguardError) -> &'static str {
    match err {
        TruthguardError::InvalidFileType(_) => "Invalid File Type",
        TruthguardError::FileTooLarge { .. } => "File Too Large",
        _ => "Image Rejected",
    }
}
