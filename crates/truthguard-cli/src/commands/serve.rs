//! Analysis endpoint command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use truthguard_core::gateway::{
    GatewayClient, GatewayConfig, API_KEY_ENV, DEFAULT_GATEWAY_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use truthguard_core::Analyzer;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// API key for the completion gateway
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible completion gateway
    #[arg(long, env = "AI_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub gateway_url: String,

    /// Model identifier sent to the gateway
    #[arg(long, env = "AI_GATEWAY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./truthguard-serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = GatewayConfig::default()
        .with_base_url(&args.gateway_url)
        .with_model(&args.model)
        .with_temperature(args.temperature);
    if let Some(key) = args.api_key {
        config = config.with_api_key(key);
    }

    if config.api_key().is_none() {
        tracing::warn!("{} is not set; analysis requests will fail", API_KEY_ENV);
    }

    let analyzer = Analyzer::new(Arc::new(GatewayClient::new(config)));

    println!();
    println!("  {} {}", "TruthGuard".cyan().bold(), "Analysis Endpoint".bold());
    println!();
    println!(
        "  {}  http://{}:{}{}",
        "Endpoint".green(),
        args.host,
        args.port,
        truthguard_web::ANALYZE_PATH
    );
    println!("  {}     {}", "Model".green(), args.model);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    truthguard_web::run_server(analyzer, &args.host, args.port).await?;

    Ok(())
}
