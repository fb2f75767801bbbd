use clap::Parser;
use std::path::PathBuf;
use watermark_preview::config::Config;
use watermark_preview::server::build_server;

/// Default configuration file, used when present and no --config is given
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Watermark preview server - renders watermarked sample images into an HTML page
#[derive(Parser, Debug)]
#[command(name = "watermark-preview")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: config.yaml if it exists)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>), String> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    let config = match &path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    Ok((config, path))
}

fn main() {
    // Initialize logging subsystem
    if let Err(e) = watermark_preview::logging::init_subscriber() {
        eprintln!("Failed to initialize logging subsystem: {}", e);
        std::process::exit(1);
    }

    // Parse command-line arguments
    let args = Args::parse();

    let (config, path) = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        config_file = %path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "<defaults>".to_string()),
        server_address = %config.server.address,
        server_port = config.server.port,
        asset_root = %config.assets.root,
        template = %config.gallery.template,
        output_format = %config.gallery.output_format,
        "Configuration loaded successfully"
    );

    if args.test {
        tracing::info!("Configuration test successful");
        return;
    }

    let server = build_server(&config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    tracing::info!(
        address = %config.server.listen_address(),
        "Starting watermark preview server"
    );

    // Run server forever (blocks until shutdown)
    server.run_forever();
}
