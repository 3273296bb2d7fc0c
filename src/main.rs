use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use kcentroid::api;
use kcentroid::cli::{downscale_files, OutputTarget};
use kcentroid::models::{registry, AppConfig};
use kcentroid::server;
use kcentroid::services::DownscaleService;

#[derive(Parser)]
#[command(name = "kcentroid")]
#[command(about = "K-centroid downscaling: pixel-art friendly image reduction")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Downscale PNG files (all inputs form one batch)
    Downscale {
        /// Input PNG files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Target width in pixels
        #[arg(short = 'W', long, allow_negative_numbers = true)]
        width: Option<i64>,

        /// Target height in pixels
        #[arg(short = 'H', long, allow_negative_numbers = true)]
        height: Option<i64>,

        /// Palette size per tile
        #[arg(short, long, allow_negative_numbers = true)]
        centroids: Option<i64>,

        /// k-means seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Output PNG file (single input only)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Directory for `<stem>_kcentroid.png` outputs
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print node descriptors as JSON
    Nodes,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "kcentroid API",
        description = "K-centroid downscaling: each output pixel is the dominant color of its source tile",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_downscale,
        api::handle_downscale_batch,
        api::handle_nodes,
    ),
    components(schemas(
        api::BatchRequest,
        api::BatchResponse,
        api::ImagePayload,
        kcentroid::models::NodeDescriptor,
        kcentroid::models::NodeInput,
        kcentroid::models::IntRange,
        kcentroid::models::ValueType,
    )),
    tags(
        (name = "Downscale", description = "K-centroid image downscaling"),
        (name = "Nodes", description = "Node descriptors for host integration")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Downscale {
            inputs,
            width,
            height,
            centroids,
            seed,
            output,
            out_dir,
        }) => run_downscale_command(inputs, width, height, centroids, seed, output, out_dir),
        Some(Commands::Nodes) => run_nodes_command(),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kcentroid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Downscale PNG files directly (no server needed)
#[allow(clippy::too_many_arguments)]
fn run_downscale_command(
    inputs: Vec<PathBuf>,
    width: Option<i64>,
    height: Option<i64>,
    centroids: Option<i64>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    init_cli_logging();

    let mut config = AppConfig::from_env();
    if let Some(seed) = seed {
        config.kmeans.seed = seed;
    }

    let service = DownscaleService::new(std::sync::Arc::new(config));
    let params = service.params(width, height, centroids)?;
    let target = OutputTarget::from_args(output, out_dir);

    let written = downscale_files(&service, &inputs, params, &target)?;
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}

/// Print node descriptors as JSON
fn run_nodes_command() -> anyhow::Result<()> {
    init_cli_logging();

    let config = AppConfig::from_env();
    println!("{}", serde_json::to_string_pretty(&registry(&config))?);
    Ok(())
}

/// Print version, environment and effective configuration
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("kcentroid v{VERSION}");
    println!("K-centroid downscaling for pixel art\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Effective configuration section
    let config_source = match config_file.as_deref() {
        Some(path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_file.as_deref().map(std::path::Path::new));

    println!("\nConfiguration ({config_source}):");
    println!("  max_resolution    = {}", config.max_resolution);
    println!(
        "  default size      = {}x{}",
        config.default_width, config.default_height
    );
    println!("  default_centroids = {}", config.default_centroids);
    println!("  parallel          = {}", config.parallel);
    println!("  max_upload_bytes  = {}", config.max_upload_bytes);
    println!(
        "  kmeans            = max_iter {}, converge {}, runs {}, seed {}",
        config.kmeans.max_iter, config.kmeans.converge, config.kmeans.runs, config.kmeans.seed
    );

    // Commands section
    println!("\nCommands:");
    println!("  kcentroid serve       Start the HTTP server");
    println!("  kcentroid downscale   Downscale PNG files");
    println!("  kcentroid nodes       Print node descriptors");
    println!("\nRun 'kcentroid --help' for more details.");
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kcentroid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    tracing::info!(
        max_resolution = config.max_resolution,
        parallel = config.parallel,
        seed = config.kmeans.seed,
        "Configuration loaded"
    );

    let state = server::create_app_state(config);

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "kcentroid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
