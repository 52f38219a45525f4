use clap::{Parser, Subcommand};
use nonogram_core::{DifficultyLevel, NonogramGrid, Rgb};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use nonogrammer::api;
use nonogrammer::codec;
use nonogrammer::models::{parse_highlight, AppConfig, HighlightColor};
use nonogrammer::server;
use nonogrammer::services::{GenerateParams, NonogramService};

#[derive(Parser)]
#[command(name = "nonogrammer")]
#[command(about = "Nonogrammer - turns photographs into nonogram puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Generate a puzzle from an image file and print it
    Generate {
        /// Input photo (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// easy (20x20), medium (30x30) or hard (40x40)
        #[arg(short, long, default_value = "easy")]
        difficulty: DifficultyLevel,

        /// Background dim factor (defaults to the configured value)
        #[arg(long, allow_negative_numbers = true)]
        dim: Option<f32>,

        /// Preview marker color: red, blue, pink, black or #RRGGBB
        #[arg(short, long, default_value = "red", value_parser = parse_highlight)]
        color: Rgb,

        /// Shift added to the computed threshold
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        contrast: i32,

        /// Precomputed subject mask (overrides the configured model)
        #[arg(long)]
        mask: Option<PathBuf>,

        /// Write the preview PNG here
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Write the grid-sized reference PNG here
        #[arg(long)]
        reference: Option<PathBuf>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nonogrammer API",
        description = "Turns photographs into black/white nonogram puzzles",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_generate_nonogram),
    components(schemas(
        api::GenerateNonogramRequest,
        api::GenerateNonogramResponse,
        HighlightColor,
    )),
    tags(
        (name = "Nonogram", description = "Puzzle generation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            input,
            difficulty,
            dim,
            color,
            contrast,
            mask,
            preview,
            reference,
        }) => run_generate_command(
            &input,
            GenerateParams {
                difficulty,
                dim_factor: dim,
                highlight: color,
                contrast,
            },
            mask,
            preview.as_deref(),
            reference.as_deref(),
        ),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Generate a puzzle from a file (no server needed)
fn run_generate_command(
    input: &Path,
    params: GenerateParams,
    mask: Option<PathBuf>,
    preview: Option<&Path>,
    reference: Option<&Path>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nonogrammer=warn,nonogram_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load_from_env();
    if mask.is_some() {
        config.model.mask_file = mask;
    }
    let service = NonogramService::from_config(Arc::new(config));

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let image = codec::decode_image_bytes(&bytes)?;
    let generated = service.generate(image, &params)?;

    print!("{}", format_puzzle(&generated.grid));
    println!(
        "\n{} {}x{}, threshold {}, {} filled{}",
        params.difficulty,
        generated.grid.size(),
        generated.grid.size(),
        generated.threshold,
        generated.grid.filled_count(),
        if generated.background_removed {
            ""
        } else {
            " (background not removed)"
        }
    );

    if let Some(path) = preview {
        std::fs::write(path, &generated.preview_png)?;
        println!("Wrote preview {} ({} bytes)", path.display(), generated.preview_png.len());
    }
    if let Some(path) = reference {
        std::fs::write(path, &generated.reference_png)?;
        println!(
            "Wrote reference {} ({} bytes)",
            path.display(),
            generated.reference_png.len()
        );
    }

    Ok(())
}

/// Grid rows with their clues, followed by the column clues.
fn format_puzzle(grid: &NonogramGrid) -> String {
    fn clue_text(clues: &[usize]) -> String {
        if clues.is_empty() {
            return "0".to_string();
        }
        clues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    let mut out = String::new();
    for (line, clues) in grid.to_text().lines().zip(grid.row_clues()) {
        out.push_str(&format!("{line}  {}\n", clue_text(&clues)));
    }
    out.push_str("\nColumns:\n");
    for (x, clues) in grid.column_clues().iter().enumerate() {
        out.push_str(&format!("  {x:>2}: {}\n", clue_text(clues)));
    }
    out
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    // Header
    println!("Nonogrammer v{VERSION}");
    println!("Turns photographs into nonogram puzzles\n");

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
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    // Configuration section
    let config = AppConfig::load_from_env();
    println!("\nConfiguration:");
    println!("  Preview cap:      {} px", config.preview_max_dimension);
    println!("  Upload limit:     {} bytes", config.max_image_bytes);
    println!("  Default dim:      {}", config.default_dim_factor);
    println!(
        "  Subject mask:     {}",
        config
            .model
            .mask_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, background removal disabled)".to_string())
    );

    // Commands section
    println!("\nCommands:");
    println!("  nonogrammer serve      Start the HTTP server");
    println!("  nonogrammer generate   Generate a puzzle from an image file");
    println!("\nRun 'nonogrammer --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nonogrammer=debug,nonogram_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::load_from_env();

    // Create application state using shared server module
    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Nonogrammer server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
