use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dither_core::{
    ColorQuantizer, ColorReplacementMap, DitherSpec, GrayscaleReducer, Palette, PaletteEntry,
    PaletteExtractor, Rgb, TransformOutput,
};
use ditherkit::api;
use ditherkit::models::AppConfig;
use ditherkit::rendering::{read_png, write_png};
use ditherkit::server;

#[derive(Parser)]
#[command(name = "ditherkit")]
#[command(about = "Dithering, color quantization and palette extraction for images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Dither settings shared by `dither` and `quantize`
#[derive(Args)]
struct DitherArgs {
    /// Strategy: bitmap, floyd-steinberg, atkinson, jarvis, stucki, bayer2,
    /// bayer4, bayer8, clustered4, random, blue-noise, stretch
    #[arg(short, long)]
    method: Option<String>,

    /// Threshold for threshold-based strategies (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Error or noise strength multiplier
    #[arg(short, long)]
    factor: Option<f32>,

    /// Contrast stretch amount in percent
    #[arg(long)]
    stretch: Option<f32>,

    /// Seed for random noise and seeded extraction
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Dither an image to black and white
    Dither {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        dither: DitherArgs,
    },
    /// Reduce an image to a palette
    Quantize {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(short, long)]
        colors: Option<String>,

        /// Per-color luminance thresholds (0.0-1.0), comma-separated
        #[arg(long, value_delimiter = ',')]
        thresholds: Vec<f32>,

        /// Output substitution "#from=#to", repeatable
        #[arg(long = "replace")]
        replacements: Vec<String>,

        /// Extract an N-color palette from the input instead of --colors
        #[arg(long)]
        auto: Option<usize>,

        /// Extraction strategy used with --auto
        #[arg(long)]
        extract: Option<String>,

        #[command(flatten)]
        dither: DitherArgs,
    },
    /// Print the palette extracted from an image, one hex color per line
    Palette {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Strategy: kmeans, median-cut, frequency, hue, extreme, pronounced,
        /// varied, distant, contrasting
        #[arg(short, long)]
        method: Option<String>,

        /// Number of colors
        #[arg(short, long)]
        size: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ditherkit API",
        description = "Dithering, color quantization and palette extraction for RGBA8 images",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_dither,
        api::handle_quantize,
        api::handle_palette,
    ),
    components(schemas(
        api::ImageData,
        api::DitherParams,
        api::JobParams,
        api::DitherRequest,
        api::PaletteColor,
        api::AutoPaletteParams,
        api::QuantizeRequest,
        api::PaletteRequest,
        api::ImageResponse,
        api::PaletteResponse,
    )),
    tags(
        (name = "Transform", description = "Image dithering, quantization and palette extraction")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Dither {
            input,
            output,
            dither,
        }) => run_dither_command(&input, &output, &dither),
        Some(Commands::Quantize {
            input,
            output,
            colors,
            thresholds,
            replacements,
            auto,
            extract,
            dither,
        }) => run_quantize_command(
            &input,
            &output,
            colors.as_deref(),
            &thresholds,
            &replacements,
            auto,
            extract.as_deref(),
            &dither,
        ),
        Some(Commands::Palette {
            input,
            method,
            size,
            seed,
        }) => run_palette_command(&input, method.as_deref(), size, seed),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherkit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn resolve_spec(config: &AppConfig, args: &DitherArgs) -> DitherSpec {
    config.defaults.dither_spec(
        args.method.as_deref(),
        args.threshold,
        args.factor,
        args.stretch,
        args.seed,
    )
}

fn report(output: &std::path::Path, result: &TransformOutput) {
    println!(
        "Wrote {} ({}x{}, {} colors)",
        output.display(),
        result.width(),
        result.height(),
        result.histogram.len()
    );
    for (color, count) in result.histogram.most_common() {
        println!("  {color}  {count}");
    }
}

/// Dither a PNG file (no server needed)
fn run_dither_command(
    input: &std::path::Path,
    output: &std::path::Path,
    args: &DitherArgs,
) -> anyhow::Result<()> {
    init_cli_tracing();
    let (config, _) = AppConfig::load();

    let buffer = read_png(input)?;
    let spec = resolve_spec(&config, args);
    tracing::info!(method = spec.method.name(), threshold = spec.threshold, "Dithering");

    let result = GrayscaleReducer::with_spec(spec).reduce(buffer);
    write_png(output, &result.buffer)?;
    report(output, &result);
    Ok(())
}

/// Quantize a PNG file against a given or extracted palette
#[allow(clippy::too_many_arguments)]
fn run_quantize_command(
    input: &std::path::Path,
    output: &std::path::Path,
    colors: Option<&str>,
    thresholds: &[f32],
    replacements: &[String],
    auto: Option<usize>,
    extract: Option<&str>,
    args: &DitherArgs,
) -> anyhow::Result<()> {
    init_cli_tracing();
    let (config, _) = AppConfig::load();

    let buffer = read_png(input)?;
    let spec = resolve_spec(&config, args);

    let palette_colors: Vec<Rgb> = match (auto, colors) {
        (Some(size), _) => PaletteExtractor::new(config.defaults.extraction(extract))
            .size(size)
            .sample_cap(config.defaults.sample_cap)
            .seed(args.seed)
            .extract(&buffer),
        (None, Some(colors)) => colors
            .split(',')
            .map(|c| c.parse::<Rgb>())
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid --colors: {e}"))?,
        (None, None) => anyhow::bail!("Either --colors or --auto is required"),
    };

    let entries: Vec<PaletteEntry> = palette_colors
        .iter()
        .enumerate()
        .map(|(i, &color)| PaletteEntry::new(color, thresholds.get(i).copied().unwrap_or(1.0)))
        .collect();
    let palette = Palette::new(entries)?;

    let pairs = replacements
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid --replace '{pair}', expected FROM=TO"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let replacements = ColorReplacementMap::from_hex_pairs(pairs)?;

    tracing::info!(
        method = spec.method.name(),
        colors = palette.len(),
        replacements = replacements.len(),
        "Quantizing"
    );

    let result = ColorQuantizer::new(palette)
        .dither(spec)
        .replacements(replacements)
        .quantize(buffer);
    write_png(output, &result.buffer)?;
    report(output, &result);
    Ok(())
}

/// Extract and print a palette
fn run_palette_command(
    input: &std::path::Path,
    method: Option<&str>,
    size: Option<usize>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    init_cli_tracing();
    let (config, _) = AppConfig::load();

    let buffer = read_png(input)?;
    let colors = PaletteExtractor::new(config.defaults.extraction(method))
        .size(size.unwrap_or(config.defaults.palette_size))
        .sample_cap(config.defaults.sample_cap)
        .seed(seed)
        .extract(&buffer);

    for color in colors {
        println!("{color}");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let (config, source) = AppConfig::load();

    // Header
    println!("Ditherkit v{VERSION}");
    println!("Dithering, color quantization and palette extraction\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Configuration section
    println!("\nConfiguration:");
    println!("  Source:      {source}");
    println!("  Bind:        {}", config.server.bind);
    println!(
        "  Max image:   {}x{}",
        config.limits.max_width, config.limits.max_height
    );
    println!("  Max jobs:    {}", config.limits.max_concurrent_jobs);
    println!(
        "  Defaults:    dither={} threshold={} extract={} size={}",
        config.defaults.dither_method,
        config.defaults.threshold,
        config.defaults.extraction_method,
        config.defaults.palette_size
    );

    // Commands section
    println!("\nCommands:");
    println!("  ditherkit serve     Start the HTTP server");
    println!("  ditherkit dither    Dither a PNG to black and white");
    println!("  ditherkit quantize  Reduce a PNG to a palette");
    println!("  ditherkit palette   Extract a palette from a PNG");
    println!("\nRun 'ditherkit --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherkit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (config, source) = AppConfig::load();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| config.server.bind.clone());

    tracing::info!(
        config = %source,
        max_width = config.limits.max_width,
        max_height = config.limits.max_height,
        max_concurrent_jobs = config.limits.max_concurrent_jobs,
        "Configuration resolved"
    );

    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Ditherkit server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
