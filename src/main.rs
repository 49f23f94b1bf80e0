use clap::Parser;
use mathsheet::{ExportError, ExporterBuilder, RenderPolicy, read_exercise_set};
use std::path::PathBuf;
use std::time::Duration;

/// Export an exercise set with LaTeX math to a PDF.
#[derive(Parser, Debug)]
#[command(name = "mathsheet", version, about)]
struct Args {
    /// JSON file holding `{"title": ..., "exercises": [{"id": ..., "text": ...}]}`.
    input: PathBuf,

    /// Directory the PDF is written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Time allowed for rendering one math expression.
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// Embed the typeset vector rendering instead of the plain-text fallback.
    #[arg(long)]
    prefer_vector: bool,

    /// Footer text printed on every page.
    #[arg(long)]
    attribution: Option<String>,

    /// Additional font directories for math rendering.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

fn main() -> Result<(), ExportError> {
    env_logger::init();
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let result = runtime.block_on(run(args));
    // Do not wait for math renders that were abandoned after a timeout.
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<(), ExportError> {
    let set = read_exercise_set(&args.input)?;

    let policy = if args.prefer_vector {
        RenderPolicy::PreferVector
    } else {
        RenderPolicy::TextFallback
    };
    let mut builder = ExporterBuilder::new()
        .with_policy(policy)
        .with_span_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(attribution) = args.attribution {
        builder = builder.with_attribution(attribution);
    }
    for dir in &args.font_dirs {
        builder = builder.with_font_dir(dir);
    }
    let exporter = builder.build()?;

    let path = exporter.export_to_dir(&set, &args.output_dir).await?;
    println!("Wrote {}", path.display());
    Ok(())
}
