mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use face_tagger_core::detection::infrastructure::onnx_embedding_provider::OnnxEmbeddingProvider;
use face_tagger_core::pipeline::batch_executor::BatchExecutor;
use face_tagger_core::pipeline::build_gallery_use_case::{BuildGalleryUseCase, ReferencePolicy};
use face_tagger_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use face_tagger_core::pipeline::input_collector::collect_inputs;
use face_tagger_core::pipeline::run_reporter::{RunReporter, RunTotals, StdoutRunReporter};
use face_tagger_core::pipeline::tag_file_use_case::TagFileUseCase;
use face_tagger_core::shared::constants::{
    EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use face_tagger_core::shared::model_resolver;
use face_tagger_core::tagging::infrastructure::exiftool_metadata_store::ExiftoolMetadataStore;
use face_tagger_core::video::infrastructure::media_frame_reader::MediaFrameReader;

use settings::Settings;

/// Recognize known people in photos and videos and tag the files with their names.
#[derive(Parser)]
#[command(name = "face-tagger")]
struct Cli {
    /// Image or video files, or directories containing them.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Directory of reference images: one subdirectory or file per person.
    #[arg(long)]
    reference_dir: PathBuf,

    /// Maximum embedding distance accepted as a match (lower is stricter) [default: 0.55].
    ///
    /// Distances between normalized ArcFace embeddings run from 0 to 2; pairs of
    /// photos of the same person typically land near 1.0, so raise this value if
    /// known people come out as unknown.
    #[arg(long)]
    tolerance: Option<f32>,

    /// Face detection confidence threshold (0.0-1.0) [default: 0.5].
    #[arg(long)]
    confidence: Option<f64>,

    /// Number of files processed in parallel [default: available cores].
    #[arg(long)]
    jobs: Option<usize>,

    /// Fail when a reference image has no face or several faces.
    #[arg(long)]
    strict_references: bool,

    /// Directory searched for model files before the user cache.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Effective options after merging flags over persisted settings.
#[derive(Debug, PartialEq)]
struct RunConfig {
    tolerance: f32,
    confidence: f64,
    jobs: Option<usize>,
    policy: ReferencePolicy,
}

impl RunConfig {
    fn resolve(cli: &Cli, settings: &Settings) -> Self {
        let strict = cli.strict_references || settings.strict_references;
        Self {
            tolerance: cli.tolerance.unwrap_or(settings.tolerance),
            confidence: cli.confidence.unwrap_or(settings.confidence),
            jobs: cli.jobs.or(settings.jobs),
            policy: if strict {
                ReferencePolicy::Strict
            } else {
                ReferencePolicy::Lenient
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(totals) if totals.has_failures() => process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<RunTotals, Box<dyn std::error::Error>> {
    let config = RunConfig::resolve(&cli, &Settings::load());
    validate(&cli, &config)?;

    let store = ExiftoolMetadataStore::locate()?;
    let provider = build_provider(cli.models_dir.as_deref(), config.confidence)?;
    let reader = MediaFrameReader::default();

    log::info!("Building reference gallery from {}", cli.reference_dir.display());
    let gallery =
        BuildGalleryUseCase::new(&reader, &provider, config.policy).execute(&cli.reference_dir)?;

    let inputs = collect_inputs(&cli.paths);
    let mut reporter = StdoutRunReporter::new();
    for (path, reason) in &inputs.skipped {
        reporter.input_skipped(path, reason);
    }

    let executor = match config.jobs {
        Some(jobs) => ThreadedBatchExecutor::new(jobs),
        None => ThreadedBatchExecutor::default(),
    };
    let tagger = TagFileUseCase::new(&reader, &provider, &gallery, &store, config.tolerance);
    let result = executor.execute(&inputs.files, &tagger, &mut reporter);
    reporter.summary();
    result?;

    Ok(reporter.totals().clone())
}

fn build_provider(
    models_dir: Option<&Path>,
    confidence: f64,
) -> Result<OnnxEmbeddingProvider, Box<dyn std::error::Error>> {
    log::info!("Resolving models: {YOLO_MODEL_NAME}, {EMBEDDING_MODEL_NAME}");
    let detector_model = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        models_dir,
        Some(Box::new(|done: u64, total: u64| {
            download_progress("face detection", done, total)
        })),
    )?;
    let embedder_model = model_resolver::resolve(
        EMBEDDING_MODEL_NAME,
        EMBEDDING_MODEL_URL,
        models_dir,
        Some(Box::new(|done: u64, total: u64| {
            download_progress("face recognition", done, total)
        })),
    )?;

    OnnxEmbeddingProvider::from_models(&detector_model, &embedder_model, confidence)
}

fn validate(cli: &Cli, config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.reference_dir.is_dir() {
        return Err(format!(
            "Reference directory not found: {}",
            cli.reference_dir.display()
        )
        .into());
    }
    if !config.tolerance.is_finite() || config.tolerance < 0.0 {
        return Err(format!(
            "Tolerance must be a non-negative number, got {}",
            config.tolerance
        )
        .into());
    }
    if !(0.0..=1.0).contains(&config.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            config.confidence
        )
        .into());
    }
    if config.jobs == Some(0) {
        return Err("Jobs must be at least 1".into());
    }
    Ok(())
}

fn download_progress(model: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {model} model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {model} model... {downloaded} bytes");
    }
}
