use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use facesort_core::clustering::domain::dbscan_clusterer::DbscanClusterer;
use facesort_core::detection::infrastructure::onnx_arcface_encoder::OnnxArcFaceEncoder;
use facesort_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use facesort_core::labeling::domain::labeler::Labeler;
use facesort_core::labeling::infrastructure::json_label_store::JsonLabelStore;
use facesort_core::labeling::infrastructure::stdin_label_prompt::{PromptInterrupt, StdinLabelPrompt};
use facesort_core::organizing::domain::file_action::FileAction;
use facesort_core::organizing::infrastructure::filesystem_organizer::FilesystemOrganizer;
use facesort_core::photos::infrastructure::image_photo_reader::ImagePhotoReader;
use facesort_core::photos::infrastructure::photo_library::list_images;
use facesort_core::pipeline::organize_photos_use_case::OrganizePhotosUseCase;
use facesort_core::shared::config::OrganizerConfig;
use facesort_core::shared::constants::{
    EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use facesort_core::shared::model_resolver::{self, ModelSource, ProgressFn};

/// Organize a photo collection into one folder per person, fully offline.
#[derive(Parser, Debug)]
#[command(name = "facesort", version)]
struct Cli {
    /// Directory containing the photos to organize.
    input_dir: PathBuf,

    /// Directory where per-person folders will be created.
    #[arg(short, long, default_value = "organized")]
    output_dir: PathBuf,

    /// Clustering distance threshold (0-1]. Lower = stricter.
    #[arg(long, default_value = "0.6")]
    threshold: f64,

    /// Minimum number of photos needed to form a person cluster.
    #[arg(long, default_value = "2")]
    min_cluster_size: usize,

    /// Copy or move photos into person folders: copy or move.
    #[arg(long, default_value = "copy")]
    action: String,

    /// Skip interactive labeling; use auto-generated labels.
    #[arg(long)]
    no_interactive: bool,

    /// Number of encoding re-samples (higher = slower but more accurate).
    #[arg(long, default_value = "1")]
    num_jitters: usize,

    /// Photos processed between progress reports.
    #[arg(long, default_value = "32")]
    batch_size: usize,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// JSON file remembering cluster names across runs.
    #[arg(long, default_value = "face_labels.json")]
    labels_file: PathBuf,

    /// Folder name for photos that match nobody else.
    #[arg(long, default_value = "unknown")]
    unknown_label: String,

    /// Use this face detection model instead of the cached download.
    #[arg(long)]
    detector_model: Option<PathBuf>,

    /// Use this face embedding model instead of the cached download.
    #[arg(long)]
    encoder_model: Option<PathBuf>,

    /// Enable verbose (debug) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;

    let photos = list_images(&config.input_dir, &config.image_extensions);
    log::info!(
        "Found {} image(s) in {}",
        photos.len(),
        config.input_dir.display()
    );

    let result = if photos.is_empty() {
        BTreeMap::new()
    } else {
        let mut use_case = build_use_case(&cli, &config)?;
        if cli.no_interactive {
            use_case.execute(&photos, None)?
        } else {
            let mut prompt = StdinLabelPrompt::stdio().with_interrupt(skip_on_ctrl_c()?);
            use_case.execute(&photos, Some(&mut prompt))?
        }
    };

    print_result(&result);
    Ok(())
}

/// Ctrl-C while a label question is open skips that cluster; otherwise it
/// ends the run.
fn skip_on_ctrl_c() -> Result<Arc<PromptInterrupt>, Box<dyn std::error::Error>> {
    let interrupt = Arc::new(PromptInterrupt::default());
    let handle = interrupt.clone();
    ctrlc::set_handler(move || {
        if !handle.interrupt() {
            process::exit(130);
        }
    })?;
    Ok(interrupt)
}

/// Turns arguments into a validated config. The input directory must exist.
fn build_config(cli: &Cli) -> Result<OrganizerConfig, Box<dyn std::error::Error>> {
    let config = OrganizerConfig {
        input_dir: cli.input_dir.clone(),
        output_dir: cli.output_dir.clone(),
        cluster_threshold: cli.threshold,
        cluster_min_samples: cli.min_cluster_size,
        file_action: cli.action.parse::<FileAction>()?,
        unknown_label: cli.unknown_label.clone(),
        labels_file: cli.labels_file.clone(),
        detection_confidence: cli.confidence,
        encoding_num_jitters: cli.num_jitters,
        batch_size: cli.batch_size,
        ..OrganizerConfig::default()
    };
    config.validate()?;

    if !config.input_dir.is_dir() {
        return Err(format!(
            "Input directory does not exist: {}",
            config.input_dir.display()
        )
        .into());
    }
    Ok(config)
}

fn build_use_case(
    cli: &Cli,
    config: &OrganizerConfig,
) -> Result<OrganizePhotosUseCase, Box<dyn std::error::Error>> {
    let detector_path = resolve_model(
        ModelSource {
            name: YOLO_MODEL_NAME,
            url: YOLO_MODEL_URL,
        },
        cli.detector_model.as_deref(),
        "face detection",
    )?;
    let encoder_path = resolve_model(
        ModelSource {
            name: EMBEDDING_MODEL_NAME,
            url: EMBEDDING_MODEL_URL,
        },
        cli.encoder_model.as_deref(),
        "face embedding",
    )?;

    let detector = OnnxYoloDetector::new(&detector_path, config.detection_confidence)?;
    let encoder = OnnxArcFaceEncoder::new(&encoder_path, config.encoding_num_jitters)?;

    Ok(OrganizePhotosUseCase::new(
        Box::new(ImagePhotoReader::new()),
        Box::new(detector),
        Box::new(encoder),
        Box::new(DbscanClusterer::new(
            config.cluster_threshold,
            config.cluster_min_samples,
        )),
        Labeler::new(
            Box::new(JsonLabelStore::new(&config.labels_file)),
            config.unknown_label.clone(),
        ),
        Box::new(FilesystemOrganizer::new(
            &config.output_dir,
            config.file_action,
        )),
        config.batch_size,
        None,
    ))
}

fn resolve_model(
    source: ModelSource<'_>,
    override_path: Option<&Path>,
    what: &'static str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", source.name);
    let path = model_resolver::resolve(source, override_path, Some(download_progress(what)))?;
    log::debug!("Using {what} model at {}", path.display());
    Ok(path)
}

fn download_progress(what: &'static str) -> ProgressFn {
    Box::new(move |downloaded, total| {
        if total > 0 {
            let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
            eprint!("\rDownloading {what} model... {pct}%");
            if downloaded >= total {
                eprintln!();
            }
        } else {
            eprint!("\rDownloading {what} model... {downloaded} bytes");
        }
    })
}

fn print_result(result: &BTreeMap<String, PathBuf>) {
    if result.is_empty() {
        println!("\nNo faces found, nothing to organize.");
        return;
    }
    println!("\n✓ Organized photos into {} group(s):", result.len());
    for (label, directory) in result {
        println!("  • {label}: {}", directory.display());
    }
}
