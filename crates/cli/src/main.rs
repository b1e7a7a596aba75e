use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};

use narration_sync_core::captions::domain::caption_segment::visible_caption;
use narration_sync_core::output::domain::artifact_store::ArtifactStore;
use narration_sync_core::output::infrastructure::file_audio_store::FileAudioStore;
use narration_sync_core::output::infrastructure::json_artifact_store::JsonArtifactStore;
use narration_sync_core::pipeline::generate_narration_use_case::GenerateNarrationUseCase;
use narration_sync_core::pipeline::infrastructure::sequential_narration_executor::SequentialNarrationExecutor;
use narration_sync_core::pipeline::infrastructure::threaded_narration_executor::ThreadedNarrationExecutor;
use narration_sync_core::pipeline::narration_executor::NarrationExecutor;
use narration_sync_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use narration_sync_core::pipeline::sync_durations_use_case::{DurationPlan, SyncDurationsUseCase};
use narration_sync_core::scenes::infrastructure::settings_file;
use narration_sync_core::shared::constants::CAPTION_TRANSITION_GUARD;
use narration_sync_core::speech::infrastructure::azure_openai_client::{
    AzureOpenAiClient, AzureOpenAiConfig,
};

/// Narration audio, word-timed captions and scene durations for a video composition.
#[derive(Parser)]
#[command(name = "narration-sync", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Voice every scene, derive captions and durations, and write them out.
    Generate(GenerateArgs),

    /// Recompute durations from an existing narration table (no service calls).
    Resync(ResyncArgs),

    /// Show which caption a scene displays at a frame.
    CaptionAt(CaptionAtArgs),

    /// List model deployments on the Azure OpenAI resource.
    Deployments,
}

#[derive(Args)]
struct GenerateArgs {
    /// Pipeline settings JSON (defaults are used when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory for the narration table and duration record.
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,

    /// Directory for scene audio (defaults to <out-dir>/audio).
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Renderer source file whose `NAME_DURATION = <n>;` constants are rewritten.
    #[arg(long)]
    patch_constants: Option<PathBuf>,

    /// Voice scenes concurrently with this many workers.
    #[arg(long)]
    parallel: Option<usize>,

    /// Compute everything but write nothing.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ResyncArgs {
    /// Pipeline settings JSON (defaults are used when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding the narration table; the duration record is written here.
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,

    /// Renderer source file whose `NAME_DURATION = <n>;` constants are rewritten.
    #[arg(long)]
    patch_constants: Option<PathBuf>,

    /// Print the new durations without writing them.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct CaptionAtArgs {
    /// Scene key, e.g. `codeWalkthrough`.
    scene: String,

    /// Frame number relative to the scene start.
    frame: u32,

    /// Directory holding the narration table.
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,

    /// Frames at the scene start during which no caption is shown.
    #[arg(long, default_value_t = CAPTION_TRANSITION_GUARD)]
    guard: u32,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Resync(args) => run_resync(args),
        Command::CaptionAt(args) => run_caption_at(args),
        Command::Deployments => run_deployments(),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_generate(&args)?;
    let settings = settings_file::load(args.settings.as_deref())?;

    let client = AzureOpenAiClient::new(AzureOpenAiConfig::from_env()?)?;
    log::info!(
        "Using deployments '{}' (speech) and '{}' (transcription)",
        client.config().tts_deployment,
        client.config().whisper_deployment
    );

    let audio_dir = args
        .audio_dir
        .clone()
        .unwrap_or_else(|| args.out_dir.join("audio"));
    let executor: Box<dyn NarrationExecutor> = match args.parallel {
        Some(workers) if workers > 1 => Box::new(ThreadedNarrationExecutor::new(workers)),
        _ => Box::new(SequentialNarrationExecutor),
    };

    let mut use_case = GenerateNarrationUseCase::new(
        Box::new(client.clone()),
        Box::new(client),
        Box::new(FileAudioStore::new(&audio_dir)),
        artifact_store(&args.out_dir, args.patch_constants.as_deref()),
        executor,
        settings,
        Some(Box::new(StdoutPipelineLogger::new())),
        args.dry_run,
    );
    let report = use_case.execute()?;

    print_plan(&report.plan);
    if !report.degraded.is_empty() {
        log::warn!(
            "Fallback captions used for: {}",
            report.degraded.join(", ")
        );
    }
    if !args.dry_run {
        log::info!(
            "Wrote {} audio files to {}",
            report.audio_paths.len(),
            audio_dir.display()
        );
        log::info!("Artifacts written to {}", args.out_dir.display());
    }
    Ok(())
}

fn run_resync(args: ResyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &args.patch_constants {
        require_file(path)?;
    }
    let settings = settings_file::load(args.settings.as_deref())?;
    let plan = SyncDurationsUseCase::new(
        settings,
        artifact_store(&args.out_dir, args.patch_constants.as_deref()),
    )
    .with_dry_run(args.dry_run)
    .execute()?;
    print_plan(&plan);
    Ok(())
}

fn run_caption_at(args: CaptionAtArgs) -> Result<(), Box<dyn std::error::Error>> {
    let table = JsonArtifactStore::new(&args.out_dir).read_narrations()?;
    let narration = table
        .scenes
        .get(&args.scene)
        .ok_or_else(|| format!("No scene '{}' in the narration table", args.scene))?;

    match visible_caption(&narration.captions, args.frame, args.guard) {
        Some(caption) => println!(
            "[{}..{}) {}",
            caption.start_frame(),
            caption.end_frame(),
            caption.text()
        ),
        None => println!("(no caption)"),
    }
    Ok(())
}

fn run_deployments() -> Result<(), Box<dyn std::error::Error>> {
    let client = AzureOpenAiClient::new(AzureOpenAiConfig::from_env()?)?;
    let deployments = client.list_deployments()?;
    if deployments.is_empty() {
        println!("No deployments found on {}", client.config().endpoint);
    }
    for d in deployments {
        println!(
            "{:24} {:24} {}",
            d.id,
            d.model,
            d.status.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn artifact_store(out_dir: &Path, constants: Option<&Path>) -> Box<dyn ArtifactStore> {
    let store = JsonArtifactStore::new(out_dir);
    match constants {
        Some(path) => Box::new(store.with_constants_file(path)),
        None => Box::new(store),
    }
}

fn print_plan(plan: &DurationPlan) {
    for slot in &plan.slots {
        let note = if slot.active { "" } else { "  (omitted)" };
        println!("{:20} {:6}{note}", slot.key, slot.duration);
    }
    println!(
        "{:20} {:6}  ({} transitions)",
        "TOTAL", plan.total, plan.transitions
    );
}

fn validate_generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.parallel == Some(0) {
        return Err("--parallel must be at least 1".into());
    }
    if let Some(path) = &args.settings {
        require_file(path)?;
    }
    if let Some(path) = &args.patch_constants {
        require_file(path)?;
    }
    Ok(())
}

fn require_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}
