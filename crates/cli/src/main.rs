mod edit_op;
mod srt;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use subedit_core::editing::domain::snapping::validate_snap_step;
use subedit_core::playback::domain::media_player::{MediaPlayer, PlaybackEvent};
use subedit_core::playback::domain::playback_synchronizer::PlaybackSynchronizer;
use subedit_core::playback::infrastructure::log_caption_output::{
    LogCaptionOverlay, LogNativeCaptionTrack,
};
use subedit_core::playback::infrastructure::still_player::StillPlayer;
use subedit_core::preferences::domain::preference_store::PreferenceStore;
use subedit_core::preferences::domain::snap_step_preference::save_snap_step;
use subedit_core::preferences::infrastructure::in_memory_preference_store::InMemoryPreferenceStore;
use subedit_core::preferences::infrastructure::json_preference_store::JsonPreferenceStore;
use subedit_core::session::edit_logger::CountingEditLogger;
use subedit_core::session::editor_session::EditorSession;
use subedit_core::shared::timecode::format_timecode;
use subedit_core::subtitles::domain::subtitle_resources::SubtitleResources;
use subedit_core::workflow::open_subtitles_use_case::OpenSubtitlesUseCase;
use subedit_core::workflow::save_subtitles_use_case::{to_cues, SaveSubtitlesUseCase};

use edit_op::EditOp;
use srt::{render_srt, SrtFileLoader, SrtFileSaver};

/// Scripted boundary, split, delete and text edits on SRT subtitle files.
#[derive(Parser)]
#[command(name = "subedit")]
struct Cli {
    /// Input .srt file.
    input: PathBuf,

    /// Output file (defaults to overwriting the input, after a backup).
    output: Option<PathBuf>,

    /// Edit to apply, in order. Repeatable, e.g. --op drag:0:end:2.4
    #[arg(long = "op")]
    ops: Vec<EditOp>,

    /// Media duration in seconds (defaults to the end of the last segment).
    #[arg(long)]
    duration: Option<f64>,

    /// Snap step in seconds; remembered for later runs.
    #[arg(long)]
    snap_step: Option<f64>,

    /// Print the caption active at this time after editing.
    #[arg(long, conflicts_with = "play")]
    at: Option<f64>,

    /// Seek to the start of segment N (1-based) and print its caption.
    #[arg(long)]
    play: Option<usize>,

    /// Evaluate --at/--play as if the player were fullscreen.
    #[arg(long)]
    fullscreen: bool,

    /// Print the resulting timeline.
    #[arg(long)]
    show: bool,

    /// With --show, print the timeline as JSON.
    #[arg(long, requires = "show")]
    json: bool,

    /// Stop at the first rejected edit instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Print the resulting SRT to stdout instead of writing it.
    #[arg(long)]
    dry_run: bool,

    /// Do not back up the file being overwritten.
    #[arg(long)]
    no_backup: bool,
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
    validate(&cli)?;

    let preferences = open_preferences(cli.snap_step)?;
    let input = cli.input.display().to_string();
    let resources = SubtitleResources::new(vec![input.clone()], Some(input));

    let loader = SrtFileLoader::new().with_duration(cli.duration);
    let mut session = OpenSubtitlesUseCase::new(Box::new(loader)).execute(
        &resources,
        preferences.as_ref(),
        Box::new(CountingEditLogger::new()),
    )?;

    apply_ops(&mut session, &cli.ops, cli.strict)?;

    if cli.show {
        print_timeline(&session, cli.json)?;
    }
    if cli.at.is_some() || cli.play.is_some() {
        let mut player = StillPlayer::new(cli.at.unwrap_or(0.0));
        player.set_fullscreen(cli.fullscreen);
        if let Some(n) = cli.play {
            session.play_segment(n - 1, &mut player)?;
        }
        print_caption(&session, &player);
    }

    if cli.dry_run {
        print!("{}", render_srt(&to_cues(session.segments())));
    } else if !cli.ops.is_empty() || cli.output.is_some() {
        let target = cli.output.as_ref().unwrap_or(&cli.input).display().to_string();
        let saver = if cli.no_backup {
            SrtFileSaver::without_backup()
        } else {
            SrtFileSaver::new()
        };
        SaveSubtitlesUseCase::new(Box::new(saver)).execute(&target, session.segments())?;
        log::info!("Output written to {target}");
    }

    session.finish();
    Ok(())
}

fn apply_ops(
    session: &mut EditorSession,
    ops: &[EditOp],
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for (n, op) in ops.iter().enumerate() {
        if let Err(reason) = op.apply(session) {
            if strict {
                return Err(format!("Edit #{} ({op:?}) rejected: {reason}", n + 1).into());
            }
            eprintln!("Skipping edit #{}: {reason}", n + 1);
        }
    }
    Ok(())
}

/// The persisted snap step lives in the user's config directory. Without
/// one, fall back to an in-memory store so a run still works.
fn open_preferences(
    snap_step: Option<f64>,
) -> Result<Box<dyn PreferenceStore>, Box<dyn std::error::Error>> {
    let mut store: Box<dyn PreferenceStore> = match JsonPreferenceStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Preferences unavailable ({e}); using defaults");
            Box::new(InMemoryPreferenceStore::new())
        }
    };
    if let Some(step) = snap_step {
        save_snap_step(store.as_mut(), step)?;
    }
    Ok(store)
}

fn print_timeline(session: &EditorSession, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let view = session.render();
    if json {
        println!("{}", view.to_json()?);
        return Ok(());
    }
    println!("Timeline: {} ({} segments)", format_timecode(view.duration), view.bars.len());
    for bar in &view.bars {
        println!(
            "{:>4}  {} --> {}  {:5.1}%  {}",
            bar.index + 1,
            format_timecode(bar.start),
            format_timecode(bar.end),
            bar.width * 100.0,
            bar.text.replace('\n', " / ")
        );
    }
    Ok(())
}

fn print_caption(session: &EditorSession, player: &StillPlayer) {
    let mut synchronizer = PlaybackSynchronizer::new(
        Box::new(LogCaptionOverlay::new()),
        Box::new(LogNativeCaptionTrack::new()),
    );
    let event = if player.is_fullscreen() {
        PlaybackEvent::FullscreenChanged(true)
    } else {
        PlaybackEvent::SeekCompleted
    };
    let frame = session.sync_playback(&mut synchronizer, event, player);

    let mode = if frame.native_track_enabled {
        "native track"
    } else {
        "overlay"
    };
    match (frame.active_index, frame.caption) {
        (Some(index), Some(text)) => {
            println!("{} [#{} via {mode}] {text}", format_timecode(frame.time), index + 1)
        }
        _ => println!("{} [no caption]", format_timecode(frame.time)),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if let Some(step) = cli.snap_step {
        validate_snap_step(step)?;
    }
    if let Some(d) = cli.duration {
        if !d.is_finite() || d <= 0.0 {
            return Err(format!("Duration must be a positive number of seconds, got {d}").into());
        }
    }
    if let Some(t) = cli.at {
        if !t.is_finite() || t < 0.0 {
            return Err(format!("--at must be a non-negative time, got {t}").into());
        }
    }
    if cli.play == Some(0) {
        return Err("--play takes a 1-based segment number".into());
    }
    if cli.fullscreen && cli.at.is_none() && cli.play.is_none() {
        return Err("--fullscreen only applies together with --at or --play".into());
    }
    Ok(())
}
