use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use subedit_core::segments::domain::segment::Segment;
use subedit_core::shared::timecode::parse_timecode;
use subedit_core::subtitles::domain::subtitle_loader::{LoadedSubtitles, SubtitleLoader};
use subedit_core::subtitles::domain::subtitle_saver::{SubtitleSaver, TimedCue};

const MEDIA_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "mov", "avi", "m4v"];

/// Reads `.srt` files from disk.
///
/// Index lines are optional and entries with an unreadable timing line are
/// skipped with a warning. The SRT format carries no media length, so the
/// duration is whatever was passed to [`SrtFileLoader::with_duration`].
#[derive(Debug, Default)]
pub struct SrtFileLoader {
    duration: Option<f64>,
}

impl SrtFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }
}

impl SubtitleLoader for SrtFileLoader {
    fn load(&mut self, name: &str) -> Result<LoadedSubtitles, Box<dyn std::error::Error>> {
        let path = Path::new(name);
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let segments = parse_srt(&content);
        log::info!("Read {} entries from {}", segments.len(), path.display());
        Ok(LoadedSubtitles {
            segments,
            duration: self.duration,
            media: find_media(path).map(|p| p.display().to_string()),
        })
    }
}

/// Writes `.srt` files, renumbering from 1. An existing file is first copied
/// to `<file>.bak.<unix-seconds>`.
#[derive(Debug, Default)]
pub struct SrtFileSaver {
    backup: bool,
}

impl SrtFileSaver {
    pub fn new() -> Self {
        Self { backup: true }
    }

    pub fn without_backup() -> Self {
        Self { backup: false }
    }
}

impl SubtitleSaver for SrtFileSaver {
    fn save(&mut self, name: &str, cues: &[TimedCue]) -> Result<(), Box<dyn std::error::Error>> {
        let path = Path::new(name);
        if self.backup && path.exists() {
            let backup = backup_path(path);
            fs::copy(path, &backup)
                .map_err(|e| format!("Failed to back up {}: {e}", path.display()))?;
            log::info!("Backup written to {}", backup.display());
        }
        fs::write(path, render_srt(cues))
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }
}

pub fn parse_srt(content: &str) -> Vec<Segment> {
    let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut segments = Vec::new();

    for block in normalized.split("\n\n") {
        let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
        let Some(timing_at) = lines.iter().position(|l| l.contains("-->")) else {
            if !lines.is_empty() {
                log::warn!("Skipping entry without timing line: {:?}", lines[0]);
            }
            continue;
        };

        match parse_timing(lines[timing_at]) {
            Some((start, end)) => {
                let text = lines[timing_at + 1..].join("\n");
                segments.push(Segment::new(start, end, text));
            }
            None => log::warn!("Skipping entry with bad timing: {:?}", lines[timing_at]),
        }
    }
    segments
}

fn parse_timing(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    // Trailing cue settings such as `X1:100` follow the end time.
    let end = rest.split_whitespace().next()?;
    Some((parse_timecode(start).ok()?, parse_timecode(end).ok()?))
}

pub fn render_srt(cues: &[TimedCue]) -> String {
    cues.iter()
        .enumerate()
        .map(|(i, cue)| format!("{}\n{} --> {}\n{}\n", i + 1, cue.start, cue.end, cue.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn backup_path(path: &Path) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".bak.{stamp}"));
    PathBuf::from(name)
}

/// A video next to the subtitle file with the same stem, e.g. `talk.mp4`
/// for `talk.srt` or `talk.en.srt`.
fn find_media(subtitle: &Path) -> Option<PathBuf> {
    let dir = subtitle.parent()?;
    let file_name = subtitle.file_name()?.to_str()?;
    let stem = file_name.split('.').next()?;
    MEDIA_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
}
