use crate::segments::domain::segment::Segment;
use crate::shared::timecode::format_timecode;
use crate::subtitles::domain::subtitle_saver::{SubtitleSaver, TimedCue};

/// Converts the committed segment list to timecoded cues and hands them to
/// the saver.
pub struct SaveSubtitlesUseCase {
    saver: Box<dyn SubtitleSaver>,
}

impl SaveSubtitlesUseCase {
    pub fn new(saver: Box<dyn SubtitleSaver>) -> Self {
        Self { saver }
    }

    /// Returns the number of cues written.
    pub fn execute(
        &mut self,
        name: &str,
        segments: &[Segment],
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let cues = to_cues(segments);
        self.saver.save(name, &cues)?;
        log::info!("Saved {} cues to {name}", cues.len());
        Ok(cues.len())
    }
}

pub fn to_cues(segments: &[Segment]) -> Vec<TimedCue> {
    segments
        .iter()
        .map(|s| TimedCue {
            start: format_timecode(s.start),
            end: format_timecode(s.end),
            text: s.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // ── Stubs ────────────────────────────────────────────────────────

    #[allow(clippy::type_complexity)]
    struct StubSaver {
        saved: Arc<Mutex<Vec<(String, Vec<TimedCue>)>>>,
    }

    impl SubtitleSaver for StubSaver {
        fn save(&mut self, name: &str, cues: &[TimedCue]) -> Result<(), Box<dyn std::error::Error>> {
            self.saved
                .lock()
                .unwrap()
                .push((name.to_string(), cues.to_vec()));
            Ok(())
        }
    }

    struct FailingSaver;

    impl SubtitleSaver for FailingSaver {
        fn save(&mut self, _name: &str, _cues: &[TimedCue]) -> Result<(), Box<dyn std::error::Error>> {
            Err("disk full".into())
        }
    }

    // ── Tests ────────────────────────────────────────────────────────

    #[test]
    fn test_saves_formatted_cues() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut use_case = SaveSubtitlesUseCase::new(Box::new(StubSaver {
            saved: saved.clone(),
        }));

        let segments = vec![
            Segment::new(0.0, 1.5, "Hello"),
            Segment::new(61.25, 3725.0004, "World"),
        ];
        let count = use_case.execute("out.srt", &segments).unwrap();

        assert_eq!(count, 2);
        let saved = saved.lock().unwrap();
        assert_eq!(saved[0].0, "out.srt");
        assert_eq!(
            saved[0].1,
            vec![
                TimedCue {
                    start: "00:00:00,000".into(),
                    end: "00:00:01,500".into(),
                    text: "Hello".into(),
                },
                TimedCue {
                    start: "00:01:01,250".into(),
                    end: "01:02:05,000".into(),
                    text: "World".into(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_list_saves_nothing_but_succeeds() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let mut use_case = SaveSubtitlesUseCase::new(Box::new(StubSaver {
            saved: saved.clone(),
        }));
        assert_eq!(use_case.execute("out.srt", &[]).unwrap(), 0);
        assert!(saved.lock().unwrap()[0].1.is_empty());
    }

    #[test]
    fn test_saver_error_propagates() {
        let mut use_case = SaveSubtitlesUseCase::new(Box::new(FailingSaver));
        let err = use_case
            .execute("out.srt", &[Segment::new(0.0, 1.0, "x")])
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
