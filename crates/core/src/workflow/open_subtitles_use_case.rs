use crate::editing::domain::snapping::SnapSettings;
use crate::preferences::domain::preference_store::PreferenceStore;
use crate::preferences::domain::snap_step_preference::load_snap_step;
use crate::session::edit_logger::EditLogger;
use crate::session::editor_session::EditorSession;
use crate::subtitles::domain::subtitle_loader::SubtitleLoader;
use crate::subtitles::domain::subtitle_resources::SubtitleResources;

/// Opens a subtitle resource into a fresh editing session.
///
/// The snap step comes from the persisted preference. When the loader does
/// not know the media duration, the end of the last segment stands in.
pub struct OpenSubtitlesUseCase {
    loader: Box<dyn SubtitleLoader>,
}

impl OpenSubtitlesUseCase {
    pub fn new(loader: Box<dyn SubtitleLoader>) -> Self {
        Self { loader }
    }

    pub fn execute(
        &mut self,
        resources: &SubtitleResources,
        preferences: &dyn PreferenceStore,
        logger: Box<dyn EditLogger>,
    ) -> Result<EditorSession, Box<dyn std::error::Error>> {
        let name = resources.resolve().ok_or("No subtitle resources available")?;
        let loaded = self.loader.load(name)?;

        let duration = loaded
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or_else(|| loaded.segments.last().map_or(0.0, |s| s.end));

        let snap = SnapSettings::new(load_snap_step(preferences))?;
        let mut session = EditorSession::new(snap, logger);
        session.load(loaded.segments, duration, loaded.media);
        log::info!("Opened {name}");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::infrastructure::in_memory_preference_store::InMemoryPreferenceStore;
    use crate::segments::domain::segment::Segment;
    use crate::session::edit_logger::NullEditLogger;
    use crate::shared::constants::SNAP_STEP_SETTING_KEY;
    use crate::subtitles::domain::subtitle_loader::LoadedSubtitles;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    // ── Stubs ────────────────────────────────────────────────────────

    struct StubLoader {
        result: LoadedSubtitles,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl StubLoader {
        fn new(result: LoadedSubtitles) -> Self {
            Self {
                result,
                requested: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl SubtitleLoader for StubLoader {
        fn load(&mut self, name: &str) -> Result<LoadedSubtitles, Box<dyn std::error::Error>> {
            self.requested.lock().unwrap().push(name.to_string());
            Ok(self.result.clone())
        }
    }

    struct FailingLoader;

    impl SubtitleLoader for FailingLoader {
        fn load(&mut self, _name: &str) -> Result<LoadedSubtitles, Box<dyn std::error::Error>> {
            Err("not found".into())
        }
    }

    fn resources() -> SubtitleResources {
        SubtitleResources::new(
            vec!["en.srt".into(), "de.srt".into()],
            Some("de.srt".into()),
        )
    }

    fn loaded(duration: Option<f64>) -> LoadedSubtitles {
        LoadedSubtitles {
            segments: vec![Segment::new(0.0, 2.0, "a"), Segment::new(2.5, 4.0, "b")],
            duration,
            media: Some("clip.mp4".into()),
        }
    }

    // ── Tests ────────────────────────────────────────────────────────

    #[test]
    fn test_opens_selected_resource() {
        let loader = StubLoader::new(loaded(Some(30.0)));
        let requested = loader.requested.clone();
        let mut use_case = OpenSubtitlesUseCase::new(Box::new(loader));

        let session = use_case
            .execute(&resources(), &InMemoryPreferenceStore::new(), Box::new(NullEditLogger))
            .unwrap();

        assert_eq!(*requested.lock().unwrap(), vec!["de.srt".to_string()]);
        assert_eq!(session.segments().len(), 2);
        assert_relative_eq!(session.store().duration(), 30.0);
        assert_eq!(session.media(), Some("clip.mp4"));
    }

    #[test]
    fn test_missing_duration_falls_back_to_last_end() {
        let mut use_case = OpenSubtitlesUseCase::new(Box::new(StubLoader::new(loaded(None))));
        let session = use_case
            .execute(&resources(), &InMemoryPreferenceStore::new(), Box::new(NullEditLogger))
            .unwrap();
        assert_relative_eq!(session.store().duration(), 4.0);
    }

    #[test]
    fn test_zero_duration_falls_back_to_last_end() {
        let mut use_case =
            OpenSubtitlesUseCase::new(Box::new(StubLoader::new(loaded(Some(0.0)))));
        let session = use_case
            .execute(&resources(), &InMemoryPreferenceStore::new(), Box::new(NullEditLogger))
            .unwrap();
        assert_relative_eq!(session.store().duration(), 4.0);
    }

    #[test]
    fn test_snap_step_read_from_preferences() {
        let mut prefs = InMemoryPreferenceStore::new();
        prefs.set(SNAP_STEP_SETTING_KEY, "0.25").unwrap();
        let mut use_case = OpenSubtitlesUseCase::new(Box::new(StubLoader::new(loaded(None))));
        let session = use_case
            .execute(&resources(), &prefs, Box::new(NullEditLogger))
            .unwrap();
        assert_relative_eq!(session.snap_step(), 0.25);
    }

    #[test]
    fn test_no_resources_is_an_error() {
        let mut use_case = OpenSubtitlesUseCase::new(Box::new(StubLoader::new(loaded(None))));
        let result = use_case.execute(
            &SubtitleResources::default(),
            &InMemoryPreferenceStore::new(),
            Box::new(NullEditLogger),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_error_propagates() {
        let mut use_case = OpenSubtitlesUseCase::new(Box::new(FailingLoader));
        let result = use_case.execute(
            &resources(),
            &InMemoryPreferenceStore::new(),
            Box::new(NullEditLogger),
        );
        assert_eq!(result.err().unwrap().to_string(), "not found");
    }
}
