//! Subtitle timeline editing engine.
//!
//! Each bounded context keeps its types, ports and pure logic under
//! `domain` and concrete adapters under `infrastructure`. The `session`
//! module ties them into one editable document; `workflow` holds the
//! load/save use cases.

pub mod segments {
    pub mod domain {
        pub mod boundary;
        pub mod edit_rejected;
        pub mod segment;
        pub mod segment_store;
    }
}

pub mod history {
    pub mod domain {
        pub mod undo_history;
    }
}

pub mod editing {
    pub mod domain {
        pub mod boundary_controller;
        pub mod selection;
        pub mod snapping;
        pub mod track_geometry;
    }
}

pub mod playback {
    pub mod domain {
        pub mod caption_output;
        pub mod media_player;
        pub mod playback_synchronizer;
    }
    pub mod infrastructure {
        pub mod log_caption_output;
        pub mod still_player;
    }
}

pub mod preferences {
    pub mod domain {
        pub mod preference_store;
        pub mod snap_step_preference;
    }
    pub mod infrastructure {
        pub mod in_memory_preference_store;
        pub mod json_preference_store;
    }
}

pub mod subtitles {
    pub mod domain {
        pub mod subtitle_loader;
        pub mod subtitle_resources;
        pub mod subtitle_saver;
    }
}

pub mod session {
    pub mod edit_logger;
    pub mod editor_session;
    pub mod timeline_view;
}

pub mod workflow {
    pub mod open_subtitles_use_case;
    pub mod save_subtitles_use_case;
}

pub mod shared {
    pub mod constants;
    pub mod timecode;
}
