use super::preference_store::PreferenceStore;
use crate::editing::domain::snapping::validate_snap_step;
use crate::shared::constants::{DEFAULT_SNAP_STEP, SNAP_STEP_SETTING_KEY};

/// Stored snap step, or the default when nothing usable was saved.
pub fn load_snap_step(store: &dyn PreferenceStore) -> f64 {
    store
        .get(SNAP_STEP_SETTING_KEY)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|step| validate_snap_step(*step).is_ok())
        .unwrap_or(DEFAULT_SNAP_STEP)
}

pub fn save_snap_step(
    store: &mut dyn PreferenceStore,
    snap_step: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_snap_step(snap_step)?;
    store.set(SNAP_STEP_SETTING_KEY, &snap_step.to_string())
}
