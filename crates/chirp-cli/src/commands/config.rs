//! Persist theme, banner, and daily-tip settings.

use chirp_store::{ConfigPatch, ConfigStore, Theme, default_dir};

pub fn run(
    theme: Option<Theme>,
    banner: Option<bool>,
    daily_tip: Option<bool>,
) -> Result<(), String> {
    let patch = ConfigPatch {
        theme,
        show_banner: banner,
        daily_tip,
    };
    if patch.is_empty() {
        return Err("nothing to update; pass --theme, --banner, or --daily-tip".into());
    }
    ConfigStore::new(&default_dir()).save(&patch, false);
    Ok(())
}
