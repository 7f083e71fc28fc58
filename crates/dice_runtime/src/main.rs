//! DreamDice Runtime
//!
//! Minimal binary that boots the script runtime and loads the dice modules

mod chunks;

use std::path::Path;

use anyhow::Result;
use dice_script::loader::{self, EntryPolicy};
use dice_script::runtime::ScriptRuntime;
use dice_services::settings::Settings;

const SETTINGS_PATH: &str = "dreamdice.json";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("DreamDice v{}", dice_script::VERSION);

    let settings = Settings::load_or_default(Path::new(SETTINGS_PATH));
    let policy = if settings.loader.strict_entry {
        EntryPolicy::Strict
    } else {
        EntryPolicy::Lenient
    };

    let runtime = ScriptRuntime::new()?;
    let report = loader::boot(
        &runtime,
        &[chunks::ROLL, chunks::ROLL_TESTS],
        &chunks::ROLL_MAIN,
        policy,
    )?;

    tracing::info!(modules = ?report.modules, "script modules bound");
    if !report.entry_completed() {
        tracing::warn!("entry chunk did not complete; dice modules remain loaded");
    }

    Ok(())
}
