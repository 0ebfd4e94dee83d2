use modelroute_core::Settings;
use modelroute_telemetry::{atomic_write, Paths};
use std::path::Path;

pub fn run(force: bool) -> anyhow::Result<()> {
    let paths = Paths::from_env();
    let Some(settings_path) = paths.settings_file.as_deref() else {
        anyhow::bail!("home directory not found; set MODELROUTE_CONFIG to choose a settings path");
    };

    if write_defaults(settings_path, force)? {
        println!("✓ Wrote default settings to {}", settings_path.display());
    } else {
        println!(
            "Settings already exist at {} (use --force to overwrite)",
            settings_path.display()
        );
    }
    Ok(())
}

fn write_defaults(path: &Path, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    let json = serde_json::to_string_pretty(&Settings::default())?;
    atomic_write(path, json.as_bytes())?;
    Ok(true)
}
