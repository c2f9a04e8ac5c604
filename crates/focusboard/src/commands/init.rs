use focusboard_core::Config;
use focusboard_store::{atomic_write, Paths};
use std::path::PathBuf;

pub fn run(force: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let written = write_default_config(&paths, force)?;

    println!("✓ Wrote default config to {}", written.display());
    println!("\nSecrets are read from the environment:");
    println!("  - FOCUSBOARD_API_TOKEN   (ingest)");
    println!("  - FOCUSBOARD_RELAY_TOKEN (send)");
    Ok(())
}

fn write_default_config(paths: &Paths, force: bool) -> anyhow::Result<PathBuf> {
    let config_path = paths.config_file();
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Re-run with --force to overwrite it.",
            config_path.display()
        );
    }

    let json = serde_json::to_string_pretty(&Config::default())?;
    atomic_write(&config_path, json.as_bytes())?;
    Ok(config_path)
}
