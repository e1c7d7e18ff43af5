//! Engine configuration discovery.
//!
//! Sources, first hit wins:
//! 1. `--config <path>` (must exist)
//! 2. `./.flatearth/config.toml`
//! 3. `<user config dir>/flatearth/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result, bail};
use flatearth_engine::EngineConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_CONFIG: &str = ".flatearth/config.toml";
const USER_CONFIG: &str = "flatearth/config.toml";

/// Load the effective engine configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    load_config_from(explicit, &cwd, dirs::config_dir().as_deref())
}

fn load_config_from(
    explicit: Option<&Path>,
    project_root: &Path,
    user_config_dir: Option<&Path>,
) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return parse_file(path);
    }

    let candidates: Vec<PathBuf> = std::iter::once(project_root.join(PROJECT_CONFIG))
        .chain(user_config_dir.map(|dir| dir.join(USER_CONFIG)))
        .collect();

    match candidates.iter().find(|path| path.exists()) {
        Some(path) => parse_file(path),
        None => {
            debug!("no config file found, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn parse_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}
