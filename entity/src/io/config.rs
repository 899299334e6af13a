//! Defaults for entity creation stored in `entity.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::profile::Tier;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "entity.toml";

/// Entity creation defaults (TOML).
///
/// Every field is optional in the file; command-line flags take precedence.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EntityConfig {
    /// Tier used when `--tier` is not given (1 or 2).
    pub default_tier: u8,

    /// Objectives used when `--objectives` is not given.
    pub default_objectives: Vec<String>,

    /// Directory entities are created under; the working directory if unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            default_tier: 2,
            default_objectives: vec![
                "Complete assigned tasks".to_string(),
                "Maintain quality standards".to_string(),
            ],
            output_dir: None,
        }
    }
}

impl EntityConfig {
    pub fn validate(&self) -> Result<()> {
        Tier::try_from(self.default_tier)
            .map_err(|err| anyhow!("default_tier: {}", err.reason))?;
        if self.default_objectives.iter().all(|obj| obj.trim().is_empty()) {
            return Err(anyhow!("default_objectives must contain a non-blank entry"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EntityConfig::default()`.
pub fn load_config(path: &Path) -> Result<EntityConfig> {
    if !path.exists() {
        return Ok(EntityConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: EntityConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Load an explicitly requested config (which must exist) or `entity.toml` in `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<EntityConfig> {
    match explicit {
        Some(path) if !path.exists() => Err(anyhow!("config {} not found", path.display())),
        Some(path) => load_config(path),
        None => load_config(&cwd.join(DEFAULT_CONFIG_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, EntityConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("entity.toml");
        fs::write(&path, "default_tier = 1\noutput_dir = \"entities\"\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.default_tier, 1);
        assert_eq!(cfg.output_dir, Some(PathBuf::from("entities")));
        assert_eq!(
            cfg.default_objectives,
            EntityConfig::default().default_objectives
        );
    }

    #[test]
    fn invalid_tier_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("entity.toml");
        fs::write(&path, "default_tier = 5\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("default_tier"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), temp.path()).is_err());
        assert_eq!(
            resolve_config(None, temp.path()).expect("implicit"),
            EntityConfig::default()
        );
    }

    #[test]
    fn implicit_config_is_read_from_working_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "default_objectives = [\"Ship\"]\n",
        )
        .expect("write");
        let cfg = resolve_config(None, temp.path()).expect("load");
        assert_eq!(cfg.default_objectives, vec!["Ship"]);
    }
}
