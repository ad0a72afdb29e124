use std::io::Read;

use anyhow::{Context, Result, ensure};
use twenty48_engine::engine::DEFAULT_WIN_TILE;
use twenty48_engine::game::validate_win_tile;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Seed for tile spawns. Omit for a fresh game every run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Tile value that counts as a win.
    #[serde(default = "defaults::win_tile")]
    pub win_tile: u32,

    // Terminal UI settings under one nested key.
    #[serde(default)]
    pub ui: Ui,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Ui {
    /// How long to wait for a key before redrawing, in milliseconds.
    #[serde(default = "defaults::poll_ms")]
    pub poll_ms: u64,
    /// Show the key bindings under the board.
    #[serde(default = "defaults::show_help")]
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { seed: None, win_tile: defaults::win_tile(), ui: Ui::default() }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self { poll_ms: defaults::poll_ms(), show_help: defaults::show_help() }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the game cannot play with.
    pub fn validate(&self) -> Result<()> {
        validate_win_tile(self.win_tile)?;
        ensure!(self.ui.poll_ms > 0, "ui.poll_ms must be positive");
        Ok(())
    }
}

mod defaults {
    pub fn win_tile() -> u32 { super::DEFAULT_WIN_TILE }
    pub fn poll_ms() -> u64 { 100 }
    pub fn show_help() -> bool { true }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_fills_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.win_tile, 2048);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.ui.poll_ms, 100);
        assert!(cfg.ui.show_help);
    }

    #[test]
    fn it_reads_overrides() {
        let cfg = Config::from_toml_str(
            r#"
            seed = 7
            win_tile = 1024

            [ui]
            show_help = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.win_tile, 1024);
        assert!(!cfg.ui.show_help);
        assert_eq!(cfg.ui.poll_ms, 100);
    }

    #[test]
    fn it_rejects_bad_values() {
        assert!(Config::from_toml_str("win_tile = 1000").is_err());
        let err = Config::from_toml_str("win_tile = 4").unwrap_err();
        assert!(err.to_string().contains("power of two"));
        assert!(Config::from_toml_str("[ui]\npoll_ms = 0").is_err());
        assert!(Config::from_toml_str("seed = \"abc\"").is_err());
    }

    #[test]
    fn it_loads_the_example_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/twenty48.toml");
        let cfg = Config::from_toml(path).unwrap();
        assert_eq!(cfg.seed, Some(2048));
        assert_eq!(cfg.win_tile, 2048);
    }

    #[test]
    fn it_reports_missing_file() {
        let err = Config::from_toml("/nonexistent/twenty48.toml").unwrap_err();
        assert!(err.to_string().contains("failed to open config"));
    }
}
