use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tiger_run_core::DEFAULT_MONKEY_PACE;
use tiger_run_rendering::GridPresentation;

/// Options read from the optional TOML settings file.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Tiger moves per monkey pursuit step; zero keeps the monkey still.
    pub monkey_pace: u32,
    /// Side length of a maze cell in window pixels.
    pub cell_size: f32,
    /// Whether presentation waits for the display refresh.
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monkey_pace: DEFAULT_MONKEY_PACE,
            cell_size: GridPresentation::DEFAULT_CELL_LENGTH,
            vsync: true,
        }
    }
}

impl Settings {
    /// Loads settings from `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        if !settings.cell_size.is_finite() || settings.cell_size <= 0.0 {
            bail!("cell_size must be positive (received {})", settings.cell_size);
        }
        Ok(settings)
    }
}
