//! Argument helpers shared by the binaries.

use std::path::Path;

use anyhow::{Context, Result};
use dungeon::{GenerationConfig, WorldPos};

/// Default parameters unless a TOML file is given.
pub fn load_config(path: Option<&Path>) -> Result<GenerationConfig> {
    match path {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load generation config: {}", path.display())),
        None => Ok(GenerationConfig::default()),
    }
}

/// Parses `x,y` into a world coordinate.
pub fn parse_point(text: &str) -> Result<WorldPos, String> {
    let (x, y) = text.split_once(',').ok_or_else(|| format!("expected `x,y`, got `{text}`"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("invalid x coordinate `{x}`"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("invalid y coordinate `{y}`"))?;
    Ok(WorldPos::new(x, y))
}
