//! Procedural dungeon generation split into coherent submodules.

pub mod model;

mod doors;
mod generator;
mod grid;
mod layout;
mod merge;
mod seed;
mod union_find;

pub use generator::MapGenerator;
pub use model::{Door, Room};

pub(crate) use grid::{cell_index, in_bounds};

use crate::config::{ConfigError, GenerationConfig};
use crate::state::Dungeon;

pub fn generate(config: GenerationConfig, seed: u64) -> Result<Dungeon, ConfigError> {
    Ok(MapGenerator::new(config, seed)?.generate())
}
