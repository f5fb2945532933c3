//! Explicit context value bundling a dungeon with its room graph.

use crate::config::{ConfigError, GenerationConfig};
use crate::mapgen;
use crate::pathfinding::{DoorPolicy, HierarchicalPathfinder, LocalGridPathfinder};
use crate::state::Dungeon;
use crate::types::{Pos, WorldPos};

#[derive(Clone, Debug)]
pub struct World {
    dungeon: Dungeon,
    hierarchical: HierarchicalPathfinder,
}

impl World {
    pub fn generate(config: GenerationConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_dungeon(mapgen::generate(config, seed)?))
    }

    pub fn from_dungeon(dungeon: Dungeon) -> Self {
        let hierarchical = HierarchicalPathfinder::new(&dungeon);
        Self { dungeon, hierarchical }
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn hierarchical(&self) -> &HierarchicalPathfinder {
        &self.hierarchical
    }

    pub fn set_door_policy(&mut self, policy: DoorPolicy) {
        self.hierarchical.set_policy(policy);
    }

    pub fn toggle_door(&mut self, pos: Pos) -> Option<bool> {
        self.dungeon.toggle_door(pos)
    }

    pub fn open_all_doors(&mut self) {
        self.dungeon.open_all_doors();
    }

    /// Grid-level path that respects the current door states.
    pub fn local_path(&self, start: WorldPos, goal: WorldPos) -> Vec<WorldPos> {
        LocalGridPathfinder::new(&self.dungeon).find_path(start, goal)
    }

    /// Room-level route through door centers.
    pub fn route(&self, start: WorldPos, goal: WorldPos) -> Vec<WorldPos> {
        self.hierarchical.find_path(&self.dungeon, start, goal)
    }
}
