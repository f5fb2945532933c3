pub mod config;
pub mod mapgen;
pub mod pathfinding;
pub mod queue;
pub mod state;
pub mod types;
pub mod world;

pub use config::{ConfigError, GenerationConfig};
pub use mapgen::{Door, MapGenerator, Room};
pub use pathfinding::{DoorPolicy, HierarchicalPathfinder, LocalGridPathfinder, RoomGraph};
pub use queue::IndexedPriorityQueue;
pub use state::Dungeon;
pub use types::*;
pub use world::World;
