//! Generation pipeline: room placement, wall merging, door selection, and the
//! final freeze into a queryable `Dungeon`.

use log::info;
use slotmap::SlotMap;

use crate::config::{ConfigError, GenerationConfig};
use crate::state::Dungeon;
use crate::types::{Cell, DoorId, RoomId};

use super::doors::place_doors;
use super::grid::{Layout, cell_index};
use super::layout::place_rooms;
use super::merge::merge_double_walls;
use super::model::{Door, Room};
use super::seed::MapRng;

pub struct MapGenerator {
    config: GenerationConfig,
    seed: u64,
}

impl MapGenerator {
    pub fn new(config: GenerationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate(&self) -> Dungeon {
        let config = &self.config;
        let mut rng = MapRng::new(self.seed);
        let mut layout = Layout::new(config.width, config.height);

        place_rooms(&mut layout, &mut rng, config);
        layout.refresh_edges();
        merge_double_walls(&mut layout);
        place_doors(&mut layout, &mut rng, config.extra_door_chance);
        layout.refresh_edges();

        let dungeon = carve(layout, config.clone(), self.seed);
        info!(
            "generated {}x{} dungeon from seed {}: {} rooms, {} doors",
            dungeon.width(),
            dungeon.height(),
            self.seed,
            dungeon.room_count(),
            dungeon.door_count()
        );
        dungeon
    }
}

/// Writes the cell grid and turns every accepted door into a closed door
/// record listed by both rooms it joins.
fn carve(layout: Layout, config: GenerationConfig, seed: u64) -> Dungeon {
    let Layout { width, height, mut rooms, doors: accepted, .. } = layout;

    let mut cells = vec![Cell::Wall; width * height];
    for room in rooms.values() {
        for &pos in &room.coords {
            cells[cell_index(width, pos)] = Cell::Floor;
        }
    }

    let mut doors: SlotMap<DoorId, Door> = SlotMap::with_key();
    for accepted in accepted {
        let id = doors.insert(Door {
            pos: accepted.pos,
            room_a: accepted.room_a,
            room_b: accepted.room_b,
            is_open: false,
        });
        cells[cell_index(width, accepted.pos)] = Cell::Door(id);
        for room in rooms.values_mut() {
            room.walls.remove(&accepted.pos);
        }
        link(&mut rooms, accepted.room_a, accepted.room_b, id);
    }

    Dungeon::from_parts(config, seed, cells, rooms, doors)
}

fn link(rooms: &mut SlotMap<RoomId, Room>, room_a: RoomId, room_b: RoomId, door: DoorId) {
    rooms[room_a].doors.insert(door);
    rooms[room_b].doors.insert(door);
    rooms[room_a].neighbours.insert(room_b);
    rooms[room_b].neighbours.insert(room_a);
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::types::Pos;

    fn generate(seed: u64) -> Dungeon {
        let generator = MapGenerator::new(GenerationConfig::default(), seed);
        generator.expect("default config is valid").generate()
    }

    fn reachable_rooms(dungeon: &Dungeon) -> BTreeSet<RoomId> {
        let Some((first, _)) = dungeon.rooms().next() else {
            return BTreeSet::new();
        };
        let mut seen = BTreeSet::from([first]);
        let mut queue = VecDeque::from([first]);
        while let Some(room) = queue.pop_front() {
            for &next in dungeon.room(room).expect("room exists").neighbours() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = GenerationConfig { width: 2, ..GenerationConfig::default() };
        assert!(matches!(
            MapGenerator::new(config, 1),
            Err(ConfigError::GridTooSmall { width: 2, height: 50 })
        ));
    }

    #[test]
    fn same_seed_produces_byte_identical_dungeons() {
        let a = generate(123_456);
        let b = generate(123_456);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn different_seeds_change_the_layout() {
        assert_ne!(generate(1).canonical_bytes(), generate(2).canonical_bytes());
    }

    #[test]
    fn default_generation_yields_a_door_tree() {
        let dungeon = generate(7);
        assert!(dungeon.room_count() > 1);
        assert_eq!(dungeon.door_count(), dungeon.room_count() - 1);
        for (id, room) in dungeon.rooms() {
            assert!(!room.doors().is_empty(), "room {id:?} has no door");
        }
    }

    #[test]
    fn every_door_sits_between_its_two_rooms() {
        let dungeon = generate(99);
        for (_, door) in dungeon.doors() {
            let (a, b) = door.rooms();
            assert_ne!(a, b);
            let owners: BTreeSet<RoomId> = door
                .pos()
                .cardinal_neighbors()
                .into_iter()
                .filter_map(|pos| dungeon.room_at_cell(pos))
                .collect();
            assert_eq!(owners, BTreeSet::from([a, b]));
            assert!(!door.is_open());
        }
    }

    #[test]
    fn border_stays_wall() {
        let dungeon = generate(5);
        let (w, h) = (dungeon.width() as i32, dungeon.height() as i32);
        for x in 0..w {
            assert_eq!(dungeon.cell_at(Pos::new(x, 0)), Some(Cell::Wall));
            assert_eq!(dungeon.cell_at(Pos::new(x, h - 1)), Some(Cell::Wall));
        }
        for y in 0..h {
            assert_eq!(dungeon.cell_at(Pos::new(0, y)), Some(Cell::Wall));
            assert_eq!(dungeon.cell_at(Pos::new(w - 1, y)), Some(Cell::Wall));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn rooms_are_disjoint_and_connected(seed in any::<u64>(), chance in 0.0_f32..=1.0) {
            let config = GenerationConfig {
                width: 30,
                height: 24,
                extra_door_chance: chance,
                ..GenerationConfig::default()
            };
            let dungeon = MapGenerator::new(config, seed).expect("valid config").generate();

            let mut floor = BTreeSet::new();
            for (id, room) in dungeon.rooms() {
                prop_assert!(room.coords().contains(&room.start()));
                for &pos in room.coords() {
                    prop_assert!(floor.insert(pos), "{:?} is floor of two rooms", pos);
                    prop_assert_eq!(dungeon.room_at_cell(pos), Some(id));
                }
                for door in room.doors() {
                    prop_assert!(dungeon.door(*door).is_some_and(|d| d.connects(id)));
                }
                prop_assert!(room.edge_coords().is_subset(room.coords()));
            }
            prop_assert_eq!(reachable_rooms(&dungeon).len(), dungeon.room_count());
            prop_assert!(dungeon.door_count() + 1 >= dungeon.room_count());
            prop_assert!(dungeon.door_count() <= dungeon.room_count());
        }
    }
}
