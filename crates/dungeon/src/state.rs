//! The generated dungeon: cell grid, room and door arenas, and the queries the
//! renderer, AI and movement code run against them.

use std::collections::{BTreeSet, VecDeque};

use slotmap::{SecondaryMap, SlotMap};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::GenerationConfig;
use crate::mapgen::{Door, Room, cell_index, in_bounds};
use crate::types::{Cell, DoorId, Pos, RoomId, WorldPos};

#[derive(Clone, Debug)]
pub struct Dungeon {
    config: GenerationConfig,
    seed: u64,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    rooms: SlotMap<RoomId, Room>,
    doors: SlotMap<DoorId, Door>,
    /// Owning room of every Floor, Wall and Door cell that has one.
    owners: Vec<Option<RoomId>>,
}

impl Dungeon {
    pub(crate) fn from_parts(
        config: GenerationConfig,
        seed: u64,
        cells: Vec<Cell>,
        rooms: SlotMap<RoomId, Room>,
        doors: SlotMap<DoorId, Door>,
    ) -> Self {
        let (width, height) = (config.width, config.height);
        debug_assert_eq!(cells.len(), width * height);

        let mut owners = vec![None; cells.len()];
        for (id, room) in &rooms {
            for &pos in &room.coords {
                owners[cell_index(width, pos)] = Some(id);
            }
            for &pos in &room.walls {
                let owner = &mut owners[cell_index(width, pos)];
                if owner.is_none() {
                    *owner = Some(id);
                }
            }
        }
        for door in doors.values() {
            owners[cell_index(width, door.pos)] = Some(door.room_a);
        }

        Self { config, seed, width, height, cells, rooms, doors, owners }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn is_within_grid(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        self.is_within_grid(pos).then(|| self.cells[cell_index(self.width, pos)])
    }

    /// Floor, or a door that is currently open.
    pub fn is_walkable_cell(&self, pos: Pos) -> bool {
        match self.cell_at(pos) {
            Some(Cell::Floor) => true,
            Some(Cell::Door(id)) => self.doors[id].is_open,
            Some(Cell::Wall) | None => false,
        }
    }

    pub fn is_walkable(&self, world: WorldPos) -> bool {
        self.is_walkable_cell(Pos::from_world(world))
    }

    /// Room whose floor contains `world`. Walls and doors resolve to none.
    pub fn room_at(&self, world: WorldPos) -> Option<RoomId> {
        self.room_at_cell(Pos::from_world(world))
    }

    pub fn room_at_cell(&self, pos: Pos) -> Option<RoomId> {
        match self.cell_at(pos)? {
            Cell::Floor => self.owners[cell_index(self.width, pos)],
            Cell::Wall | Cell::Door(_) => None,
        }
    }

    /// Room owning any cell: its floor, a wall in its halo, or a door it lists
    /// first. Border walls have no owner.
    pub fn owner_at(&self, pos: Pos) -> Option<RoomId> {
        self.is_within_grid(pos).then(|| self.owners[cell_index(self.width, pos)]).flatten()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id)
    }

    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &Door)> {
        self.doors.iter()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    pub fn door_at(&self, pos: Pos) -> Option<DoorId> {
        match self.cell_at(pos)? {
            Cell::Door(id) => Some(id),
            Cell::Floor | Cell::Wall => None,
        }
    }

    /// Returns false when `id` names no door.
    pub fn set_door_open(&mut self, id: DoorId, open: bool) -> bool {
        match self.doors.get_mut(id) {
            Some(door) => {
                door.set_open(open);
                true
            }
            None => false,
        }
    }

    pub fn open_all_doors(&mut self) {
        for door in self.doors.values_mut() {
            door.set_open(true);
        }
    }

    /// Flips the door at `pos` and returns its new state, or `None` if the
    /// cell is not a door.
    pub fn toggle_door(&mut self, pos: Pos) -> Option<bool> {
        let id = self.door_at(pos)?;
        Some(self.doors[id].toggle())
    }

    /// Rooms reachable from `room` through at most `hops` doors, `room`
    /// included. Door state is ignored.
    pub fn rooms_within(&self, room: RoomId, hops: usize) -> BTreeSet<RoomId> {
        let mut seen = BTreeSet::new();
        if !self.rooms.contains_key(room) {
            return seen;
        }
        seen.insert(room);
        let mut queue = VecDeque::from([(room, 0)]);
        while let Some((current, depth)) = queue.pop_front() {
            if depth == hops {
                continue;
            }
            for &next in &self.rooms[current].neighbours {
                if seen.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        seen
    }

    /// One line per row: `#` wall, `.` floor, `+` closed door, `/` open door.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            for cell in row {
                out.push(match cell {
                    Cell::Wall => '#',
                    Cell::Floor => '.',
                    Cell::Door(id) if self.doors[*id].is_open => '/',
                    Cell::Door(_) => '+',
                });
            }
            out.push('\n');
        }
        out
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let ordinals: SecondaryMap<RoomId, u32> =
            self.rooms.keys().zip(0_u32..).collect();

        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        for (cell, owner) in self.cells.iter().zip(&self.owners) {
            bytes.push(match cell {
                Cell::Wall => 0,
                Cell::Floor => 1,
                Cell::Door(id) if self.doors[*id].is_open => 3,
                Cell::Door(_) => 2,
            });
            bytes.extend(owner.map_or(u32::MAX, |room| ordinals[room]).to_le_bytes());
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in self.rooms.values() {
            bytes.extend(room.start.y.to_le_bytes());
            bytes.extend(room.start.x.to_le_bytes());
            bytes.extend((room.coords.len() as u32).to_le_bytes());
            bytes.extend((room.walls.len() as u32).to_le_bytes());
            bytes.extend((room.doors.len() as u32).to_le_bytes());
        }

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for door in self.doors.values() {
            bytes.extend(door.pos.y.to_le_bytes());
            bytes.extend(door.pos.x.to_le_bytes());
            bytes.extend(ordinals[door.room_a].to_le_bytes());
            bytes.extend(ordinals[door.room_b].to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
