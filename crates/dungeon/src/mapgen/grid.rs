//! Cell-claim grid used while a layout is being built.

use slotmap::SlotMap;

use crate::types::{Pos, RoomId};

use super::model::Room;

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(crate) fn cell_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Claim {
    Open,
    Wall,
    Floor(RoomId),
    Door,
}

/// Generation workspace: what every cell has been claimed as, plus the room
/// arena and the doors accepted so far.
pub(super) struct Layout {
    pub(super) width: usize,
    pub(super) height: usize,
    claims: Vec<Claim>,
    pub(super) rooms: SlotMap<RoomId, Room>,
    pub(super) doors: Vec<AcceptedDoor>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct AcceptedDoor {
    pub(super) pos: Pos,
    pub(super) room_a: RoomId,
    pub(super) room_b: RoomId,
}

impl Layout {
    /// Border cells start as walls, everything else open.
    pub(super) fn new(width: usize, height: usize) -> Self {
        let mut claims = vec![Claim::Open; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    claims[y * width + x] = Claim::Wall;
                }
            }
        }
        Self { width, height, claims, rooms: SlotMap::with_key(), doors: Vec::new() }
    }

    pub(super) fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    pub(super) fn claim(&self, pos: Pos) -> Option<Claim> {
        self.in_bounds(pos).then(|| self.claims[cell_index(self.width, pos)])
    }

    pub(super) fn set_claim(&mut self, pos: Pos, claim: Claim) {
        let index = cell_index(self.width, pos);
        self.claims[index] = claim;
    }

    pub(super) fn is_open(&self, pos: Pos) -> bool {
        self.claim(pos) == Some(Claim::Open)
    }

    pub(super) fn is_wall(&self, pos: Pos) -> bool {
        self.claim(pos) == Some(Claim::Wall)
    }

    pub(super) fn floor_owner(&self, pos: Pos) -> Option<RoomId> {
        match self.claim(pos) {
            Some(Claim::Floor(room)) => Some(room),
            _ => None,
        }
    }

    pub(super) fn open_interior(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells().filter(|&pos| self.is_open(pos))
    }

    pub(super) fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y, x }))
    }

    /// Distinct rooms whose floor touches `pos` orthogonally, in first-seen order.
    pub(super) fn cardinal_rooms(&self, pos: Pos) -> Vec<RoomId> {
        let mut rooms = Vec::with_capacity(4);
        for neighbour in pos.cardinal_neighbors() {
            if let Some(room) = self.floor_owner(neighbour)
                && !rooms.contains(&room)
            {
                rooms.push(room);
            }
        }
        rooms
    }

    /// Turns a wall into floor of `room`, moving the cell out of every wall set.
    pub(super) fn fold_into_room(&mut self, pos: Pos, room: RoomId) {
        self.set_claim(pos, Claim::Floor(room));
        for other in self.rooms.values_mut() {
            other.walls.remove(&pos);
        }
        let absorbed: Vec<Pos> =
            pos.surrounding().into_iter().filter(|&neighbour| self.is_wall(neighbour)).collect();
        let target = &mut self.rooms[room];
        target.coords.insert(pos);
        target.walls.extend(absorbed);
    }

    pub(super) fn accept_door(&mut self, pos: Pos, room_a: RoomId, room_b: RoomId) {
        self.set_claim(pos, Claim::Door);
        self.doors.push(AcceptedDoor { pos, room_a, room_b });
    }

    pub(super) fn refresh_edges(&mut self) {
        let (width, height) = (self.width, self.height);
        for room in self.rooms.values_mut() {
            room.refresh_edges(width, height);
        }
    }
}
