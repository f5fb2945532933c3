//! Public room and door records produced by generation.

use std::collections::BTreeSet;

use crate::types::{DoorId, Pos, RoomId};

use super::grid::in_bounds;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub(crate) start: Pos,
    pub(crate) coords: BTreeSet<Pos>,
    pub(crate) edge_coords: BTreeSet<Pos>,
    pub(crate) walls: BTreeSet<Pos>,
    pub(crate) doors: BTreeSet<DoorId>,
    pub(crate) neighbours: BTreeSet<RoomId>,
}

impl Room {
    pub(crate) fn new(start: Pos) -> Self {
        Self {
            start,
            coords: BTreeSet::from([start]),
            edge_coords: BTreeSet::new(),
            walls: BTreeSet::new(),
            doors: BTreeSet::new(),
            neighbours: BTreeSet::new(),
        }
    }

    /// Cell the room grew from.
    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn coords(&self) -> &BTreeSet<Pos> {
        &self.coords
    }

    /// Floor cells with at least one of their eight neighbours outside the room.
    pub fn edge_coords(&self) -> &BTreeSet<Pos> {
        &self.edge_coords
    }

    pub fn walls(&self) -> &BTreeSet<Pos> {
        &self.walls
    }

    pub fn doors(&self) -> &BTreeSet<DoorId> {
        &self.doors
    }

    pub fn neighbours(&self) -> &BTreeSet<RoomId> {
        &self.neighbours
    }

    pub fn area(&self) -> usize {
        self.coords.len()
    }

    pub(crate) fn refresh_edges(&mut self, width: usize, height: usize) {
        let coords = &self.coords;
        self.edge_coords = coords
            .iter()
            .copied()
            .filter(|&pos| {
                pos.surrounding().into_iter().any(|neighbour| {
                    !in_bounds(width, height, neighbour) || !coords.contains(&neighbour)
                })
            })
            .collect();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Door {
    pub(crate) pos: Pos,
    pub(crate) room_a: RoomId,
    pub(crate) room_b: RoomId,
    pub(crate) is_open: bool,
}

impl Door {
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn rooms(&self) -> (RoomId, RoomId) {
        (self.room_a, self.room_b)
    }

    pub fn connects(&self, room: RoomId) -> bool {
        self.room_a == room || self.room_b == room
    }

    /// Room on the far side of the door, if `room` is one of its two sides.
    pub fn other_side(&self, room: RoomId) -> Option<RoomId> {
        if room == self.room_a {
            Some(self.room_b)
        } else if room == self.room_b {
            Some(self.room_a)
        } else {
            None
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}
