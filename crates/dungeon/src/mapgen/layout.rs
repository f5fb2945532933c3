//! Greedy room placement and wall halos.

use std::collections::BTreeSet;

use log::debug;

use crate::config::GenerationConfig;
use crate::types::{Pos, RoomId};

use super::grid::{Claim, Layout};
use super::model::Room;
use super::seed::MapRng;

/// Fills the interior with rooms until no open cell remains. Each room grows
/// from the first open cell in row-major order, takes the unclaimed cells of a
/// random rectangle anchored there, then claims its surrounding ring as walls.
/// Rectangle cells cut off from the origin by earlier claims stay open for
/// later rooms, so shapes can differ from a fill of every unclaimed cell.
pub(super) fn place_rooms(layout: &mut Layout, rng: &mut MapRng, config: &GenerationConfig) {
    let mut open: BTreeSet<Pos> = layout.open_interior().collect();

    while let Some(origin) = open.pop_first() {
        let room_width = rng.range_inclusive(config.min_room_width, config.max_room_width);
        let room_height = rng.range_inclusive(config.min_room_height, config.max_room_height);

        let room = layout.rooms.insert(Room::new(origin));
        layout.set_claim(origin, Claim::Floor(room));
        expand_room(layout, &mut open, room, origin, room_width, room_height);
        build_wall_halo(layout, &mut open, room);
    }

    debug!("placed {} rooms on a {}x{} grid", layout.rooms.len(), layout.width, layout.height);
}

fn expand_room(
    layout: &mut Layout,
    open: &mut BTreeSet<Pos>,
    room: RoomId,
    origin: Pos,
    room_width: usize,
    room_height: usize,
) {
    for dy in 0..room_height as i32 {
        for dx in 0..room_width as i32 {
            let pos = origin.offset(dx, dy);
            if !layout.is_open(pos) || !touches_room(layout, pos, room) {
                continue;
            }
            layout.set_claim(pos, Claim::Floor(room));
            layout.rooms[room].coords.insert(pos);
            open.remove(&pos);
        }
    }
}

/// Rectangle cells are visited row by row, so a cell joins the room only when
/// the cell to its left or above already did. Keeps every room contiguous.
fn touches_room(layout: &Layout, pos: Pos, room: RoomId) -> bool {
    [pos.offset(-1, 0), pos.offset(0, -1)]
        .into_iter()
        .any(|neighbour| layout.floor_owner(neighbour) == Some(room))
}

fn build_wall_halo(layout: &mut Layout, open: &mut BTreeSet<Pos>, room: RoomId) {
    let floor: Vec<Pos> = layout.rooms[room].coords.iter().copied().collect();
    for pos in floor {
        for neighbour in pos.surrounding() {
            if !layout.is_open(neighbour) {
                continue;
            }
            layout.set_claim(neighbour, Claim::Wall);
            layout.rooms[room].walls.insert(neighbour);
            open.remove(&neighbour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: usize, height: usize, room: (usize, usize)) -> GenerationConfig {
        GenerationConfig {
            width,
            height,
            min_room_width: room.0,
            max_room_width: room.0,
            min_room_height: room.1,
            max_room_height: room.1,
            extra_door_chance: 0.0,
        }
    }

    #[test]
    fn room_covering_the_interior_leaves_no_walls_to_claim() {
        let mut layout = Layout::new(6, 6);
        place_rooms(&mut layout, &mut MapRng::new(1), &config(6, 6, (4, 4)));

        assert_eq!(layout.rooms.len(), 1);
        let room = layout.rooms.values().next().expect("one room");
        assert_eq!(room.area(), 16);
        assert!(room.walls.is_empty(), "the border is never claimed by a room");
    }

    #[test]
    fn halo_separates_consecutive_rooms() {
        let mut layout = Layout::new(9, 5);
        place_rooms(&mut layout, &mut MapRng::new(5), &config(9, 5, (3, 3)));

        assert_eq!(layout.rooms.len(), 2);
        for y in 1..=3 {
            assert!(layout.is_wall(Pos::new(4, y)), "column 4 should be the shared wall");
        }
        assert_eq!(layout.open_interior().count(), 0);
    }

    #[test]
    fn every_interior_cell_is_claimed_and_rooms_never_overlap() {
        let mut layout = Layout::new(30, 20);
        place_rooms(&mut layout, &mut MapRng::new(42), &GenerationConfig {
            width: 30,
            height: 20,
            ..GenerationConfig::default()
        });

        assert_eq!(layout.open_interior().count(), 0);
        let mut seen = BTreeSet::new();
        for room in layout.rooms.values() {
            for &pos in &room.coords {
                assert!(seen.insert(pos), "{pos:?} claimed by two rooms");
            }
        }
    }

    #[test]
    fn blocked_rectangles_still_grow_contiguous_rooms() {
        let mut layout = Layout::new(40, 30);
        place_rooms(&mut layout, &mut MapRng::new(9), &GenerationConfig {
            width: 40,
            height: 30,
            min_room_width: 1,
            max_room_width: 12,
            min_room_height: 1,
            max_room_height: 4,
            extra_door_chance: 0.0,
        });

        for room in layout.rooms.values() {
            let mut reached = BTreeSet::from([room.start]);
            let mut frontier = vec![room.start];
            while let Some(pos) = frontier.pop() {
                for next in pos.cardinal_neighbors() {
                    if room.coords.contains(&next) && reached.insert(next) {
                        frontier.push(next);
                    }
                }
            }
            assert_eq!(reached, room.coords);
        }
    }
}
