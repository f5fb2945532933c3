//! Collapses two-cell-thick walls between neighbouring rooms.

use std::collections::BTreeSet;

use log::debug;

use crate::types::{CARDINAL_OFFSETS, Pos, RoomId};

use super::grid::Layout;

/// For every edge cell, looks along each cardinal direction for a wall backed
/// by a second wall. When the first wall touches no room other than this one
/// it is folded into the room as floor. Only the first doubled direction of an
/// edge cell is considered. Edge sets are refreshed afterwards.
pub(super) fn merge_double_walls(layout: &mut Layout) -> usize {
    let mut merged = 0;
    let room_ids: Vec<RoomId> = layout.rooms.keys().collect();

    for room in room_ids {
        let edges: Vec<Pos> = layout.rooms[room].edge_coords.iter().copied().collect();
        for edge in edges {
            for (dx, dy) in CARDINAL_OFFSETS {
                let single = edge.offset(dx, dy);
                let double = edge.offset(dx * 2, dy * 2);
                if !(layout.is_wall(single) && layout.is_wall(double)) {
                    continue;
                }
                if touching_rooms(layout, single) == BTreeSet::from([room]) {
                    layout.fold_into_room(single, room);
                    merged += 1;
                }
                break;
            }
        }
    }

    layout.refresh_edges();
    debug!("merged {merged} double-wall cells into rooms");
    merged
}

fn touching_rooms(layout: &Layout, pos: Pos) -> BTreeSet<RoomId> {
    pos.surrounding().into_iter().filter_map(|neighbour| layout.floor_owner(neighbour)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::Claim;
    use crate::mapgen::model::Room;

    /// Two rooms in a 10x5 grid with a double wall at columns 4 and 5.
    fn double_wall_fixture() -> (Layout, RoomId, RoomId) {
        let mut layout = Layout::new(10, 5);
        let west = layout.rooms.insert(Room::new(Pos::new(1, 1)));
        let east = layout.rooms.insert(Room::new(Pos::new(6, 1)));
        for y in 1..=3 {
            for x in 1..=3 {
                let pos = Pos::new(x, y);
                layout.set_claim(pos, Claim::Floor(west));
                layout.rooms[west].coords.insert(pos);
            }
            for x in 6..=8 {
                let pos = Pos::new(x, y);
                layout.set_claim(pos, Claim::Floor(east));
                layout.rooms[east].coords.insert(pos);
            }
            layout.set_claim(Pos::new(4, y), Claim::Wall);
            layout.rooms[west].walls.insert(Pos::new(4, y));
            layout.set_claim(Pos::new(5, y), Claim::Wall);
            layout.rooms[east].walls.insert(Pos::new(5, y));
        }
        layout.refresh_edges();
        (layout, west, east)
    }

    #[test]
    fn first_room_absorbs_its_side_of_a_double_wall() {
        let (mut layout, west, east) = double_wall_fixture();

        let merged = merge_double_walls(&mut layout);

        assert_eq!(merged, 3);
        for y in 1..=3 {
            let folded = Pos::new(4, y);
            assert_eq!(layout.floor_owner(folded), Some(west));
            assert!(!layout.rooms[west].walls.contains(&folded));
            assert!(layout.is_wall(Pos::new(5, y)), "the second wall stays");
            assert!(layout.rooms[west].walls.contains(&Pos::new(5, y)));
        }
        assert_eq!(layout.rooms[east].area(), 9);
        assert!(layout.rooms[west].edge_coords.contains(&Pos::new(4, 2)));
    }

    #[test]
    fn wall_touching_two_rooms_is_never_folded() {
        let mut layout = Layout::new(9, 5);
        let west = layout.rooms.insert(Room::new(Pos::new(1, 1)));
        let east = layout.rooms.insert(Room::new(Pos::new(5, 1)));
        for y in 1..=3 {
            for x in 1..=3 {
                layout.set_claim(Pos::new(x, y), Claim::Floor(west));
                layout.rooms[west].coords.insert(Pos::new(x, y));
            }
            for x in 5..=7 {
                layout.set_claim(Pos::new(x, y), Claim::Floor(east));
                layout.rooms[east].coords.insert(Pos::new(x, y));
            }
            layout.set_claim(Pos::new(4, y), Claim::Wall);
        }
        layout.refresh_edges();

        assert_eq!(merge_double_walls(&mut layout), 0);
        assert!((1..=3).all(|y| layout.is_wall(Pos::new(4, y))));
    }
}
