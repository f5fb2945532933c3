//! Door candidates, spanning-tree door selection, and connectivity repair.

use log::{debug, warn};

use crate::types::{CARDINAL_OFFSETS, Pos, RoomId};

use super::grid::{Claim, Layout};
use super::seed::MapRng;
use super::union_find::UnionFind;

/// A wall cell with floor of two different rooms on its orthogonal sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct DoorCandidate {
    pub(super) pos: Pos,
    pub(super) room_a: RoomId,
    pub(super) room_b: RoomId,
    /// Distinct rooms touching the cell orthogonally.
    pub(super) bordering: usize,
}

impl DoorCandidate {
    /// A cell touching three or more rooms would join rooms that the door
    /// record does not name, so such cells never become doors.
    fn is_unambiguous(&self) -> bool {
        self.bordering == 2
    }
}

/// One candidate per unordered pair of rooms around every wall cell.
pub(super) fn collect_candidates(layout: &Layout) -> Vec<DoorCandidate> {
    let mut candidates = Vec::new();
    for pos in layout.cells() {
        if !layout.is_wall(pos) {
            continue;
        }
        let rooms = layout.cardinal_rooms(pos);
        if rooms.len() < 2 {
            continue;
        }
        for (i, &room_a) in rooms.iter().enumerate() {
            for &room_b in &rooms[i + 1..] {
                candidates.push(DoorCandidate { pos, room_a, room_b, bordering: rooms.len() });
            }
        }
    }
    candidates
}

/// Shuffles the candidates and accepts doors until every room shares one
/// component, then rolls for a single extra door that closes a cycle.
pub(super) fn place_doors(layout: &mut Layout, rng: &mut MapRng, extra_door_chance: f32) {
    let mut candidates = collect_candidates(layout);
    rng.shuffle(&mut candidates);
    debug!("collected {} door candidates", candidates.len());

    let mut components = UnionFind::new(layout.rooms.keys());
    for candidate in &candidates {
        if components.set_count() <= 1 {
            break;
        }
        if !candidate.is_unambiguous() || !layout.is_wall(candidate.pos) {
            continue;
        }
        if components.union(candidate.room_a, candidate.room_b) {
            layout.accept_door(candidate.pos, candidate.room_a, candidate.room_b);
        }
    }

    let bridges = bridge_components(layout, &mut components);
    if bridges > 0 {
        debug!("bridged {bridges} isolated components");
    }

    if rng.chance(extra_door_chance) {
        add_extra_door(layout, rng);
    }
    debug!("accepted {} doors for {} rooms", layout.doors.len(), layout.rooms.len());
}

fn add_extra_door(layout: &mut Layout, rng: &mut MapRng) {
    let remaining: Vec<DoorCandidate> =
        collect_candidates(layout).into_iter().filter(DoorCandidate::is_unambiguous).collect();
    if remaining.is_empty() {
        debug!("extra door rolled but no unused candidate remains");
        return;
    }
    let extra = remaining[rng.below(remaining.len())];
    layout.accept_door(extra.pos, extra.room_a, extra.room_b);
}

/// A straight run of walls from an edge cell of `from` to floor of `to`. All
/// but the last wall are folded into `from`; the last becomes the door.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Bridge {
    from: RoomId,
    to: RoomId,
    folded: Vec<Pos>,
    door: Pos,
}

/// Joins components the candidate set could not connect, shortest bridge
/// first. Returns how many bridges were built.
fn bridge_components(layout: &mut Layout, components: &mut UnionFind<RoomId>) -> usize {
    let mut built = 0;
    while components.set_count() > 1 {
        let Some(bridge) = shortest_bridge(layout, components) else {
            warn!("{} room components remain unconnected", components.set_count());
            break;
        };
        for &pos in &bridge.folded {
            layout.fold_into_room(pos, bridge.from);
        }
        layout.accept_door(bridge.door, bridge.from, bridge.to);
        components.union(bridge.from, bridge.to);
        let (width, height) = (layout.width, layout.height);
        layout.rooms[bridge.from].refresh_edges(width, height);
        built += 1;
    }
    built
}

fn shortest_bridge(layout: &Layout, components: &mut UnionFind<RoomId>) -> Option<Bridge> {
    let mut best: Option<Bridge> = None;
    for (room, data) in &layout.rooms {
        for &edge in &data.edge_coords {
            for (dx, dy) in CARDINAL_OFFSETS {
                let Some(bridge) = trace_bridge(layout, room, edge, (dx, dy)) else {
                    continue;
                };
                if components.connected(room, bridge.to) {
                    continue;
                }
                if best.as_ref().is_none_or(|current| bridge.folded.len() < current.folded.len()) {
                    best = Some(bridge);
                }
            }
        }
    }
    best
}

fn trace_bridge(layout: &Layout, from: RoomId, edge: Pos, (dx, dy): (i32, i32)) -> Option<Bridge> {
    let mut walls = Vec::new();
    let mut cursor = edge.offset(dx, dy);
    let to = loop {
        match layout.claim(cursor)? {
            Claim::Wall => walls.push(cursor),
            Claim::Floor(room) if room != from && !walls.is_empty() => break room,
            Claim::Floor(_) | Claim::Open | Claim::Door => return None,
        }
        cursor = cursor.offset(dx, dy);
    };

    let door = walls.pop()?;
    let sides = |pos: Pos| [pos.offset(dy, dx), pos.offset(-dy, -dx)];
    for &pos in &walls {
        for side in sides(pos) {
            match layout.claim(side) {
                Some(Claim::Door) => return None,
                Some(Claim::Floor(room)) if room != from => return None,
                _ => {}
            }
        }
    }
    for side in sides(door) {
        if let Some(Claim::Floor(room)) = layout.claim(side)
            && room != from
            && room != to
        {
            return None;
        }
    }
    Some(Bridge { from, to, folded: walls, door })
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;

    use super::*;
    use crate::mapgen::model::Room;

    fn paint_room(layout: &mut Layout, xs: RangeInclusive<i32>, ys: RangeInclusive<i32>) -> RoomId {
        let start = Pos::new(*xs.start(), *ys.start());
        let room = layout.rooms.insert(Room::new(start));
        for y in ys {
            for x in xs.clone() {
                layout.set_claim(Pos::new(x, y), Claim::Floor(room));
                layout.rooms[room].coords.insert(Pos::new(x, y));
            }
        }
        room
    }

    fn wall_column(layout: &mut Layout, x: i32, ys: RangeInclusive<i32>) {
        for y in ys {
            layout.set_claim(Pos::new(x, y), Claim::Wall);
        }
    }

    #[test]
    fn candidates_cover_each_pair_around_a_wall() {
        let mut layout = Layout::new(9, 5);
        let west = paint_room(&mut layout, 1..=3, 1..=3);
        let east = paint_room(&mut layout, 5..=7, 1..=3);
        wall_column(&mut layout, 4, 1..=3);

        let candidates = collect_candidates(&layout);
        assert_eq!(candidates.len(), 3);
        for candidate in candidates {
            assert_eq!(candidate.pos.x, 4);
            assert_eq!((candidate.room_a, candidate.room_b), (west, east));
            assert!(candidate.is_unambiguous());
        }
    }

    #[test]
    fn two_rooms_get_exactly_one_door() {
        let mut layout = Layout::new(9, 5);
        paint_room(&mut layout, 1..=3, 1..=3);
        paint_room(&mut layout, 5..=7, 1..=3);
        wall_column(&mut layout, 4, 1..=3);

        place_doors(&mut layout, &mut MapRng::new(3), 0.0);
        assert_eq!(layout.doors.len(), 1);
        assert_eq!(layout.doors[0].pos.x, 4);
    }

    #[test]
    fn guaranteed_extra_door_adds_a_second_opening() {
        let mut layout = Layout::new(9, 5);
        paint_room(&mut layout, 1..=3, 1..=3);
        paint_room(&mut layout, 5..=7, 1..=3);
        wall_column(&mut layout, 4, 1..=3);

        place_doors(&mut layout, &mut MapRng::new(3), 1.0);
        assert_eq!(layout.doors.len(), 2);
        assert_ne!(layout.doors[0].pos, layout.doors[1].pos);
    }

    #[test]
    fn extra_door_without_candidates_is_a_no_op() {
        let mut layout = Layout::new(6, 6);
        paint_room(&mut layout, 1..=4, 1..=4);

        place_doors(&mut layout, &mut MapRng::new(11), 1.0);
        assert!(layout.doors.is_empty());
    }

    #[test]
    fn double_wall_gap_is_bridged() {
        let mut layout = Layout::new(10, 5);
        let west = paint_room(&mut layout, 1..=3, 1..=3);
        let east = paint_room(&mut layout, 6..=8, 1..=3);
        wall_column(&mut layout, 4, 1..=3);
        wall_column(&mut layout, 5, 1..=3);
        layout.refresh_edges();

        place_doors(&mut layout, &mut MapRng::new(8), 0.0);

        assert_eq!(layout.doors.len(), 1);
        let door = layout.doors[0];
        assert_eq!((door.room_a, door.room_b), (west, east));
        assert_eq!(door.pos.x, 5);
        assert_eq!(layout.floor_owner(Pos::new(4, door.pos.y)), Some(west));
    }
}
