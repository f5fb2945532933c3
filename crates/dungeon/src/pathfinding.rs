//! Two-tier navigation: a door graph for room-to-room routes and grid A* for
//! the cell-by-cell walk between waypoints.

mod hierarchical;
mod local;
mod room_graph;

pub use hierarchical::{DoorPolicy, HierarchicalPathfinder};
pub use local::LocalGridPathfinder;
pub use room_graph::{Cluster, DoorNode, GraphEdge, RoomGraph};

use crate::types::Pos;

pub(crate) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let (a, b) = (Pos::new(2, 9), Pos::new(-3, 4));
        assert_eq!(manhattan(a, b), 10);
        assert_eq!(manhattan(b, a), 10);
        assert_eq!(manhattan(a, a), 0);
    }
}
