//! Abstract graph for the hierarchical tier: one cluster per room, one node
//! per door, and a clique of straight-line edges between the doors of a room.

use std::collections::BTreeMap;

use log::debug;
use slotmap::SecondaryMap;

use crate::state::Dungeon;
use crate::types::{DoorId, Pos, RoomId, WorldPos};

#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    room: RoomId,
    doors: Vec<DoorId>,
}

impl Cluster {
    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn doors(&self) -> &[DoorId] {
        &self.doors
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    pub to: DoorId,
    pub cost: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoorNode {
    door: DoorId,
    center: WorldPos,
    rooms: (RoomId, RoomId),
    edges: Vec<GraphEdge>,
}

impl DoorNode {
    pub fn door(&self) -> DoorId {
        self.door
    }

    pub fn center(&self) -> WorldPos {
        self.center
    }

    /// The two clusters sharing this node.
    pub fn rooms(&self) -> (RoomId, RoomId) {
        self.rooms
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}

/// Built once per generated layout. Door state is not part of the graph.
#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    clusters: SecondaryMap<RoomId, Cluster>,
    nodes: SecondaryMap<DoorId, DoorNode>,
    by_position: BTreeMap<Pos, DoorId>,
}

impl RoomGraph {
    pub fn build(dungeon: &Dungeon) -> Self {
        let mut graph = Self::default();

        for (id, door) in dungeon.doors() {
            graph.by_position.insert(door.pos(), id);
            graph.nodes.insert(id, DoorNode {
                door: id,
                center: door.pos().center(),
                rooms: door.rooms(),
                edges: Vec::new(),
            });
        }

        let mut edge_count = 0;
        for (room_id, room) in dungeon.rooms() {
            let doors: Vec<DoorId> = room.doors().iter().copied().collect();
            for (i, &a) in doors.iter().enumerate() {
                for &b in &doors[i + 1..] {
                    let cost = graph.nodes[a].center.distance(graph.nodes[b].center);
                    graph.connect(a, b, cost);
                    graph.connect(b, a, cost);
                    edge_count += 1;
                }
            }
            graph.clusters.insert(room_id, Cluster { room: room_id, doors });
        }

        debug!(
            "room graph: {} clusters, {} door nodes, {} edges",
            graph.clusters.len(),
            graph.nodes.len(),
            edge_count
        );
        graph
    }

    /// Doors joining the same two rooms meet in both clusters; keep one edge.
    fn connect(&mut self, from: DoorId, to: DoorId, cost: f32) {
        let edges = &mut self.nodes[from].edges;
        match edges.iter_mut().find(|edge| edge.to == to) {
            Some(edge) => edge.cost = edge.cost.min(cost),
            None => edges.push(GraphEdge { to, cost }),
        }
    }

    pub fn cluster(&self, room: RoomId) -> Option<&Cluster> {
        self.clusters.get(room)
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    pub fn node(&self, door: DoorId) -> Option<&DoorNode> {
        self.nodes.get(door)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_at(&self, pos: Pos) -> Option<&DoorNode> {
        self.by_position.get(&pos).and_then(|&door| self.nodes.get(door))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::mapgen::generate;

    #[test]
    fn every_door_of_a_room_links_to_every_other() {
        let config = GenerationConfig { extra_door_chance: 1.0, ..GenerationConfig::default() };
        let dungeon = generate(config, 31).expect("valid config");
        let graph = RoomGraph::build(&dungeon);

        assert_eq!(graph.clusters().count(), dungeon.room_count());
        assert_eq!(graph.node_count(), dungeon.door_count());
        for cluster in graph.clusters() {
            for &a in cluster.doors() {
                for &b in cluster.doors() {
                    if a == b {
                        continue;
                    }
                    let (from, to) = (graph.node(a).expect("node"), graph.node(b).expect("node"));
                    let expected = from.center().distance(to.center());
                    let edge = from.edges().iter().find(|edge| edge.to == b);
                    assert!(edge.is_some_and(|edge| (edge.cost - expected).abs() < 1e-4));
                }
            }
        }
    }

    #[test]
    fn nodes_are_indexed_by_door_cell() {
        let dungeon = generate(GenerationConfig::default(), 8).expect("valid config");
        let graph = RoomGraph::build(&dungeon);
        for (id, door) in dungeon.doors() {
            let node = graph.node_at(door.pos()).expect("door node");
            assert_eq!(node.door(), id);
            assert_eq!(node.center(), door.pos().center());
            assert_eq!(node.rooms(), door.rooms());
            assert!(graph.cluster(door.rooms().0).is_some_and(|c| c.doors().contains(&id)));
            assert!(graph.cluster(door.rooms().1).is_some_and(|c| c.doors().contains(&id)));
        }
        assert!(graph.node_at(Pos::new(0, 0)).is_none());
    }
}
