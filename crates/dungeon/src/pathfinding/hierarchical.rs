//! Room-level A* over the door graph, with per-query start and goal nodes.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::queue::IndexedPriorityQueue;
use crate::state::Dungeon;
use crate::types::{DoorId, Pos, RoomId, WorldPos};

use super::room_graph::RoomGraph;

/// Whether door state prunes the abstract graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoorPolicy {
    /// Plan over the static topology; closed doors are left to the local tier.
    #[default]
    IgnoreState,
    /// Skip door nodes whose door is currently closed.
    OpenOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SearchNode {
    Start,
    Goal,
    Door(DoorId),
}

/// Where a query endpoint sits: on a room's floor or inside a doorway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Room(RoomId),
    Door(DoorId),
}

/// The transient part of one query: endpoint positions and their links into
/// the door graph. Dropped when the query returns.
struct Query<'g> {
    graph: &'g RoomGraph,
    dungeon: &'g Dungeon,
    policy: DoorPolicy,
    start: WorldPos,
    goal: WorldPos,
    start_links: Vec<DoorId>,
    goal_links: HashSet<DoorId>,
    direct: bool,
}

impl Query<'_> {
    fn position(&self, node: SearchNode) -> WorldPos {
        match node {
            SearchNode::Start => self.start,
            SearchNode::Goal => self.goal,
            SearchNode::Door(door) => self.graph.node(door).expect("door node must exist").center(),
        }
    }

    fn successors(&self, node: SearchNode) -> Vec<SearchNode> {
        let mut next = Vec::new();
        match node {
            SearchNode::Start => {
                next.extend(self.start_links.iter().map(|&door| SearchNode::Door(door)));
                if self.direct {
                    next.push(SearchNode::Goal);
                }
            }
            SearchNode::Door(door) => {
                if let Some(node) = self.graph.node(door) {
                    next.extend(
                        node.edges()
                            .iter()
                            .filter(|edge| passable(self.policy, self.dungeon, edge.to))
                            .map(|edge| SearchNode::Door(edge.to)),
                    );
                }
                if self.goal_links.contains(&door) {
                    next.push(SearchNode::Goal);
                }
            }
            SearchNode::Goal => {}
        }
        next
    }
}

#[derive(Clone, Debug)]
pub struct HierarchicalPathfinder {
    graph: RoomGraph,
    policy: DoorPolicy,
}

impl HierarchicalPathfinder {
    pub fn new(dungeon: &Dungeon) -> Self {
        Self::with_policy(dungeon, DoorPolicy::default())
    }

    pub fn with_policy(dungeon: &Dungeon, policy: DoorPolicy) -> Self {
        Self { graph: RoomGraph::build(dungeon), policy }
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn policy(&self) -> DoorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DoorPolicy) {
        self.policy = policy;
    }

    /// Waypoints `[start, door centers.., goal]`, or empty when either end is
    /// outside every room, sits in a doorway this graph does not know, or no
    /// door route exists. An endpoint at a door center is not repeated.
    ///
    /// Costs are straight-line distances inside rooms with no obstruction
    /// test, so irregular rooms can make a route look shorter than it walks.
    pub fn find_path(&self, dungeon: &Dungeon, start: WorldPos, goal: WorldPos) -> Vec<WorldPos> {
        let (Some(start_anchor), Some(goal_anchor)) =
            (anchor(dungeon, start), anchor(dungeon, goal))
        else {
            return Vec::new();
        };
        if !self.knows(start_anchor) || !self.knows(goal_anchor) {
            return Vec::new();
        }

        let query = Query {
            graph: &self.graph,
            dungeon,
            policy: self.policy,
            start,
            goal,
            start_links: self.links(dungeon, start_anchor),
            goal_links: self.links(dungeon, goal_anchor).into_iter().collect(),
            direct: share_room(dungeon, start_anchor, goal_anchor),
        };
        search(&query)
    }

    /// Doorway anchors must name a door node of this graph. Queries against a
    /// dungeon the graph was not built from can fail this.
    fn knows(&self, anchor: Anchor) -> bool {
        match anchor {
            Anchor::Room(_) => true,
            Anchor::Door(door) => self.graph.node(door).is_some(),
        }
    }

    fn links(&self, dungeon: &Dungeon, anchor: Anchor) -> Vec<DoorId> {
        match anchor {
            Anchor::Door(door) => vec![door],
            Anchor::Room(room) => self
                .graph
                .cluster(room)
                .map(|cluster| cluster.doors().to_vec())
                .unwrap_or_default()
                .into_iter()
                .filter(|&door| passable(self.policy, dungeon, door))
                .collect(),
        }
    }
}

fn passable(policy: DoorPolicy, dungeon: &Dungeon, door: DoorId) -> bool {
    match policy {
        DoorPolicy::IgnoreState => true,
        DoorPolicy::OpenOnly => dungeon.door(door).is_some_and(|door| door.is_open()),
    }
}

fn anchor(dungeon: &Dungeon, world: WorldPos) -> Option<Anchor> {
    let cell = Pos::from_world(world);
    if let Some(room) = dungeon.room_at_cell(cell) {
        return Some(Anchor::Room(room));
    }
    dungeon.door_at(cell).map(Anchor::Door)
}

fn anchor_rooms(dungeon: &Dungeon, anchor: Anchor) -> Vec<RoomId> {
    match anchor {
        Anchor::Room(room) => vec![room],
        Anchor::Door(door) => dungeon
            .door(door)
            .map(|door| {
                let (a, b) = door.rooms();
                vec![a, b]
            })
            .unwrap_or_default(),
    }
}

fn share_room(dungeon: &Dungeon, a: Anchor, b: Anchor) -> bool {
    let rooms = anchor_rooms(dungeon, b);
    anchor_rooms(dungeon, a).iter().any(|room| rooms.contains(room))
}

fn search(query: &Query<'_>) -> Vec<WorldPos> {
    let heuristic = |node: SearchNode| query.position(node).distance(query.goal);

    let mut open = IndexedPriorityQueue::new();
    let mut closed = HashSet::new();
    let mut g_score = HashMap::from([(SearchNode::Start, 0.0_f32)]);
    let mut came_from = HashMap::new();
    open.enqueue(SearchNode::Start, heuristic(SearchNode::Start));

    while let Some((current, _)) = open.try_dequeue() {
        if current == SearchNode::Goal {
            trace!("hierarchical path: {} nodes closed", closed.len());
            return reconstruct_path(query, &came_from);
        }
        closed.insert(current);
        let current_g = *g_score.get(&current).expect("queued node must have a g-score");
        let here = query.position(current);

        for next in query.successors(current) {
            if closed.contains(&next) {
                continue;
            }
            let tentative = current_g + here.distance(query.position(next));
            if tentative >= *g_score.get(&next).unwrap_or(&f32::INFINITY) {
                continue;
            }
            came_from.insert(next, current);
            g_score.insert(next, tentative);
            let f = tentative + heuristic(next);
            if open.contains(&next) {
                open.update_priority(&next, f);
            } else {
                open.enqueue(next, f);
            }
        }
    }

    trace!("hierarchical path: exhausted after {} nodes", closed.len());
    Vec::new()
}

fn reconstruct_path(
    query: &Query<'_>,
    came_from: &HashMap<SearchNode, SearchNode>,
) -> Vec<WorldPos> {
    let mut current = SearchNode::Goal;
    let mut path = vec![query.position(current)];
    while current != SearchNode::Start {
        let later = current;
        current = *came_from.get(&current).expect("path must be reconstructible");
        let pos = query.position(current);
        // Doorway endpoints coincide with their door node.
        let doorway =
            matches!(current, SearchNode::Door(_)) || matches!(later, SearchNode::Door(_));
        if doorway && path.last() == Some(&pos) {
            continue;
        }
        path.push(pos);
    }
    path.reverse();
    path
}
