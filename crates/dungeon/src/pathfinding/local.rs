//! Cell-level A* over the dungeon grid, honouring door state.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::queue::IndexedPriorityQueue;
use crate::state::Dungeon;
use crate::types::{Pos, WorldPos};

use super::manhattan;

#[derive(Clone, Copy, Debug)]
pub struct LocalGridPathfinder<'a> {
    dungeon: &'a Dungeon,
}

impl<'a> LocalGridPathfinder<'a> {
    pub fn new(dungeon: &'a Dungeon) -> Self {
        Self { dungeon }
    }

    /// Tile-center waypoints from the cell containing `start` to the cell
    /// containing `goal`, both included. Empty when no route exists.
    pub fn find_path(&self, start: WorldPos, goal: WorldPos) -> Vec<WorldPos> {
        self.find_cell_path(Pos::from_world(start), Pos::from_world(goal))
            .into_iter()
            .map(Pos::center)
            .collect()
    }

    pub fn find_cell_path(&self, start: Pos, goal: Pos) -> Vec<Pos> {
        let dungeon = self.dungeon;
        if !dungeon.is_within_grid(start) || !dungeon.is_within_grid(goal) {
            return Vec::new();
        }
        if !dungeon.is_walkable_cell(start) || !dungeon.is_walkable_cell(goal) {
            return Vec::new();
        }

        let mut open = IndexedPriorityQueue::new();
        let mut closed = HashSet::new();
        let mut g_score = HashMap::from([(start, 0_u32)]);
        let mut came_from = HashMap::new();
        open.enqueue(start, manhattan(start, goal) as f32);

        while let Some((current, _)) = open.try_dequeue() {
            if current == goal {
                trace!("local path {start:?} -> {goal:?}: {} cells closed", closed.len());
                return reconstruct_path(&came_from, start, goal);
            }
            closed.insert(current);
            let current_g = *g_score.get(&current).expect("queued cell must have a g-score");

            for next in current.cardinal_neighbors() {
                if closed.contains(&next) || !dungeon.is_walkable_cell(next) {
                    continue;
                }
                let tentative = current_g + 1;
                if tentative >= *g_score.get(&next).unwrap_or(&u32::MAX) {
                    continue;
                }
                came_from.insert(next, current);
                g_score.insert(next, tentative);
                let f = (tentative + manhattan(next, goal)) as f32;
                if open.contains(&next) {
                    open.update_priority(&next, f);
                } else {
                    open.enqueue(next, f);
                }
            }
        }

        trace!("local path {start:?} -> {goal:?}: exhausted after {} cells", closed.len());
        Vec::new()
    }
}

fn reconstruct_path(came_from: &HashMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut current = goal;
    let mut path = vec![current];
    while current != start {
        current = *came_from.get(&current).expect("path must be reconstructible");
        path.push(current);
    }
    path.reverse();
    path
}
