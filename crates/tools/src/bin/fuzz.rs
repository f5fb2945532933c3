use std::collections::{BTreeSet, VecDeque};

use anyhow::Result;
use clap::Parser;
use dungeon::{Cell, Dungeon, GenerationConfig, LocalGridPathfinder, Pos, RoomId, World};
use log::info;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    #[arg(long)]
    log_level: Option<String>,
}

fn random_between(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    min + (rng.next_u64() as usize % (max - min + 1))
}

fn random_config(rng: &mut ChaCha8Rng) -> GenerationConfig {
    let min_room_width = random_between(rng, 1, 6);
    let min_room_height = random_between(rng, 1, 6);
    GenerationConfig {
        width: random_between(rng, 8, 80),
        height: random_between(rng, 8, 60),
        min_room_width,
        max_room_width: random_between(rng, min_room_width, 14),
        min_room_height,
        max_room_height: random_between(rng, min_room_height, 14),
        extra_door_chance: (rng.next_u64() % 101) as f32 / 100.0,
    }
}

fn reachable_rooms(dungeon: &Dungeon) -> usize {
    let Some((first, _)) = dungeon.rooms().next() else {
        return 0;
    };
    let mut seen = BTreeSet::from([first]);
    let mut queue = VecDeque::from([first]);
    while let Some(room) = queue.pop_front() {
        for &next in dungeon.room(room).expect("listed room exists").neighbours() {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}

fn check_layout(dungeon: &Dungeon) {
    let mut floor = BTreeSet::new();
    for (id, room) in dungeon.rooms() {
        for &pos in room.coords() {
            assert!(floor.insert(pos), "Invariant failed: {pos:?} is floor of two rooms");
            assert_eq!(dungeon.cell_at(pos), Some(Cell::Floor));
        }
        for &door in room.doors() {
            let door = dungeon.door(door).expect("listed door exists");
            assert!(door.connects(id), "Invariant failed: room lists a foreign door");
        }
    }

    for (_, door) in dungeon.doors() {
        let bordering: BTreeSet<RoomId> = door
            .pos()
            .cardinal_neighbors()
            .into_iter()
            .filter_map(|pos| dungeon.room_at_cell(pos))
            .collect();
        let (a, b) = door.rooms();
        assert_eq!(
            bordering,
            BTreeSet::from([a, b]),
            "Invariant failed: door borders {bordering:?}"
        );
    }

    for x in 0..dungeon.width() as i32 {
        for y in [0, dungeon.height() as i32 - 1] {
            let cell = dungeon.cell_at(Pos::new(x, y));
            assert_eq!(cell, Some(Cell::Wall), "Invariant failed: open border");
        }
    }

    let reachable = reachable_rooms(dungeon);
    assert_eq!(reachable, dungeon.room_count(), "Invariant failed: disconnected rooms");
}

fn check_navigation(world: &mut World, rng: &mut ChaCha8Rng) {
    let starts: Vec<Pos> = world.dungeon().rooms().map(|(_, room)| room.start()).collect();
    let from = starts[rng.next_u64() as usize % starts.len()];
    let to = starts[rng.next_u64() as usize % starts.len()];

    let route = world.route(from.center(), to.center());
    assert!(route.len() >= 2, "Invariant failed: no room route from {from:?} to {to:?}");

    world.open_all_doors();
    let cells = LocalGridPathfinder::new(world.dungeon()).find_cell_path(from, to);
    assert!(!cells.is_empty(), "Invariant failed: no walk from {from:?} to {to:?} with doors open");
    for step in cells.windows(2) {
        assert_eq!(step[0].x.abs_diff(step[1].x) + step[0].y.abs_diff(step[1].y), 1);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref().or(Some("warn")));

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let seed = rng.next_u64();
        let mut world = World::generate(config.clone(), seed)?;
        info!("run {run}: {}x{} seed {seed}", config.width, config.height);

        check_layout(world.dungeon());
        check_navigation(&mut world, &mut rng);
    }

    println!("Fuzz complete: {} dungeons passed every invariant.", args.runs);
    Ok(())
}
