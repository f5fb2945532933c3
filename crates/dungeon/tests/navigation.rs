use dungeon::{Dungeon, GenerationConfig, LocalGridPathfinder, Pos, World, WorldPos};

fn room_centers(dungeon: &Dungeon) -> Vec<WorldPos> {
    dungeon.rooms().map(|(_, room)| room.start().center()).collect()
}

#[test]
fn hierarchical_route_is_followable_once_doors_open() {
    let mut world = World::generate(GenerationConfig::default(), 5150).expect("valid config");
    world.open_all_doors();
    let centers = room_centers(world.dungeon());
    let (start, goal) = (centers[0], centers[centers.len() - 1]);

    let route = world.route(start, goal);
    assert!(route.len() >= 2);
    assert_eq!(route.first(), Some(&start));
    assert_eq!(route.last(), Some(&goal));

    for leg in route.windows(2) {
        let walk = world.local_path(leg[0], leg[1]);
        assert!(!walk.is_empty(), "no grid walk between {:?} and {:?}", leg[0], leg[1]);
    }
}

#[test]
fn intermediate_waypoints_are_door_centers() {
    let world = World::generate(GenerationConfig::default(), 8).expect("valid config");
    let centers = room_centers(world.dungeon());
    for &goal in centers.iter().skip(1).take(10) {
        let route = world.route(centers[0], goal);
        for waypoint in &route[1..route.len() - 1] {
            let cell = Pos::from_world(*waypoint);
            assert!(world.dungeon().door_at(cell).is_some(), "{waypoint:?} is not a door");
            assert_eq!(cell.center(), *waypoint);
        }
    }
}

#[test]
fn closed_doors_stop_the_local_walk_between_rooms() {
    let world = World::generate(GenerationConfig::default(), 99).expect("valid config");
    let dungeon = world.dungeon();
    let (_, door) = dungeon.doors().next().expect("at least one door");
    let (a, b) = door.rooms();
    let from = dungeon.room(a).expect("room").start();
    let to = dungeon.room(b).expect("room").start();

    let finder = LocalGridPathfinder::new(dungeon);
    let cells = finder.find_cell_path(from, to);
    assert!(cells.iter().all(|&pos| dungeon.is_walkable_cell(pos)));
    assert!(!cells.contains(&door.pos()), "a closed door was walked through");
}

#[test]
fn toggling_every_door_twice_restores_the_fingerprint() {
    let mut world = World::generate(GenerationConfig::default(), 3).expect("valid config");
    let before = world.dungeon().fingerprint();
    let doors: Vec<Pos> = world.dungeon().doors().map(|(_, door)| door.pos()).collect();

    for &pos in &doors {
        assert_eq!(world.toggle_door(pos), Some(true));
        assert!(world.dungeon().is_walkable(pos.center()));
    }
    assert_ne!(world.dungeon().fingerprint(), before);
    for &pos in &doors {
        assert_eq!(world.toggle_door(pos), Some(false));
        assert!(!world.dungeon().is_walkable(pos.center()));
    }
    assert_eq!(world.dungeon().fingerprint(), before);
}
