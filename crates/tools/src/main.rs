use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dungeon::{World, WorldPos};
use serde::Serialize;
use tools::logging;
use tools::options::{load_config, parse_point};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dungeon and print its map and summary
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// TOML file with generation parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the summary as JSON instead of the map
        #[arg(long)]
        json: bool,
    },
    /// Query a path between two world positions
    Path {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_parser = parse_point)]
        from: WorldPos,
        #[arg(long, value_parser = parse_point)]
        to: WorldPos,
        #[arg(long, value_enum, default_value_t = Tier::Local)]
        tier: Tier,
        #[arg(long)]
        open_all_doors: bool,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    Local,
    Hierarchical,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    width: usize,
    height: usize,
    rooms: usize,
    doors: usize,
    fingerprint: u64,
}

impl Summary {
    fn of(world: &World) -> Self {
        let dungeon = world.dungeon();
        Self {
            seed: dungeon.seed(),
            width: dungeon.width(),
            height: dungeon.height(),
            rooms: dungeon.room_count(),
            doors: dungeon.door_count(),
            fingerprint: dungeon.fingerprint(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref());

    match args.command {
        Command::Generate { seed, config, json } => {
            let world = World::generate(load_config(config.as_deref())?, seed)?;
            let summary = Summary::of(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", world.dungeon().render_ascii());
                println!("Seed: {}", summary.seed);
                println!("Rooms: {}", summary.rooms);
                println!("Doors: {}", summary.doors);
                println!("Fingerprint: {:016x}", summary.fingerprint);
            }
        }
        Command::Path { seed, config, from, to, tier, open_all_doors, json } => {
            let mut world = World::generate(load_config(config.as_deref())?, seed)?;
            if open_all_doors {
                world.open_all_doors();
            }
            let waypoints = match tier {
                Tier::Local => world.local_path(from, to),
                Tier::Hierarchical => world.route(from, to),
            };
            if json {
                let points: Vec<(f32, f32)> = waypoints.iter().map(|p| (p.x, p.y)).collect();
                println!("{}", serde_json::to_string(&points)?);
            } else if waypoints.is_empty() {
                println!("No path.");
            } else {
                for waypoint in &waypoints {
                    println!("{:.1},{:.1}", waypoint.x, waypoint.y);
                }
                println!("Waypoints: {}", waypoints.len());
            }
        }
    }

    Ok(())
}
