// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Replay a recorded drafting session and print the emitted objects
//!
//! Usage:
//!   blueprint-replay <session.json> [--pretty]

use blueprint_drafting::{Drafter, DraftingConfig, Mode, ObjectStore, Outcome, Point2D};
use serde::Deserialize;
use std::env;
use std::fs;

/// A recorded session: optional configuration plus events in arrival order.
#[derive(Debug, Deserialize)]
struct Session {
    #[serde(default)]
    config: Option<DraftingConfig>,
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Event {
    Mode { mode: Mode },
    Pick { x: f64, z: f64 },
    Move { x: f64, z: f64 },
    Finish,
    Finalize,
    Clear,
    GenerateRoom,
    AddLevel,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let session_path = &args[1];
    let mut pretty = false;

    for arg in &args[2..] {
        match arg.as_str() {
            "--pretty" => pretty = true,
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let text = fs::read_to_string(session_path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read session '{}': {}", session_path, e);
        std::process::exit(1);
    });
    let session: Session = serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error: Cannot parse session '{}': {}", session_path, e);
        std::process::exit(1);
    });

    let config = session.config.unwrap_or_default().with_env_overrides();
    let mut drafter = Drafter::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut store = ObjectStore::new();
    let mut ignored = 0usize;

    for (index, event) in session.events.into_iter().enumerate() {
        let outcome = match event {
            Event::Mode { mode } => drafter.set_mode(mode),
            Event::Pick { x, z } => drafter.pick(Point2D::new(x, z), &mut store),
            Event::Move { x, z } => {
                drafter.pointer_move(Point2D::new(x, z));
                continue;
            }
            Event::Finish => drafter.finish_line(),
            Event::Finalize => drafter.finalize_rectangle(&mut store),
            Event::Clear => drafter.clear_all(),
            Event::GenerateRoom => drafter.generate_room(&mut store),
            Event::AddLevel => drafter.add_level(&mut store),
        };

        if outcome == Outcome::Unchanged {
            ignored += 1;
            tracing::debug!(index, "Event had no effect");
        }
    }

    tracing::info!(
        objects = store.len(),
        levels = drafter.floors().level_count(),
        total_price = drafter.floors().total_price(),
        ignored,
        "Replay complete"
    );

    let objects = store.to_sorted_vec();
    let json = if pretty {
        serde_json::to_string_pretty(&objects)
    } else {
        serde_json::to_string(&objects)
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot serialize objects: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"Blueprint Session Replay
========================

Replays a recorded drafting session and prints the emitted wall and floor
objects as JSON on stdout. Logs go to stderr (filter with RUST_LOG).

USAGE:
  blueprint-replay <session.json> [OPTIONS]

ARGUMENTS:
  <session.json>            Recorded session: {{ "config"?: {{..}}, "events": [..] }}

EVENTS:
  {{"type": "mode", "mode": "wall" | "room"}}
  {{"type": "pick", "x": 0.0, "z": 0.0}}
  {{"type": "move", "x": 0.0, "z": 0.0}}
  {{"type": "finish"}} | {{"type": "finalize"}} | {{"type": "clear"}}
  {{"type": "generate_room"}} | {{"type": "add_level"}}

OPTIONS:
  --pretty                  Pretty-print the JSON output
  -h, --help                Show this help message

ENVIRONMENT:
  BLUEPRINT_*               Override configuration values (e.g. BLUEPRINT_WALL_HEIGHT)"#
    );
}
