//! Plans the sample ambush, or a scenario loaded from a JSON file.
//!
//! ```text
//! cargo run --example ambush
//! cargo run --example ambush -- scenario.json state_space.dot
//! RUST_LOG=debug cargo run --example ambush
//! ```

use std::env;
use std::time::Instant;

use strips_rs::{ActionCatalog, GraphVisualizer, Result, Scenario};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = env::args().skip(1);
    let scenario = match args.next() {
        Some(path) => Scenario::load(path)?,
        None => Scenario::ambush(),
    };

    println!("Start: {}", scenario.start);
    println!("Locations: {}", scenario.locations.join(", "));

    let started = Instant::now();
    let outcome = scenario.solve(ActionCatalog::combat())?;

    if outcome.is_success() {
        println!("Found goal");
    } else {
        println!("Goal is unreachable from the start state");
    }
    println!(
        "States: {}  Iterations: {}",
        outcome.states_discovered(),
        outcome.iterations()
    );
    println!("Time: {:?}", started.elapsed());
    println!("--------------- ACTION PLAN ---------------");
    for (i, label) in outcome.plan().labels().enumerate() {
        println!("  Step {}: {}", i + 1, label);
    }

    if let Some(dot) = args.next() {
        GraphVisualizer::new().save_dot(&outcome, &dot)?;
        println!("State graph written to {}", dot);
    }

    Ok(())
}
