//! Demo driver: plays a scripted slider session against the engine
//!
//! Stands in for the embedding layer. Initializes one engine from
//! env-driven configuration, applies a handful of size changes the way a
//! slider would emit them, and prints each rendering payload as JSON.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use sampling_explorer::config::{EngineConfig, PopulationConfig};
use sampling_explorer::engine::EngineState;
use sampling_explorer::payload::RenderPayload;
use sampling_explorer::population::Population;
use sampling_explorer::tracing_setup;

fn main() -> anyhow::Result<()> {
    tracing_setup::init_tracing();

    let pop_config = PopulationConfig::from_env();
    pop_config.validate().context("population configuration")?;
    let engine_config = EngineConfig::from_env();

    let population = Arc::new(
        Population::generate(pop_config.mean, pop_config.stddev, pop_config.size)
            .context("population generation")?,
    );

    let mut state =
        EngineState::initialize(population, engine_config).context("engine initialization")?;
    print_payload(&state)?;

    // A plausible interaction: grow two comparison groups, shrink nothing,
    // then grow the reference and watch every marker recompute. The final
    // event is deliberately out of range to show a rejected update.
    let events = [(0, 50), (2, 25), (engine_config.reference_index, 40), (9, 10)];

    for (group_index, new_size) in events {
        info!(group_index, new_size, "slider event");
        match state.set_group_size(group_index, new_size) {
            Ok(next) => {
                state = next;
                print_payload(&state)?;
            }
            Err(err) => {
                warn!(code = err.code(), %err, "update rejected, state unchanged");
            }
        }
    }

    Ok(())
}

fn print_payload(state: &EngineState) -> anyhow::Result<()> {
    let payload = RenderPayload::from_state(state);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
