//! Transition config validation command

use anyhow::{Context, Result};
use tableau_director::TransitionConfig;

pub fn run(config: &str) -> Result<()> {
    let transitions = TransitionConfig::load_named_file(config)
        .with_context(|| format!("Failed to load transition config: {config}"))?;

    if transitions.is_empty() {
        println!("No [transitions.<name>] tables found in {config}");
        return Ok(());
    }

    for (name, cfg) in &transitions {
        let transition = cfg
            .build()
            .with_context(|| format!("Failed to build transition '{name}'"))?;
        println!(
            "  {name}: {} ({} ms, {:?}, easing {})",
            transition.name(),
            cfg.time_ms,
            cfg.direction,
            cfg.easing
        );
    }

    println!("{} transition(s) OK", transitions.len());
    Ok(())
}
