use anyhow::{Context, Result};
use clap::Parser;
use hill_climbing::CLIArgs;

fn main() -> Result<()> {
    env_logger::init();
    let args = CLIArgs::parse();
    let map = hill_climbing::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read height map from given file({}).",
            args.input_path.display()
        )
    })?;

    let end_pos = map.end();
    if let Some(min_steps_n) = map.min_steps_n_from_lowest(&end_pos) {
        println!(
            "It takes at least {} steps moving from any lowest position to {} in given height map.",
            min_steps_n, end_pos
        );
    } else {
        eprintln!(
            "There's no path from any lowest position to {} in given height map.",
            end_pos
        );
    }

    Ok(())
}
