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

    let (start_pos, end_pos) = (map.start(), map.end());
    if let Some(min_steps_n) = map.min_steps_n(&start_pos, &end_pos) {
        println!(
            "It takes at least {} steps moving from {} to {} in given height map.",
            min_steps_n, start_pos, end_pos
        );
    } else {
        eprintln!(
            "There's no path from {} to {} in given height map.",
            start_pos, end_pos
        );
    }

    Ok(())
}
