use anyhow::{Context, Result};
use mobility_pipeline::day_matrix;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::DayArgs) -> Result<()> {
    let config = super::load_config(cli)?;

    let out = day_matrix(&config, &args.country, &args.day, &args.mobility)
        .with_context(|| format!("failed to compute admin-to-admin matrix for {} on {}", args.country, args.day))?;

    println!("{}", out.display());
    Ok(())
}
