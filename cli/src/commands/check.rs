use anyhow::{Context, Result};
use mobility_pipeline::{check_data_files, read_mobility, validate_full};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CheckArgs) -> Result<()> {
    let config = super::load_config(cli)?;

    check_data_files(&config, &args.country, args.mobility.as_deref())
        .with_context(|| format!("data files for {} failed validation", args.country))?;

    if args.full {
        if let Some(path) = &args.mobility {
            validate_full(&read_mobility(path)?, &config.tower_prefix)
                .with_context(|| format!("{} does not list every tower pair", path.display()))?;
        }
    }

    println!("ok");
    Ok(())
}
