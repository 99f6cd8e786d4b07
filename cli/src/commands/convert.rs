use anyhow::{Context, Result};
use mobility_pipeline::convert_shapefile;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ConvertArgs) -> Result<()> {
    let count = convert_shapefile(&args.shapefile, &args.output)
        .with_context(|| format!("failed to convert {}", args.shapefile.display()))?;

    println!("wrote {count} regions to {}", args.output.display());
    Ok(())
}
