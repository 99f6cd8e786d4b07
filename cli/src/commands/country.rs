use anyhow::{Context, Result};
use mobility_pipeline::country_matrices;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::CountryArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let voronoi = args.voronoi.clone().unwrap_or_else(|| config.voronoi_path());

    let (tower_admin, admin_tower) = country_matrices(&config, &args.country, &voronoi, args.shapefile.as_deref())
        .with_context(|| format!("failed to compute country matrices for {}", args.country))?;

    println!("{}", tower_admin.display());
    println!("{}", admin_tower.display());
    Ok(())
}
