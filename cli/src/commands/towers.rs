use anyhow::{Context, Result};
use mobility_pipeline::{map_cells_to_towers, read_regions, read_towers};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::TowersArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let voronoi = args.voronoi.clone().unwrap_or_else(|| config.voronoi_path());

    let towers = read_towers(&config.towers_path()).context("failed to read tower locations")?;
    let cells = read_regions(&voronoi).with_context(|| format!("failed to read cells from {}", voronoi.display()))?;
    let report = map_cells_to_towers(&cells, &towers);

    println!("cells: {}", cells.len());
    println!("towers: {}", towers.len());
    println!("distinct towers in cells: {}", report.distinct_seeds);
    println!("cells without a tower: {}", report.unmapped.len());
    println!("zero-area cells: {}", report.degenerate.len());
    for cell in &report.unmapped {
        println!("  unmapped cell {cell}");
    }
    if cli.verbose > 0 {
        for (cell, tower) in report.mapping.iter().enumerate() {
            if let Some(tower) = tower {
                println!("  cell {cell} -> {}", towers[*tower].name);
            }
        }
    }
    Ok(())
}
