use std::path::PathBuf;

/// Admin-level mobility CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "mobility", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON config file; missing fields take their defaults
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the config's `data_dir`
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute the tower-to-admin and admin-to-tower matrices for a country
    Country(CountryArgs),

    /// Compute the admin-to-admin matrix for one day
    Day(DayArgs),

    /// Run every data-file check, failing on the first violation
    Check(CheckArgs),

    /// Report which tower seed each Voronoi cell contains
    Towers(TowersArgs),

    /// Convert a shapefile of admin regions to GeoJSON
    Convert(ConvertArgs),
}

#[derive(clap::Args, Debug)]
pub struct CountryArgs {
    /// Country and admin level, e.g. BRA_2
    pub country: String,

    /// Voronoi cells GeoJSON, defaults to the configured file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub voronoi: Option<PathBuf>,

    /// Shapefile to convert into the country's GeoJSON first
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub shapefile: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DayArgs {
    /// Country and admin level, e.g. BRA_2
    pub country: String,

    /// Day key used in the output name, e.g. 20150201
    pub day: String,

    /// Mobility CSV for the day
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub mobility: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Country and admin level, e.g. BRA_2
    pub country: String,

    /// Mobility CSV to check for ordering
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub mobility: Option<PathBuf>,

    /// Also require every tower pair to be present
    #[arg(long, requires = "mobility")]
    pub full: bool,
}

#[derive(clap::Args, Debug)]
pub struct TowersArgs {
    /// Voronoi cells GeoJSON, defaults to the configured file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub voronoi: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input shapefile (.shp or .dbf, extension optional)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub shapefile: PathBuf,

    /// Output GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,
}
