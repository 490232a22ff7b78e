use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rolo",
    version,
    about = "Enrich contact tables with emails and phone numbers from a people-data API"
)]
pub struct Cli {
    /// API key for the person API
    #[arg(long, env = "ROLO_API_KEY", hide_env_values = true)]
    pub key: String,

    /// Path to the input table (';'-separated, Latin-1)
    #[arg(long)]
    pub csv: PathBuf,

    /// Cache file path
    #[arg(long, default_value = "cache.csv")]
    pub cache: PathBuf,

    /// Output file path
    #[arg(long, default_value = "out.csv")]
    pub out: PathBuf,
}
