use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wq-site-finder")]
#[command(about = "Explore water-quality results by contaminant, value and date")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Memory-map large upload files")]
    pub mmap: bool,
}

/// The two uploads every command starts from.
#[derive(Args, Clone)]
pub struct Uploads {
    #[arg(short, long, help = "Water-quality results CSV (or zipped CSV)")]
    pub results: PathBuf,

    #[arg(short, long, help = "Monitoring site locations CSV (or zipped CSV)")]
    pub sites: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the characteristics available for selection
    Characteristics {
        #[command(flatten)]
        uploads: Uploads,
    },

    /// Show the value range for a characteristic
    Range {
        #[command(flatten)]
        uploads: Uploads,

        #[arg(short, long)]
        characteristic: String,
    },

    /// Filter observations and print markers and trend
    Explore {
        #[command(flatten)]
        uploads: Uploads,

        #[arg(short, long)]
        characteristic: String,

        #[arg(long, help = "Lower value bound [default: observed minimum]")]
        min: Option<f64>,

        #[arg(long, help = "Upper value bound [default: observed maximum]")]
        max: Option<f64>,

        #[arg(long, help = "First date, YYYY-MM-DD [default: earliest observation]")]
        start: Option<NaiveDate>,

        #[arg(long, help = "Last date, YYYY-MM-DD [default: latest observation]")]
        end: Option<NaiveDate>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report rows dropped while normalizing the uploads
    Validate {
        #[command(flatten)]
        uploads: Uploads,
    },
}
