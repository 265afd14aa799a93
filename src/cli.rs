use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "plenary",
    version,
    about = "Structure plenary session transcripts into attributed speech segments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Profile(ProfileArgs),
    Tag(TagArgs),
    Segment(SegmentArgs),
    Status(StatusArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "NRW")]
    Nrw,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "HH")]
    Hh,
}

impl Jurisdiction {
    pub fn code(self) -> &'static str {
        match self {
            Self::Nrw => "NRW",
            Self::Sn => "SN",
            Self::Hh => "HH",
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Nrw => "nrw",
            Self::Sn => "sn",
            Self::Hh => "hh",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".cache/plenary")]
    pub cache_root: PathBuf,

    #[arg(long, value_enum)]
    pub jurisdiction: Jurisdiction,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value = ".cache/plenary")]
    pub cache_root: PathBuf,

    #[arg(long, value_enum)]
    pub jurisdiction: Jurisdiction,

    #[arg(long, default_value_t = 6)]
    pub sample_size: usize,

    #[arg(long)]
    pub geometry_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TagArgs {
    #[arg(long, default_value = ".cache/plenary")]
    pub cache_root: PathBuf,

    #[arg(long, value_enum)]
    pub jurisdiction: Jurisdiction,

    #[arg(long)]
    pub document: PathBuf,

    #[arg(long)]
    pub geometry_path: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long, default_value = ".cache/plenary")]
    pub cache_root: PathBuf,

    #[arg(long, value_enum)]
    pub jurisdiction: Jurisdiction,

    #[arg(long)]
    pub geometry_path: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long)]
    pub run_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub jobs: Option<usize>,

    #[arg(long, default_value_t = 30_000)]
    pub timeout_ms: u64,

    #[arg(long)]
    pub min_interjections: Option<usize>,

    #[arg(long)]
    pub min_turns: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/plenary")]
    pub cache_root: PathBuf,

    #[arg(long, value_enum)]
    pub jurisdiction: Jurisdiction,
}
