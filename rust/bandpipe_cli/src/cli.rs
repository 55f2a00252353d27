use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reference frame image (will over-write the config file)
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Sample frame image (will over-write the config file)
    #[arg(short, long)]
    pub sample: Option<PathBuf>,

    /// Directory of sample frame images to process as a batch
    #[arg(long)]
    pub sample_dir: Option<PathBuf>,

    /// Dark calibration frame image captured with the light source blocked
    #[arg(short, long)]
    pub dark_frame: Option<PathBuf>,

    /// Path to the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
