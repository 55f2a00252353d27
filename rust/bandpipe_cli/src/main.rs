mod cli;
mod config;
mod errors;
mod frames;
mod processing;

use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{
    Config,
    InputConfig,
    OutputConfig,
};
use errors::CliError;

#[cfg(target_os = "windows")]
use mimalloc::MiMalloc;

#[cfg(target_os = "windows")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> std::result::Result<(), CliError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        ) // This uses RUST_LOG environment variable
        .init();

    // Parse command line arguments
    let args = Cli::parse();

    // Load and parse configuration, if one was provided
    let mut config = match args.config {
        Some(ref config_path) => {
            let file = match std::fs::File::open(config_path) {
                Ok(x) => x,
                Err(e) => {
                    return Err(CliError::Io {
                        source: e.to_string(),
                        path: Some(config_path.to_string_lossy().to_string()),
                    });
                }
            };
            let config: Result<Config, _> = serde_json::from_reader(file);
            match config {
                Ok(x) => x,
                Err(e) => {
                    return Err(CliError::ParseError { msg: e.to_string() });
                }
            }
        }
        None => Config::default(),
    };

    // Override config with command line arguments if provided
    if let Some(sample_dir) = args.sample_dir {
        let reference = args
            .reference
            .clone()
            .or_else(|| config_reference(&config))
            .ok_or_else(|| CliError::Config {
                source: "Batch mode needs a reference frame, please provide one in either the config file or with the --reference flag".to_string(),
            })?;
        config.input = Some(InputConfig::Batch {
            reference,
            sample_dir,
            dark_frame: args.dark_frame.clone().or_else(|| config_dark_frame(&config)),
        });
    } else if let (Some(reference), Some(sample)) = (args.reference.clone(), args.sample.clone()) {
        config.input = Some(InputConfig::Single {
            reference,
            sample,
            dark_frame: args.dark_frame.clone().or_else(|| config_dark_frame(&config)),
        });
    }
    if let Some(output_dir) = args.output_dir {
        config.output = Some(OutputConfig {
            directory: output_dir,
        });
    }

    let output_config = match config.output {
        Some(ref x) => x.clone(),
        None => {
            return Err(CliError::Config {
                source: "No output directory provided, please provide one in either the config file or with the --output-dir flag".to_string(),
            });
        }
    };
    info!("Parsed configuration: {:#?}", config.clone());

    // Create output directory
    if let Err(e) = std::fs::create_dir_all(&output_config.directory) {
        return Err(CliError::Io {
            source: e.to_string(),
            path: Some(output_config.directory.to_string_lossy().to_string()),
        });
    };

    match config.input {
        Some(InputConfig::Single {
            reference,
            sample,
            dark_frame,
        }) => processing::process_single(
            &reference,
            &sample,
            dark_frame.as_deref(),
            &config.analysis.peaks,
            &output_config,
        ),
        Some(InputConfig::Batch {
            reference,
            sample_dir,
            dark_frame,
        }) => processing::process_batch(
            &reference,
            &sample_dir,
            dark_frame.as_deref(),
            &config.analysis.peaks,
            &output_config,
        ),
        None => Err(CliError::Config {
            source: "No input provided, please provide one in either the config file or with the --reference/--sample flags".to_string(),
        }),
    }
}

fn config_reference(config: &Config) -> Option<std::path::PathBuf> {
    match config.input {
        Some(InputConfig::Single { ref reference, .. }) => Some(reference.clone()),
        Some(InputConfig::Batch { ref reference, .. }) => Some(reference.clone()),
        None => None,
    }
}

fn config_dark_frame(config: &Config) -> Option<std::path::PathBuf> {
    match config.input {
        Some(InputConfig::Single { ref dark_frame, .. }) => dark_frame.clone(),
        Some(InputConfig::Batch { ref dark_frame, .. }) => dark_frame.clone(),
        None => None,
    }
}
