use bandpipe::PeakConfig;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub input: Option<InputConfig>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub output: Option<OutputConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            analysis: AnalysisConfig::default(),
            output: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum InputConfig {
    #[serde(rename = "single")]
    Single {
        reference: PathBuf,
        sample: PathBuf,
        dark_frame: Option<PathBuf>,
    },
    #[serde(rename = "batch")]
    Batch {
        reference: PathBuf,
        sample_dir: PathBuf,
        dark_frame: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub peaks: PeakConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            peaks: PeakConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
}
