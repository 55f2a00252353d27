use bandpipe::BandpipeError;

#[derive(Debug)]
pub enum CliError {
    Config {
        source: String,
    },
    ParseError {
        msg: String,
    },
    Io {
        source: String,
        path: Option<String>,
    },
    FrameDecoding {
        source: String,
        path: String,
    },
    Pipeline {
        source: BandpipeError,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config { source } => write!(f, "Error interpreting the config: {}", source),
            CliError::ParseError { msg } => write!(f, "Error parsing config: {}", msg),
            CliError::Io { source, path } => {
                if let Some(path) = path {
                    write!(f, "Error reading file {}: {}", path, source)
                } else {
                    write!(f, "Error reading file: {}", source)
                }
            }
            CliError::FrameDecoding { source, path } => {
                write!(f, "Error decoding frame {}: {}", path, source)
            }
            CliError::Pipeline { source } => write!(f, "Error processing frame: {}", source),
        }
    }
}

impl From<BandpipeError> for CliError {
    fn from(e: BandpipeError) -> Self {
        CliError::Pipeline { source: e }
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Io {
            source: e.to_string(),
            path: None,
        }
    }
}
