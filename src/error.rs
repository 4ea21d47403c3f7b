use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every failure the weather subsystem can surface.
///
/// None of these are recoverable locally: construction errors abort loading
/// and query errors abort the specific query.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Malformed weather grid: {0}")]
    MalformedGrid(String),

    #[error("Cache artifact {path} could not be decoded: {source}")]
    CacheDeserialization {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Cache artifact {path} could not be encoded: {source}")]
    CacheSerialization {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Cache artifact {path} is invalid: {reason}")]
    CacheFormat { path: PathBuf, reason: String },

    #[error("No weather grid covers time {time} (earliest start: {})", fmt_earliest(.earliest))]
    NoCoverage { time: f64, earliest: Option<f64> },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid value '{value}' for column '{column}' at row {row} in {path}")]
    InvalidField {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<WeatherError>,
    },
}

fn fmt_earliest(earliest: &Option<f64>) -> String {
    match earliest {
        Some(t) => t.to_string(),
        None => "no grids loaded".to_string(),
    }
}

impl WeatherError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        WeatherError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attach the file that produced this error, unless it already names one.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            WeatherError::MalformedGrid(_) => WeatherError::InFile {
                path: path.as_ref().to_path_buf(),
                source: Box::new(self),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
