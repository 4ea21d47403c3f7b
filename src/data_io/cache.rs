use crate::error::{Result, WeatherError};
use crate::field::WeatherGrid;
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Leading bytes of every cache artifact
pub const CACHE_MAGIC: [u8; 8] = *b"SWGRID\0\0";

/// Bumped whenever the artifact layout changes. Version 2 carries the grid
/// start time, so a cache hit never has to reopen the source file.
pub const CACHE_FORMAT_VERSION: u32 = 2;

pub const DEFAULT_CACHE_EXTENSION: &str = "cache";

#[derive(Serialize, Deserialize)]
struct CacheHeader {
    magic: [u8; 8],
    version: u32,
}

#[derive(Serialize)]
struct CacheBodyRef<'a> {
    start_time: f64,
    time_axis: &'a [f64],
    station_axis: &'a [f64],
    values: ArrayView3<'a, f64>,
}

#[derive(Deserialize)]
struct CacheBody {
    start_time: f64,
    time_axis: Vec<f64>,
    station_axis: Vec<f64>,
    values: Array3<f64>,
}

/// Decides whether an existing cache artifact may be served for a source
pub trait StalenessPolicy: fmt::Debug + Send + Sync {
    fn is_fresh(&self, source: &Path, cache: &Path) -> Result<bool>;
}

/// The artifact is fresh whenever it exists.
///
/// Editing the source file does not invalidate the artifact; delete it (or
/// call `GridCache::invalidate`) to force a rebuild.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistenceOnly;

impl StalenessPolicy for ExistenceOnly {
    fn is_fresh(&self, _source: &Path, cache: &Path) -> Result<bool> {
        Ok(cache.exists())
    }
}

/// The artifact is fresh if it exists and was written no earlier than the
/// source file was last modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceModified;

impl StalenessPolicy for SourceModified {
    fn is_fresh(&self, source: &Path, cache: &Path) -> Result<bool> {
        if !cache.exists() {
            return Ok(false);
        }
        let source_mtime = modified(source)?;
        let cache_mtime = modified(cache)?;
        if cache_mtime < source_mtime {
            warn!(
                "Cache artifact {} is older than {}, rebuilding",
                cache.display(),
                source.display()
            );
            return Ok(false);
        }
        Ok(true)
    }
}

fn modified(path: &Path) -> Result<std::time::SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| WeatherError::io(path, e))
}

/// Built-in staleness policies, selectable from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicyKind {
    #[default]
    ExistenceOnly,
    SourceModified,
}

impl CachePolicyKind {
    pub fn into_policy(self) -> Box<dyn StalenessPolicy> {
        match self {
            CachePolicyKind::ExistenceOnly => Box::new(ExistenceOnly),
            CachePolicyKind::SourceModified => Box::new(SourceModified),
        }
    }
}

impl FromStr for CachePolicyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "existence" | "existence-only" => Ok(CachePolicyKind::ExistenceOnly),
            "modified" | "source-modified" => Ok(CachePolicyKind::SourceModified),
            other => Err(format!("Unknown cache policy: {}", other)),
        }
    }
}

impl fmt::Display for CachePolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicyKind::ExistenceOnly => write!(f, "existence"),
            CachePolicyKind::SourceModified => write!(f, "modified"),
        }
    }
}

/// Persists fitted grids next to their source files as `<source>.cache`.
///
/// Writes are not synchronized between processes; two processes storing
/// the same artifact at once may corrupt it.
#[derive(Debug)]
pub struct GridCache {
    policy: Box<dyn StalenessPolicy>,
    extension: String,
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new(ExistenceOnly)
    }
}

impl GridCache {
    pub fn new(policy: impl StalenessPolicy + 'static) -> Self {
        Self::with_policy(Box::new(policy))
    }

    pub fn with_policy(policy: Box<dyn StalenessPolicy>) -> Self {
        Self {
            policy,
            extension: DEFAULT_CACHE_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Artifact location for `source`: the extension is appended, so
    /// `day1.csv` maps to `day1.csv.cache`.
    pub fn cache_path(&self, source: impl AsRef<Path>) -> PathBuf {
        let mut path = source.as_ref().as_os_str().to_owned();
        path.push(".");
        path.push(&self.extension);
        PathBuf::from(path)
    }

    /// Load the cached grid for `source` if the staleness policy accepts it.
    ///
    /// A fresh artifact that cannot be decoded is an error, never a miss.
    pub fn try_load(&self, source: impl AsRef<Path>) -> Result<Option<WeatherGrid>> {
        let source = source.as_ref();
        let cache = self.cache_path(source);
        if !self.policy.is_fresh(source, &cache)? {
            debug!("Cache miss for {}", source.display());
            return Ok(None);
        }

        let grid = read_artifact(&cache)?;
        info!(
            "Loaded cached weather grid {} ({} x {})",
            cache.display(),
            grid.shape().0,
            grid.shape().1
        );
        Ok(Some(grid))
    }

    /// Write `grid` as the artifact for `source`, replacing any existing one
    pub fn store(&self, grid: &WeatherGrid, source: impl AsRef<Path>) -> Result<()> {
        let cache = self.cache_path(source);
        write_artifact(grid, &cache)?;
        info!("Stored weather grid cache {}", cache.display());
        Ok(())
    }

    /// Delete the artifact for `source`. Returns whether one existed.
    pub fn invalidate(&self, source: impl AsRef<Path>) -> Result<bool> {
        let cache = self.cache_path(source);
        match fs::remove_file(&cache) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WeatherError::io(&cache, e)),
        }
    }
}

fn write_artifact(grid: &WeatherGrid, cache: &Path) -> Result<()> {
    let file = File::create(cache).map_err(|e| WeatherError::io(cache, e))?;
    let mut writer = BufWriter::new(file);
    let encode_err = |source: bincode::Error| WeatherError::CacheSerialization {
        path: cache.to_path_buf(),
        source,
    };

    let header = CacheHeader {
        magic: CACHE_MAGIC,
        version: CACHE_FORMAT_VERSION,
    };
    let body = CacheBodyRef {
        start_time: grid.start_time(),
        time_axis: grid.time_axis(),
        station_axis: grid.station_axis(),
        values: grid.values(),
    };
    bincode::serialize_into(&mut writer, &header).map_err(encode_err)?;
    bincode::serialize_into(&mut writer, &body).map_err(encode_err)?;
    writer.flush().map_err(|e| WeatherError::io(cache, e))
}

fn read_artifact(cache: &Path) -> Result<WeatherGrid> {
    let file = File::open(cache).map_err(|e| WeatherError::io(cache, e))?;
    let mut reader = BufReader::new(file);
    let decode_err = |source: bincode::Error| WeatherError::CacheDeserialization {
        path: cache.to_path_buf(),
        source,
    };
    let format_err = |reason: String| WeatherError::CacheFormat {
        path: cache.to_path_buf(),
        reason,
    };

    let header: CacheHeader = bincode::deserialize_from(&mut reader).map_err(decode_err)?;
    if header.magic != CACHE_MAGIC {
        return Err(format_err("not a weather grid cache".to_string()));
    }
    if header.version != CACHE_FORMAT_VERSION {
        return Err(format_err(format!(
            "format version {} (expected {})",
            header.version, CACHE_FORMAT_VERSION
        )));
    }

    let body: CacheBody = bincode::deserialize_from(&mut reader).map_err(decode_err)?;
    let grid = WeatherGrid::from_parts(body.time_axis, body.station_axis, body.values)
        .map_err(|e| format_err(e.to_string()))?;
    if grid.start_time().to_bits() != body.start_time.to_bits() {
        return Err(format_err(format!(
            "stored start time {} does not match first time sample {}",
            body.start_time,
            grid.start_time()
        )));
    }
    Ok(grid)
}
