use crate::{
    config::Config,
    data_io::{GridCache, WeatherRecordSource},
    error::Result,
    field::{GridBuilder, WeatherField, WeatherGrid},
    stations::StationTable,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Load one file's grid from its cache artifact, or build it from the CSV
/// and store the artifact when a cache is given.
pub fn load_grid(
    path: &Path,
    builder: &GridBuilder,
    cache: Option<&GridCache>,
) -> Result<WeatherGrid> {
    if let Some(cache) = cache {
        if let Some(grid) = cache.try_load(path)? {
            if grid.shape().1 != builder.station_count() {
                warn!(
                    "Cached grid for {} has {} stations, configuration expects {}",
                    path.display(),
                    grid.shape().1,
                    builder.station_count()
                );
            }
            return Ok(grid);
        }
    }

    let records = WeatherRecordSource::new(path).read_records()?;
    let grid = builder.build(&records).map_err(|e| e.in_file(path))?;
    debug!(
        "Built weather grid for {}: {} time samples x {} stations",
        path.display(),
        grid.shape().0,
        grid.shape().1
    );

    if let Some(cache) = cache {
        cache.store(&grid, path)?;
    }
    Ok(grid)
}

/// Load every file's grid on a pool of `num_threads` threads.
///
/// Files share no state while loading, so the result only differs from a
/// sequential load in timing. Grids are returned in input order.
pub fn load_grids_parallel(
    paths: &[PathBuf],
    builder: &GridBuilder,
    cache: Option<&GridCache>,
    num_threads: usize,
) -> Result<Vec<WeatherGrid>> {
    if num_threads <= 1 || paths.len() <= 1 {
        return paths
            .iter()
            .map(|path| load_grid(path, builder, cache))
            .collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;

    pool.install(|| {
        paths
            .par_iter()
            .map(|path| load_grid(path, builder, cache))
            .collect()
    })
}

/// Build the weather field for every input file named in `config`
pub fn load_weather_field(config: &Config, stations: &impl StationTable) -> Result<WeatherField> {
    let builder = GridBuilder::new(stations.station_count());
    let cache = config.use_cache.then(|| config.grid_cache());

    info!(
        "Loading {} weather file(s) using {} thread(s)",
        config.inputs.len(),
        config.num_threads
    );
    let grids = load_grids_parallel(&config.inputs, &builder, cache.as_ref(), config.num_threads)?;

    Ok(WeatherField::with_options(
        grids,
        config.boundary,
        &config.constants,
    ))
}
