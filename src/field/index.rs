use super::grid::WeatherGrid;
use crate::error::{Result, WeatherError};

/// Weather grids ordered by start time.
///
/// A query is answered by the last grid whose start time is at or before the
/// query time. Grid ranges may overlap or leave gaps; past the final grid the
/// final grid's boundary policy takes over.
#[derive(Debug, Clone, Default)]
pub struct WeatherIndex {
    grids: Vec<WeatherGrid>,
}

impl WeatherIndex {
    pub fn new(mut grids: Vec<WeatherGrid>) -> Self {
        grids.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
        Self { grids }
    }

    pub fn resolve(&self, time: f64) -> Result<&WeatherGrid> {
        let upper = self.grids.partition_point(|g| g.start_time() <= time);
        if upper == 0 {
            return Err(WeatherError::NoCoverage {
                time,
                earliest: self.grids.first().map(WeatherGrid::start_time),
            });
        }
        Ok(&self.grids[upper - 1])
    }

    pub fn grids(&self) -> &[WeatherGrid] {
        &self.grids
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// First start time and last sampled time across all grids
    pub fn coverage(&self) -> Option<(f64, f64)> {
        let first = self.grids.first()?;
        let last = self.grids.last()?;
        Some((first.start_time(), last.end_time()))
    }
}
