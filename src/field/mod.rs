pub mod grid;
pub mod index;
pub mod sample;

pub use grid::*;
pub use index::*;
pub use sample::*;

use crate::config::Constants;
use crate::error::Result;
use crate::math::BoundaryPolicy;

/// Continuous weather field over (time, station), backed by one grid per
/// input file.
///
/// Read-only after construction; share it freely between threads.
#[derive(Debug, Clone)]
pub struct WeatherField {
    index: WeatherIndex,
    boundary: BoundaryPolicy,
    inverse_speed_of_sound: f64,
}

impl WeatherField {
    pub fn new(grids: Vec<WeatherGrid>) -> Self {
        Self::with_options(grids, BoundaryPolicy::default(), &Constants::default())
    }

    pub fn with_options(
        grids: Vec<WeatherGrid>,
        boundary: BoundaryPolicy,
        constants: &Constants,
    ) -> Self {
        Self {
            index: WeatherIndex::new(grids),
            boundary,
            inverse_speed_of_sound: constants.inverse_speed_of_sound,
        }
    }

    /// Weather at `station` at instant `time`
    pub fn at(&self, station: f64, time: f64) -> Result<WeatherSample> {
        let grid = self.index.resolve(time)?;
        let values = grid.evaluate_with(time, station, self.boundary);
        Ok(WeatherSample::from_channels(&values, self.inverse_speed_of_sound))
    }

    /// Mean weather over `[start_time, end_time]`, approximated by averaging
    /// the two endpoint samples. The interpolant is not integrated.
    pub fn during(&self, station: f64, start_time: f64, end_time: f64) -> Result<WeatherSample> {
        let start = self.at(station, start_time)?;
        let end = self.at(station, end_time)?;
        Ok(start.average(&end))
    }

    pub fn index(&self) -> &WeatherIndex {
        &self.index
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }
}
