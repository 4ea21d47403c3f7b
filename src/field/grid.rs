use crate::data_io::{Channel, ChannelValues, MeasurementRecord, CHANNEL_COUNT};
use crate::error::{Result, WeatherError};
use crate::math::{bilin_interp, find_grid_indices, BoundaryPolicy};
use ndarray::{s, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};

/// Reshapes flat per-row weather records into a (time, station) grid.
///
/// Rows must be laid out in time blocks: the first `station_count` rows hold
/// every station at the first time sample, the next block the second time
/// sample, and so on.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder {
    station_count: usize,
}

impl GridBuilder {
    pub fn new(station_count: usize) -> Self {
        Self { station_count }
    }

    pub fn station_count(&self) -> usize {
        self.station_count
    }

    pub fn build(&self, records: &[MeasurementRecord]) -> Result<WeatherGrid> {
        let stations = self.station_count;
        if stations == 0 {
            return Err(WeatherError::MalformedGrid(
                "station count must be positive".to_string(),
            ));
        }
        if records.is_empty() {
            return Err(WeatherError::MalformedGrid("no data rows".to_string()));
        }
        if records.len() % stations != 0 {
            return Err(WeatherError::MalformedGrid(format!(
                "{} rows is not a multiple of {} stations",
                records.len(),
                stations
            )));
        }

        let samples = records.len() / stations;
        let station_axis: Vec<f64> = records[..stations].iter().map(|r| r.station_index).collect();
        let time_axis: Vec<f64> = records.chunks_exact(stations).map(|b| b[0].time).collect();

        let mut values = Array3::<f64>::zeros((samples, stations, CHANNEL_COUNT));
        for (i, block) in records.chunks_exact(stations).enumerate() {
            for (j, record) in block.iter().enumerate() {
                if record.station_index != station_axis[j] {
                    return Err(WeatherError::MalformedGrid(format!(
                        "row {} has station {} but position {} of each block is station {}",
                        i * stations + j + 1,
                        record.station_index,
                        j,
                        station_axis[j]
                    )));
                }
                let channels = record.channels();
                values
                    .slice_mut(s![i, j, ..])
                    .assign(&ArrayView1::from(&channels[..]));
            }
        }

        WeatherGrid::from_parts(time_axis, station_axis, values)
    }
}

/// Bilinear interpolant over one weather file's (time, station) grid.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherGrid {
    time_axis: Vec<f64>,
    station_axis: Vec<f64>,
    /// [time, station, channel]
    values: Array3<f64>,
}

impl WeatherGrid {
    /// Assemble a grid from its axes and value table, checking that the
    /// shapes agree and both axes are strictly increasing.
    pub fn from_parts(
        time_axis: Vec<f64>,
        station_axis: Vec<f64>,
        values: Array3<f64>,
    ) -> Result<Self> {
        let expected = (time_axis.len(), station_axis.len(), CHANNEL_COUNT);
        if values.dim() != expected {
            return Err(WeatherError::MalformedGrid(format!(
                "value table has shape {:?}, axes require {:?}",
                values.dim(),
                expected
            )));
        }
        if time_axis.is_empty() || station_axis.is_empty() {
            return Err(WeatherError::MalformedGrid("grid has an empty axis".to_string()));
        }
        check_increasing(&time_axis, "time")?;
        check_increasing(&station_axis, "station")?;

        Ok(Self {
            time_axis,
            station_axis,
            values,
        })
    }

    /// Earliest timestamp covered by this grid
    pub fn start_time(&self) -> f64 {
        self.time_axis[0]
    }

    /// Latest sampled timestamp
    pub fn end_time(&self) -> f64 {
        self.time_axis[self.time_axis.len() - 1]
    }

    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    pub fn station_axis(&self) -> &[f64] {
        &self.station_axis
    }

    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// `(time samples, stations)`
    pub fn shape(&self) -> (usize, usize) {
        (self.time_axis.len(), self.station_axis.len())
    }

    /// One channel as a [time, station] table
    pub fn channel(&self, channel: Channel) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(2), channel.index())
    }

    /// Evaluate every channel at `(time, station)`, extrapolating linearly
    /// past the grid edges.
    pub fn evaluate(&self, time: f64, station: f64) -> ChannelValues {
        self.evaluate_with(time, station, BoundaryPolicy::Extrapolate)
    }

    pub fn evaluate_with(&self, time: f64, station: f64, policy: BoundaryPolicy) -> ChannelValues {
        let (t0, t1, fac_t) = find_grid_indices(&self.time_axis, time, policy);
        let (s0, s1, fac_s) = find_grid_indices(&self.station_axis, station, policy);
        let v = &self.values;

        std::array::from_fn(|c| {
            bilin_interp(
                v[[t0, s0, c]],
                v[[t0, s1, c]],
                v[[t1, s0, c]],
                v[[t1, s1, c]],
                fac_t,
                fac_s,
            )
        })
    }
}

fn check_increasing(axis: &[f64], name: &str) -> Result<()> {
    if let Some(k) = axis.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(WeatherError::MalformedGrid(format!(
            "{} axis is not strictly increasing at index {} ({} then {})",
            name,
            k + 1,
            axis[k],
            axis[k + 1]
        )));
    }
    Ok(())
}
