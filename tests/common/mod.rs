#![allow(dead_code)]

use solar_weather::data_io::MeasurementRecord;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const HEADER: &str =
    "weather_group,time,dhi,dni,ghi,wind_ns,wind_ew,air_temp,surface_pressure,air_density";

/// Deterministic, non-round channel values for node (i, j)
pub fn record_at(station: f64, time: f64, i: usize, j: usize) -> MeasurementRecord {
    let x = (i as f64 + 1.0) * 0.731 + (j as f64 + 1.0) * 1.137;
    MeasurementRecord {
        station_index: station,
        time,
        dhi: 50.0 + x,
        dni: 600.0 + x,
        ghi: 100.0 * x.sin().abs() + 7.0 * x,
        wind_ns: x.cos() * 3.3,
        wind_ew: -x.sin() * 2.1,
        air_temp: 20.0 + x / 3.0,
        surface_pressure: 1000.0 + x.sqrt(),
        air_density: 1.1 + x / 97.0,
    }
}

/// Records in time-block order for the given axes
pub fn records_for(times: &[f64], stations: &[f64]) -> Vec<MeasurementRecord> {
    let mut records = Vec::with_capacity(times.len() * stations.len());
    for (i, &time) in times.iter().enumerate() {
        for (j, &station) in stations.iter().enumerate() {
            records.push(record_at(station, time, i, j));
        }
    }
    records
}

/// Write records as a weather CSV. Values use `{:?}` so they round-trip
/// exactly through text.
pub fn write_csv(dir: &Path, name: &str, records: &[MeasurementRecord]) -> PathBuf {
    let mut contents = String::new();
    writeln!(contents, "{}", HEADER).unwrap();
    for r in records {
        writeln!(
            contents,
            "{:?},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{:?}",
            r.station_index,
            r.time,
            r.dhi,
            r.dni,
            r.ghi,
            r.wind_ns,
            r.wind_ew,
            r.air_temp,
            r.surface_pressure,
            r.air_density
        )
        .unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Records with every channel set to `value`, for files whose grids must be
/// told apart easily
pub fn flat_records(times: &[f64], stations: &[f64], value: f64) -> Vec<MeasurementRecord> {
    let mut records = Vec::new();
    for &time in times {
        for &station in stations {
            records.push(MeasurementRecord {
                station_index: station,
                time,
                dhi: value,
                dni: value,
                ghi: value,
                wind_ns: value,
                wind_ew: value,
                air_temp: value,
                surface_pressure: value,
                air_density: value,
            });
        }
    }
    records
}
