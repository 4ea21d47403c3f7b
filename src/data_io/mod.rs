pub mod cache;
pub mod reader;

pub use cache::*;
pub use reader::*;

use std::fmt;

/// Number of channels carried by a weather grid
pub const CHANNEL_COUNT: usize = 6;

/// Interpolated channel values in `Channel` order
pub type ChannelValues = [f64; CHANNEL_COUNT];

/// Channels stored in a weather grid, in value-table order.
///
/// DHI and DNI are parsed from the source files but never queried, so they
/// do not get a slot in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Ghi = 0,
    WindNs = 1,
    WindEw = 2,
    AirTemp = 3,
    Pressure = 4,
    AirDensity = 5,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Ghi,
        Channel::WindNs,
        Channel::WindEw,
        Channel::AirTemp,
        Channel::Pressure,
        Channel::AirDensity,
    ];

    /// Position of this channel along the last axis of the value table
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn units(self) -> &'static str {
        match self {
            Channel::Ghi => "W/m²",
            Channel::WindNs | Channel::WindEw => "m/s",
            Channel::AirTemp => "°C",
            Channel::Pressure => "hPa",
            Channel::AirDensity => "kg/m³",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Ghi => "ghi",
            Channel::WindNs => "wind_ns",
            Channel::WindEw => "wind_ew",
            Channel::AirTemp => "air_temp",
            Channel::Pressure => "surface_pressure",
            Channel::AirDensity => "air_density",
        };
        write!(f, "{}", name)
    }
}

/// One row of a weather CSV file: a single (station, time) sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRecord {
    /// Weather group / station index
    pub station_index: f64,
    /// Unix time (seconds)
    pub time: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub dhi: f64,
    /// Direct normal irradiance (W/m²)
    pub dni: f64,
    /// Global horizontal irradiance (W/m²)
    pub ghi: f64,
    /// North-south wind component (m/s)
    pub wind_ns: f64,
    /// East-west wind component (m/s)
    pub wind_ew: f64,
    /// Air temperature (°C)
    pub air_temp: f64,
    pub surface_pressure: f64,
    pub air_density: f64,
}

impl MeasurementRecord {
    /// The gridded channels of this record, in `Channel` order
    pub fn channels(&self) -> ChannelValues {
        [
            self.ghi,
            self.wind_ns,
            self.wind_ew,
            self.air_temp,
            self.surface_pressure,
            self.air_density,
        ]
    }
}
