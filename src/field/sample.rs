use crate::data_io::{Channel, ChannelValues};
use crate::math::midpoint;

/// Horizontal wind as Cartesian components (m/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindVector {
    pub north_south: f64,
    pub east_west: f64,
}

impl WindVector {
    pub fn speed(&self) -> f64 {
        self.north_south.hypot(self.east_west)
    }

    /// Direction the wind vector points to, clockwise from north, in [0, 360)
    pub fn bearing_degrees(&self) -> f64 {
        self.east_west.atan2(self.north_south).to_degrees().rem_euclid(360.0)
    }
}

/// Weather at one station and time, as handed to the vehicle model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    /// Global horizontal irradiance (W/m²)
    pub ghi: f64,
    pub wind: WindVector,
    /// Air temperature (°C)
    pub air_temp: f64,
    pub pressure: f64,
    pub air_density: f64,
    /// Reciprocal speed of sound (s/m); a constant, never interpolated
    pub inverse_speed_of_sound: f64,
}

impl WeatherSample {
    pub fn from_channels(values: &ChannelValues, inverse_speed_of_sound: f64) -> Self {
        Self {
            ghi: values[Channel::Ghi.index()],
            wind: WindVector {
                north_south: values[Channel::WindNs.index()],
                east_west: values[Channel::WindEw.index()],
            },
            air_temp: values[Channel::AirTemp.index()],
            pressure: values[Channel::Pressure.index()],
            air_density: values[Channel::AirDensity.index()],
            inverse_speed_of_sound,
        }
    }

    /// Field-wise arithmetic mean of two samples
    pub fn average(&self, other: &WeatherSample) -> WeatherSample {
        WeatherSample {
            ghi: midpoint(self.ghi, other.ghi),
            wind: WindVector {
                north_south: midpoint(self.wind.north_south, other.wind.north_south),
                east_west: midpoint(self.wind.east_west, other.wind.east_west),
            },
            air_temp: midpoint(self.air_temp, other.air_temp),
            pressure: midpoint(self.pressure, other.pressure),
            air_density: midpoint(self.air_density, other.air_density),
            inverse_speed_of_sound: midpoint(self.inverse_speed_of_sound, other.inverse_speed_of_sound),
        }
    }
}
