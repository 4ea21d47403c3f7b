pub mod config;
pub mod data_io;
pub mod error;
pub mod field;
pub mod math;
pub mod parallel;
pub mod stations;
pub mod time_utils;

pub use error::{Result, WeatherError};
pub use field::{WeatherField, WeatherSample};
