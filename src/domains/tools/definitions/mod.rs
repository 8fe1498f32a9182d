//! Tool definitions module.
//!
//! Each tool is defined in its own file and registered in `registry.rs`.

pub mod weather;

pub use weather::{GetWeatherParams, GetWeatherTool, WeatherReport};
