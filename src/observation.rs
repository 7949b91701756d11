//! Observation record
//!
//! One decoded data row. Built fresh from disk on every lookup and never
//! cached by the store.

use crate::series::{FIELD_COUNT, MISSING_VALUE};
use crate::temporal::TemporalKey;

/// A decoded observation row
///
/// Missing measurements hold [`MISSING_VALUE`] (`-1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    /// Timestamp, taken from the index key rather than re-parsed from the row
    pub key: TemporalKey,

    /// Total precipitation (mm)
    pub precipitation_total: f64,
    /// Station atmospheric pressure (mB)
    pub pressure: f64,
    pub pressure_max: f64,
    pub pressure_min: f64,
    /// Global radiation (kJ/m²)
    pub global_radiation: f64,
    /// Dry-bulb air temperature (°C)
    pub air_temperature: f64,
    /// Dew point temperature (°C)
    pub dew_point: f64,
    pub air_temperature_max: f64,
    pub air_temperature_min: f64,
    pub dew_point_max: f64,
    pub dew_point_min: f64,
    /// Relative humidity (%)
    pub humidity_max: f64,
    pub humidity_min: f64,
    pub humidity: f64,
    /// Wind direction (degrees)
    pub wind_direction: f64,
    /// Wind gust (m/s)
    pub wind_gust: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
}

impl Observation {
    /// Measurement names in the order the columns appear in the file
    pub const FIELD_NAMES: [&'static str; FIELD_COUNT] = [
        "precipitation_total",
        "pressure",
        "pressure_max",
        "pressure_min",
        "global_radiation",
        "air_temperature",
        "dew_point",
        "air_temperature_max",
        "air_temperature_min",
        "dew_point_max",
        "dew_point_min",
        "humidity_max",
        "humidity_min",
        "humidity",
        "wind_direction",
        "wind_gust",
        "wind_speed",
    ];

    /// Build from measurements given in file column order
    pub fn from_values(key: TemporalKey, values: [f64; FIELD_COUNT]) -> Self {
        let [
            precipitation_total,
            pressure,
            pressure_max,
            pressure_min,
            global_radiation,
            air_temperature,
            dew_point,
            air_temperature_max,
            air_temperature_min,
            dew_point_max,
            dew_point_min,
            humidity_max,
            humidity_min,
            humidity,
            wind_direction,
            wind_gust,
            wind_speed,
        ] = values;

        Self {
            key,
            precipitation_total,
            pressure,
            pressure_max,
            pressure_min,
            global_radiation,
            air_temperature,
            dew_point,
            air_temperature_max,
            air_temperature_min,
            dew_point_max,
            dew_point_min,
            humidity_max,
            humidity_min,
            humidity,
            wind_direction,
            wind_gust,
            wind_speed,
        }
    }

    /// Measurements in file column order (matches `FIELD_NAMES`)
    pub fn values(&self) -> [f64; FIELD_COUNT] {
        [
            self.precipitation_total,
            self.pressure,
            self.pressure_max,
            self.pressure_min,
            self.global_radiation,
            self.air_temperature,
            self.dew_point,
            self.air_temperature_max,
            self.air_temperature_min,
            self.dew_point_max,
            self.dew_point_min,
            self.humidity_max,
            self.humidity_min,
            self.humidity,
            self.wind_direction,
            self.wind_gust,
            self.wind_speed,
        ]
    }

    /// Look up a measurement by name
    pub fn value(&self, name: &str) -> Option<f64> {
        Self::FIELD_NAMES
            .iter()
            .position(|field| *field == name)
            .map(|i| self.values()[i])
    }

    /// True for the decoded missing-value sentinel
    pub fn is_missing(value: f64) -> bool {
        value == MISSING_VALUE
    }
}
