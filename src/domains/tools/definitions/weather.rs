//! Weather lookup tool definition.
//!
//! Answers from a fixed table of cities. An unknown city is not an error:
//! the tool says so in its text result.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::{Tool, ToolError, ToolInvocationResult, ToolResult};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWeatherParams {
    /// City to look up, for example tokyo or osaka.
    pub city: String,
}

// ============================================================================
// Weather data
// ============================================================================

/// Current conditions for one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: &'static str,
    pub condition: &'static str,
    pub temperature_c: i32,
    pub humidity_pct: u8,
}

const REPORTS: &[WeatherReport] = &[
    WeatherReport {
        city: "tokyo",
        condition: "晴れ",
        temperature_c: 25,
        humidity_pct: 60,
    },
    WeatherReport {
        city: "osaka",
        condition: "曇り",
        temperature_c: 23,
        humidity_pct: 65,
    },
    WeatherReport {
        city: "sapporo",
        condition: "雨",
        temperature_c: 15,
        humidity_pct: 80,
    },
    WeatherReport {
        city: "fukuoka",
        condition: "晴れ",
        temperature_c: 27,
        humidity_pct: 55,
    },
];

// ============================================================================
// Tool Definition
// ============================================================================

/// Weather tool - reports condition, temperature and humidity for a city.
pub struct GetWeatherTool;

impl GetWeatherTool {
    /// Find the report for a city, case-insensitively.
    pub fn lookup(city: &str) -> Option<&'static WeatherReport> {
        let city = city.trim().to_lowercase();
        REPORTS.iter().find(|report| report.city == city)
    }

    /// Execute the lookup.
    #[instrument(skip_all, fields(city = %params.city))]
    pub fn execute(params: &GetWeatherParams) -> ToolResult<ToolInvocationResult> {
        let city = params.city.trim().to_lowercase();
        if city.is_empty() {
            return Err(ToolError::invalid_arguments("city must not be empty"));
        }

        info!("Weather tool called for city: {}", city);

        let text = match Self::lookup(&city) {
            Some(report) => format!(
                "{}: {}, {}°C, {}%",
                report.city, report.condition, report.temperature_c, report.humidity_pct
            ),
            None => format!("Weather information for {} is unavailable.", city),
        };

        Ok(ToolInvocationResult::text(text))
    }
}

#[async_trait]
impl Tool for GetWeatherTool {
    const NAME: &'static str = "get_weather";
    const DESCRIPTION: &'static str =
        "Get the current weather (condition, temperature, humidity) for a city.";

    type Params = GetWeatherParams;

    async fn call(&self, params: GetWeatherParams) -> ToolResult<ToolInvocationResult> {
        Self::execute(&params)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(city: &str) -> GetWeatherParams {
        GetWeatherParams {
            city: city.to_string(),
        }
    }

    #[test]
    fn test_known_city() {
        let result = GetWeatherTool::execute(&params("tokyo")).unwrap();
        assert_eq!(result.first_text(), Some("tokyo: 晴れ, 25°C, 60%"));
        assert!(!result.is_error);
    }

    #[test]
    fn test_city_is_case_insensitive() {
        let result = GetWeatherTool::execute(&params("  Sapporo ")).unwrap();
        assert_eq!(result.first_text(), Some("sapporo: 雨, 15°C, 80%"));
    }

    #[test]
    fn test_unknown_city_is_text_not_error() {
        let result = GetWeatherTool::execute(&params("atlantis")).unwrap();
        assert!(!result.is_error);
        assert_eq!(
            result.first_text(),
            Some("Weather information for atlantis is unavailable.")
        );
    }

    #[test]
    fn test_empty_city_rejected() {
        let err = GetWeatherTool::execute(&params("   ")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(GetWeatherTool::lookup("OSAKA").unwrap().temperature_c, 23);
        assert!(GetWeatherTool::lookup("paris").is_none());
    }
}
