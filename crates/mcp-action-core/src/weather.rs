//! Mock weather data. Randomized values with a fixed shape; never a network call.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};

use crate::format::number_to_string;

pub const BASELINE_TEMPERATURE_C: f64 = 18.0;
pub const MOCK_SOURCE: &str = "Mock Weather Service (replace with real API)";

pub const CONDITIONS: [&str; 8] = [
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Light Rain",
    "Scattered Showers",
    "Clear",
    "Overcast",
    "Drizzle",
];

#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub condition: String,
    pub humidity: String,
    pub wind_speed: String,
    pub pressure: String,
    pub visibility: String,
    pub uv_index: u8,
}

/// One generated report. Serializes to the `raw_data` metadata shape.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    pub last_updated: String,
    pub source: String,
    #[serde(skip)]
    readings: Readings,
    #[serde(skip)]
    generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct Readings {
    humidity: u32,
    wind_speed: u32,
    pressure: u32,
}

impl WeatherReport {
    /// Generate a report for `city`: temperature 18 ± 10 °C to one decimal,
    /// humidity 40–79 %, wind 5–19 km/h, pressure 1000–1029 hPa,
    /// visibility 10–14 km, UV index 1–8.
    pub fn generate<R: Rng + ?Sized>(city: &str, rng: &mut R, now: DateTime<Utc>) -> Self {
        let variation = (rng.gen::<f64>() - 0.5) * 20.0;
        let temperature = ((BASELINE_TEMPERATURE_C + variation) * 10.0).round() / 10.0;
        let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

        let readings = Readings {
            humidity: rng.gen_range(40..80),
            wind_speed: rng.gen_range(5..20),
            pressure: rng.gen_range(1000..1030),
        };
        let visibility: u32 = rng.gen_range(10..15);
        let uv_index: u8 = rng.gen_range(1..9);

        Self {
            city: city.to_string(),
            country: "Sample Country".to_string(),
            current: CurrentConditions {
                temperature,
                condition: condition.to_string(),
                humidity: format!("{}%", readings.humidity),
                wind_speed: format!("{} km/h", readings.wind_speed),
                pressure: format!("{} hPa", readings.pressure),
                visibility: format!("{visibility} km"),
                uv_index,
            },
            last_updated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: MOCK_SOURCE.to_string(),
            readings,
            generated_at: now,
        }
    }

    /// Human-readable block, labeled as example data.
    pub fn render_text(&self) -> String {
        let current = &self.current;
        let mut text = format!("🌤️ Weather for {}\n", self.city);
        text.push_str("⚠️ **EXAMPLE DATA - NOT REAL WEATHER** ⚠️\n\n");
        text.push_str(&format!(
            "🌡️ Temperature: {}°C\n",
            number_to_string(current.temperature)
        ));
        text.push_str(&format!("☁️ Conditions: {}\n", current.condition));
        text.push_str(&format!("💧 Humidity: {}%\n", self.readings.humidity));
        text.push_str(&format!("💨 Wind: {} km/h\n", self.readings.wind_speed));
        text.push_str(&format!("📊 Pressure: {} hPa\n", self.readings.pressure));
        text.push_str(&format!("👁️ Visibility: {}\n", current.visibility));
        text.push_str(&format!("☀️ UV Index: {}\n", current.uv_index));
        text.push_str(&format!(
            "\n⏰ Last Updated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        text.push_str(
            "\n\n💡 Note: This is mock/example data for demonstration purposes only. \
             Replace with real weather API calls in production.",
        );
        text
    }

    /// Structured metadata attached to the tool result.
    pub fn metadata(&self) -> Value {
        json!({
            "source": "mock-weather-service",
            "city": self.city,
            "timestamp": self.last_updated,
            "raw_data": self,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numeric_prefix(s: &str) -> u32 {
        s.split(|c: char| !c.is_ascii_digit())
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap()
    }

    #[test]
    fn test_ranges_hold_across_seeds() {
        let now = Utc::now();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let report = WeatherReport::generate("Lisbon", &mut rng, now);
            let c = &report.current;

            assert!((8.0..=28.0).contains(&c.temperature), "temp {}", c.temperature);
            assert!(CONDITIONS.contains(&c.condition.as_str()));
            assert!((40..80).contains(&numeric_prefix(&c.humidity)));
            assert!((5..20).contains(&numeric_prefix(&c.wind_speed)));
            assert!((1000..1030).contains(&numeric_prefix(&c.pressure)));
            assert!((10..15).contains(&numeric_prefix(&c.visibility)));
            assert!((1..=8).contains(&c.uv_index));
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let now = Utc::now();
        let a = WeatherReport::generate("Oslo", &mut StdRng::seed_from_u64(7), now);
        let b = WeatherReport::generate("Oslo", &mut StdRng::seed_from_u64(7), now);
        assert_eq!(a.render_text(), b.render_text());
    }

    #[test]
    fn test_text_is_labeled_mock() {
        let report = WeatherReport::generate("Tokyo", &mut StdRng::seed_from_u64(1), Utc::now());
        let text = report.render_text();
        assert!(text.starts_with("🌤️ Weather for Tokyo"));
        assert!(text.contains("EXAMPLE DATA - NOT REAL WEATHER"));
        assert!(text.contains(&report.current.condition));
    }

    #[test]
    fn test_metadata_shape() {
        let report = WeatherReport::generate("Lima", &mut StdRng::seed_from_u64(3), Utc::now());
        let meta = report.metadata();
        assert_eq!(meta["source"], "mock-weather-service");
        assert_eq!(meta["city"], "Lima");
        assert_eq!(meta["raw_data"]["country"], "Sample Country");
        assert_eq!(meta["raw_data"]["source"], MOCK_SOURCE);
        assert!(meta["raw_data"]["current"]["uv_index"].is_u64());
        assert!(meta["raw_data"].get("readings").is_none());
    }
}
