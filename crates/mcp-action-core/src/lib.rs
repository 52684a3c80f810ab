//! mcp-action core: project options, safe arithmetic, mock weather data and prompt templates.

pub mod calculator;
pub mod format;
pub mod scaffold;
pub mod template;
pub mod types;
pub mod weather;

pub use calculator::{evaluate, NumberFormat};
pub use scaffold::{normalize_project_name, Feature, ProjectOptions};
pub use types::*;
pub use weather::WeatherReport;
