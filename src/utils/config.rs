use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/GDP-data.json";

/// Fixed geometry of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Gap left between adjacent bars
    pub bar_padding: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        ChartLayout {
            width: 800.0,
            height: 400.0,
            padding: 60.0,
            bar_padding: 1.0,
        }
    }
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub source_url: String,
    pub output_dir: PathBuf,
    pub png_preview: bool,
    pub layout: ChartLayout,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_dir: PathBuf::from("out"),
            png_preview: true,
            layout: ChartLayout::default(),
        }
    }
}

impl ChartConfig {
    /// Override defaults from `GDP_SOURCE_URL`, `CHART_OUTPUT_DIR` and
    /// `CHART_PNG_PREVIEW`. Call after `.env` has been loaded.
    pub fn from_env() -> Self {
        let mut config = ChartConfig::default();

        if let Ok(url) = std::env::var("GDP_SOURCE_URL") {
            config.source_url = url;
        }
        if let Ok(dir) = std::env::var("CHART_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(flag) = std::env::var("CHART_PNG_PREVIEW") {
            match parse_flag(&flag) {
                Some(value) => config.png_preview = value,
                None => warn!("Ignoring CHART_PNG_PREVIEW='{}', expected true/false", flag),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ChartConfig::default();
        assert_eq!(config.layout.width, 800.0);
        assert_eq!(config.layout.height, 400.0);
        assert_eq!(config.layout.padding, 60.0);
        assert_eq!(config.layout.bar_padding, 1.0);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
