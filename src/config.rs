//! Configuration

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Default skips API base URL.
pub const DEFAULT_API_URL: &str = "https://app.wewantwaste.co.uk/api";

/// Default postcode used to look up skips.
pub const DEFAULT_POSTCODE: &str = "NR32";

/// Default area used to look up skips.
pub const DEFAULT_AREA: &str = "Lowestoft";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to fetch the catalog
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Skips API base URL
    #[arg(long = "api-url", env = "SKIPHIRE_API_URL", default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Postcode to look up skips for
    #[arg(long, env = "SKIPHIRE_POSTCODE", default_value = DEFAULT_POSTCODE)]
    pub postcode: String,

    /// Area to look up skips for
    #[arg(long, env = "SKIPHIRE_AREA", default_value = DEFAULT_AREA)]
    pub area: String,

    /// HTTP timeout in seconds
    #[arg(long, env = "SKIPHIRE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Read skips from a YAML fixture instead of the API
    #[arg(long, env = "SKIPHIRE_CATALOG_FIXTURE")]
    pub fixture: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            postcode: DEFAULT_POSTCODE.to_string(),
            area: DEFAULT_AREA.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fixture: None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Compact,

    /// Structured JSON output
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        catalog: CatalogConfig,

        #[command(flatten)]
        logging: LoggingConfig,
    }

    #[test]
    fn flags_override_defaults() -> Result<(), clap::Error> {
        let cli = TestCli::try_parse_from([
            "skiphire",
            "--postcode",
            "NR1",
            "--area",
            "Norwich",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.catalog.postcode, "NR1");
        assert_eq!(cli.catalog.area, "Norwich");
        assert_eq!(cli.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn default_matches_documented_endpoint() {
        let config = CatalogConfig::default();

        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.postcode, "NR32");
        assert_eq!(config.area, "Lowestoft");
        assert!(config.fixture.is_none());
    }
}
