use crate::config::toml_config::{DataSourceKind, TomlConfig};
use crate::domain::contract::CheckPriceRequest;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "fare-check")]
#[command(about = "Check airline base fares against regulated floor and ceiling prices")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the reference CSV tables
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Base URL serving the reference CSV tables
    #[arg(long, global = true, conflicts_with = "data_dir")]
    pub data_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check an offered fare against the regulated band
    Check(CheckArgs),
    /// List every airport present in the route tables
    Airports,
    /// List classified airlines and their service tier
    Airlines,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub origin: String,

    #[arg(long)]
    pub destination: String,

    #[arg(long)]
    pub airline: String,

    /// JET, SMALL_PROPELLER, BIG_PROPELLER or UNSPECIFIED
    #[arg(long, default_value = "UNSPECIFIED")]
    pub aircraft_type: String,

    /// Offered base fare, up to 8 digits
    #[arg(long)]
    pub offered_price: String,
}

impl CheckArgs {
    pub fn to_request(&self) -> CheckPriceRequest {
        CheckPriceRequest {
            origin: Some(self.origin.clone()),
            destination: Some(self.destination.clone()),
            airline: Some(self.airline.clone()),
            aircraft_type: Some(self.aircraft_type.clone()),
            offered_price: Some(serde_json::Value::String(self.offered_price.clone())),
        }
    }
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data.source = DataSourceKind::Local;
            config.data.path = Some(dir.clone());
        }

        if let Some(url) = &self.data_url {
            config.data.source = DataSourceKind::Http;
            config.data.url = Some(url.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = CliConfig::try_parse_from([
            "fare-check",
            "--data-dir",
            "./fixtures",
            "check",
            "--origin",
            "CGK",
            "--destination",
            "DPS",
            "--airline",
            "Garuda Indonesia",
            "--aircraft-type",
            "JET",
            "--offered-price",
            "1200000",
        ])
        .unwrap();

        let Command::Check(args) = &cli.command else {
            panic!("expected check command");
        };
        let query = args.to_request().into_query().unwrap();
        assert_eq!(query.offered_price, 1_200_000);

        let config = cli.resolve().unwrap();
        assert_eq!(config.data_path(), "./fixtures");
    }

    #[test]
    fn test_data_url_overrides_source() {
        let cli = CliConfig::try_parse_from([
            "fare-check",
            "airports",
            "--data-url",
            "https://reference.example.com",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(config.data.source, DataSourceKind::Http);
        assert_eq!(
            config.data.url.as_deref(),
            Some("https://reference.example.com")
        );
    }

    #[test]
    fn test_data_dir_and_url_conflict() {
        assert!(CliConfig::try_parse_from([
            "fare-check",
            "--data-dir",
            "a",
            "--data-url",
            "https://b",
            "airlines",
        ])
        .is_err());
    }
}
