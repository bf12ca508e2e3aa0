//! Command line arguments

use crate::config::Config;
use crate::model::table::PAGE_SIZE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "inventory-tui",
    version,
    about = "Terminal view for inventory records: kits, spare parts, returns and replacements"
)]
pub struct Cli {
    /// Dataset snapshot to load (.json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// File submissions are appended to, one JSON object per line
    #[arg(short, long, value_name = "FILE")]
    pub outbox: Option<PathBuf>,

    /// Config file to read instead of ~/.inventory-tui/config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rows per page for long tables
    #[arg(long, value_name = "ROWS", value_parser = clap::value_parser!(usize))]
    pub page_size: Option<usize>,

    /// Re-apply earlier outbox submissions to the loaded records
    #[arg(long)]
    pub replay: bool,

    /// Log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directory CSV exports are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config file, then command line overrides
    pub fn resolve_config(&self) -> Config {
        let base = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        self.apply(base.unwrap_or_default())
    }

    pub fn apply(&self, mut config: Config) -> Config {
        if config.page_size == 0 {
            config.page_size = PAGE_SIZE;
        }
        if let Some(data) = &self.data {
            config.data_file = Some(data.display().to_string());
        }
        if let Some(outbox) = &self.outbox {
            config.outbox_path = Some(outbox.display().to_string());
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.display().to_string());
        }
        if let Some(page_size) = self.page_size.filter(|n| *n > 0) {
            config.page_size = page_size;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["inventory-tui"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.replay);
        assert_eq!(cli.export_dir, PathBuf::from("."));
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["inventory-tui", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "inventory-tui",
            "--data",
            "stock.yaml",
            "--page-size",
            "20",
            "--outbox",
            "/tmp/out.jsonl",
        ])
        .unwrap();
        let config = cli.apply(Config {
            page_size: 10,
            ..Default::default()
        });
        assert_eq!(config.page_size, 20);
        assert_eq!(config.data_file.as_deref(), Some("stock.yaml"));
        assert_eq!(config.outbox_path(), PathBuf::from("/tmp/out.jsonl"));
    }

    #[test]
    fn test_zero_page_size_ignored() {
        let cli = Cli::try_parse_from(["inventory-tui", "--page-size", "0"]).unwrap();
        assert_eq!(cli.apply(Config::default()).page_size, Config::default().page_size);
    }

    #[test]
    fn test_resolve_reads_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 7, "show_created_at": false}"#).unwrap();

        let cli = Cli::try_parse_from(["inventory-tui", "-c", path.to_str().unwrap()]).unwrap();
        let config = cli.resolve_config();
        assert_eq!(config.page_size, 7);
        assert!(!config.show_created_at);
    }

    #[test]
    fn test_zero_page_size_in_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 0}"#).unwrap();

        let cli = Cli::try_parse_from(["inventory-tui", "-c", path.to_str().unwrap()]).unwrap();
        assert_eq!(cli.resolve_config().page_size, PAGE_SIZE);

        let cli = Cli::try_parse_from([
            "inventory-tui",
            "-c",
            path.to_str().unwrap(),
            "--page-size",
            "15",
        ])
        .unwrap();
        assert_eq!(cli.resolve_config().page_size, 15);
    }
}
