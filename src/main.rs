//! scanview - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// scanview - TUI viewer for identity-scan CSV exports
#[derive(Parser, Debug)]
#[command(name = "scanview")]
#[command(version)]
#[command(about = "TUI application for viewing identity-scan CSV exports")]
pub struct Args {
    /// Path to the CSV export to view
    pub file: PathBuf,

    /// Start with a search query applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Payload lines shown while a row is collapsed (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub collapse_height: Option<u16>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Resolve configuration: defaults → config file → env vars → CLI args
    let config = {
        let config_file = scanview::config::load_config_with_precedence(args.config.clone())?;
        let merged = scanview::config::merge_config(config_file);
        let with_env = scanview::config::apply_env_overrides(merged);
        scanview::config::apply_cli_overrides(with_env, args.collapse_height)
    };

    scanview::logging::init(&config.log_file_path)?;

    info!(config = ?config, file = %args.file.display(), "configuration resolved");

    scanview::view::run(&args.file, config, args.search)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_does_not_error() {
        let result = Args::try_parse_from(["scanview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn version_does_not_error() {
        let result = Args::try_parse_from(["scanview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn file_argument_is_required() {
        let result = Args::try_parse_from(["scanview"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_path_populates_file_field() {
        let args = Args::parse_from(["scanview", "export.csv"]);
        assert_eq!(args.file, PathBuf::from("export.csv"));
        assert_eq!(args.search, None);
        assert_eq!(args.collapse_height, None);
        assert_eq!(args.config, None);
    }

    #[test]
    fn search_short_flag() {
        let args = Args::parse_from(["scanview", "export.csv", "-s", "error"]);
        assert_eq!(args.search, Some("error".to_string()));
    }

    #[test]
    fn search_long_flag() {
        let args = Args::parse_from(["scanview", "export.csv", "--search", "ref-1"]);
        assert_eq!(args.search, Some("ref-1".to_string()));
    }

    #[test]
    fn collapse_height_flag() {
        let args = Args::parse_from(["scanview", "export.csv", "--collapse-height", "4"]);
        assert_eq!(args.collapse_height, Some(4));
    }

    #[test]
    fn collapse_height_rejects_zero() {
        let result = Args::try_parse_from(["scanview", "export.csv", "--collapse-height", "0"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn config_path_flag() {
        let args = Args::parse_from(["scanview", "export.csv", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn combined_flags() {
        let args = Args::parse_from([
            "scanview",
            "export.csv",
            "-s",
            "abc",
            "--collapse-height",
            "6",
        ]);
        assert_eq!(args.file, PathBuf::from("export.csv"));
        assert_eq!(args.search, Some("abc".to_string()));
        assert_eq!(args.collapse_height, Some(6));
    }
}
