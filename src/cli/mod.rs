//! Command-line interface for the CeresDB shell
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and flag overrides
//! - The startup banner

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::connection::Credentials;
use crate::error::Result;

/// CeresDB client
#[derive(Parser, Debug)]
#[command(
    name = "ceresdb-cli",
    version,
    about = "Interactive client for CeresDB",
    long_about = "Interactive client for CeresDB. Connects to the instance at HOST:PORT as \
USERNAME and reads queries until \"exit\" or Ctrl-D."
)]
pub struct CliArgs {
    /// Username to authenticate as
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Password for USERNAME (use `--` before it if it starts with '-')
    #[arg(value_name = "PASSWORD")]
    pub password: String,

    /// Hostname of the instance
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Port the instance listens on
    #[arg(value_name = "PORT")]
    pub port: u16,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output and highlighting
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (no banner, errors only in logs)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration with flag overrides applied
    config: Config,
}

impl CliInterface {
    /// Create a CLI interface from parsed arguments
    ///
    /// # Arguments
    /// * `args` - Parsed command-line arguments
    ///
    /// # Returns
    /// * `Result<Self>` - CLI interface or a configuration error
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, &args);
        Ok(Self { args, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Credentials and address given on the command line
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.args.username.as_str(),
            self.args.password.as_str(),
            self.args.host.as_str(),
            self.args.port,
        )
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
            config.display.syntax_highlighting = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Print the startup banner unless in quiet mode
    pub fn print_banner(&self) -> io::Result<()> {
        if self.args.quiet {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        write_banner(&mut stdout)?;
        stdout.flush()
    }
}

/// Write the startup banner
pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "CeresDB client ({})", crate::VERSION)?;
    writeln!(out, "Type \"exit\" to quit")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> std::result::Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("ceresdb-cli").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_args() {
        let args = parse(&["admin", "secret", "localhost", "7437"]).unwrap();
        assert_eq!(args.username, "admin");
        assert_eq!(args.password, "secret");
        assert_eq!(args.host, "localhost");
        assert_eq!(args.port, 7437);
        assert!(!args.quiet);
        assert!(args.config_file.is_none());
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "--no-color",
            "-v",
            "-c",
            "/tmp/ceres.toml",
            "admin",
            "secret",
            "db.local",
            "80",
        ])
        .unwrap();
        assert!(args.no_color);
        assert!(args.verbose);
        assert_eq!(args.config_file, Some(PathBuf::from("/tmp/ceres.toml")));
    }

    #[test]
    fn test_missing_args_is_error() {
        let err = parse(&["admin", "secret", "localhost"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_non_numeric_port_is_error() {
        let err = parse(&["admin", "secret", "localhost", "http"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_out_of_range_port_is_error() {
        let err = parse(&["admin", "secret", "localhost", "70000"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_extra_args_is_error() {
        let err = parse(&["admin", "secret", "localhost", "7437", "extra"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_anywhere() {
        for args in [
            &["-h"][..],
            &["admin", "--help"][..],
            &["admin", "secret", "localhost", "7437", "-h"][..],
        ] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert!(!err.use_stderr());
        }
    }

    #[test]
    fn test_version_flag() {
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_password_with_leading_dash() {
        let args = parse(&["admin", "--", "-secret", "localhost", "7437"]).unwrap();
        assert_eq!(args.password, "-secret");
    }

    #[test]
    fn test_apply_args_to_config() {
        let args = parse(&["--no-color", "--vv", "u", "p", "h", "1"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert!(!config.display.color_output);
        assert!(!config.display.syntax_highlighting);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_quiet_lowers_logging() {
        let args = parse(&["-q", "u", "p", "h", "1"]).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_credentials() {
        let cli = CliInterface {
            args: parse(&["admin", "secret", "localhost", "7437"]).unwrap(),
            config: Config::default(),
        };
        assert_eq!(
            cli.credentials(),
            Credentials::new("admin", "secret", "localhost", 7437)
        );
    }

    #[test]
    fn test_banner() {
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CeresDB client (1.0.0)\nType \"exit\" to quit\n\n"
        );
    }
}
