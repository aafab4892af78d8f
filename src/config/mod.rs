mod cli;
mod file;

pub use cli::{Cli, Command};
pub use file::FileConfig;

use serde::Deserialize;
use std::time::Duration;

use crate::device::{DeviceKind, DeviceProfile};
use crate::orientation::Orientation;
use crate::pointer::{Button, Positioning};

const DEFAULT_DOUBLE_CLICK_MS: u64 = 500;

/// Which pointer button each pen control drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bindings {
    /// Nib touching the screen.
    pub tip: Button,
    /// Lower barrel button.
    pub stylus: Button,
    /// Upper barrel button.
    pub stylus2: Button,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            tip: Button::Left,
            stylus: Button::Right,
            stylus2: Button::Middle,
        }
    }
}

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: String,
    pub device: DeviceKind,
    pub orientation: Orientation,
    pub positioning: Positioning,
    pub double_click_ms: u64,
    pub buttons: Bindings,
    pub dump: bool,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();
        Self::merge(cli, file_config)
    }

    /// Apply CLI overrides on top of an already-loaded file config.
    pub fn merge(cli: &Cli, file_config: FileConfig) -> Self {
        Self {
            input: cli
                .input
                .clone()
                .or(file_config.input)
                .unwrap_or_else(|| "-".into()),
            device: cli.device.unwrap_or(file_config.device),
            orientation: cli.orientation.unwrap_or(file_config.orientation),
            positioning: cli.positioning.unwrap_or(file_config.positioning),
            double_click_ms: cli
                .double_click_ms
                .or(file_config.double_click_ms)
                .unwrap_or(DEFAULT_DOUBLE_CLICK_MS),
            buttons: file_config.buttons,
            dump: matches!(cli.command, Some(Command::Dump)),
        }
    }

    pub fn profile(&self) -> &'static DeviceProfile {
        self.device.profile()
    }

    pub fn double_click_interval(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.input.trim().is_empty() {
            return Err("Input path must not be empty");
        }
        if self.double_click_ms == 0 {
            return Err("Double-click interval must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["rm-pointer"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    fn load(args: &[&str], toml: &str) -> Config {
        Config::merge(&cli(args), file::parse(toml).unwrap())
    }

    #[test]
    fn test_cli_overrides() {
        let config = load(
            &[
                "--input",
                "/dev/input/event7",
                "--device",
                "rmpp",
                "--positioning",
                "relative",
                "--double-click-ms",
                "250",
            ],
            r#"
            device = "rm2"
            double_click_ms = 900
            "#,
        );

        assert_eq!(config.input, "/dev/input/event7");
        assert_eq!(config.device, DeviceKind::Rmpp);
        assert_eq!(config.positioning, Positioning::Relative);
        assert_eq!(config.double_click_interval(), Duration::from_millis(250));
        assert!(!config.reads_stdin());
        assert!(!config.dump);
    }

    #[test]
    fn test_dump_subcommand() {
        let config = load(&["dump"], "");
        assert!(config.dump);
        assert!(config.reads_stdin());
    }

    #[test]
    fn test_file_values_fill_in_missing_flags() {
        let config = load(
            &[],
            r#"
            input = "/dev/input/event1"
            positioning = "relative"
            double_click_ms = 300

            [buttons]
            stylus = "back"
            "#,
        );

        assert_eq!(config.input, "/dev/input/event1");
        assert_eq!(config.positioning, Positioning::Relative);
        assert_eq!(config.double_click_ms, 300);
        assert_eq!(config.buttons.stylus, Button::Back);
        assert_eq!(config.buttons.tip, Button::Left);
    }

    #[test]
    fn test_validate() {
        let mut config = load(&[], "");
        assert!(config.validate().is_ok());

        config.input = " ".into();
        assert!(config.validate().is_err());

        config.input = "-".into();
        config.double_click_ms = 0;
        assert!(config.validate().is_err());
    }
}
