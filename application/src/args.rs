//! [`Args`] definitions.

use clap::Parser;

use crate::console;

/// Admin console of the booking pricing and quotes.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    /// Console command to run.
    #[command(subcommand)]
    pub command: console::Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use crate::console::{self, sizes};

    use super::Args;

    #[test]
    fn parses_nested_subcommands() {
        let args = Args::try_parse_from([
            "console", "sizes", "derive", "500", "1500", "+", "--config",
            "local.toml",
        ])
        .unwrap();

        assert_eq!(args.config, "local.toml");
        assert!(matches!(
            args.command,
            console::Command::Sizes(sizes::Command::Derive { ref rows })
                if rows == &["500", "1500", "+"],
        ));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(
            Args::try_parse_from(["console", "quote", "show", "not-an-id"])
                .is_err(),
        );
    }
}
