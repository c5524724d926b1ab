use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "festival-sync", version, about = "Indie game festival sheet sync service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default if no subcommand given).
    Serve,

    /// Run one sync and print the JSON summary (for cron and other schedulers).
    Sync,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["festival-sync"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_sync_subcommand() {
        let cli = Cli::try_parse_from(["festival-sync", "sync"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Sync)));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["festival-sync", "migrate"]).is_err());
    }
}
