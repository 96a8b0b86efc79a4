//! CLI definitions using clap derive API

use clap::builder::{RangedU64ValueParser, Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// itg-cli - ITGmania pack and song manager
#[derive(Parser, Debug)]
#[command(
    name = "itg-cli",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Add packs and songs to ITGmania from folders, archives, and links",
    long_about = "itg-cli adds song packs and single songs to an ITGmania (or StepMania) \
                  library from local folders, zip/tar archives, or download links, keeps \
                  course folders and the song cache in step, and can hide songs from \
                  players by censoring them.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  itg-cli add-pack https://example.com/MyPack.zip\n    \
                  itg-cli add-pack ~/Downloads/MyPack\n    \
                  itg-cli add-song ./Song.zip --overwrite\n    \
                  itg-cli censor ~/.itgmania/Songs/MyPack/Song\n    \
                  itg-cli uncensor"
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/itg-cli/config.yaml)
    #[arg(long, short = 'c', global = true, env = "ITG_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a pack from a folder, archive, or link
    AddPack(AddArgs),

    /// Add a single song to the singles folder
    AddSong(AddArgs),

    /// Hide a song by moving it to <packs>/.censored
    Censor(CensorArgs),

    /// Restore a censored song
    Uncensor(UncensorArgs),

    /// List censored songs
    Censored(CensoredArgs),

    /// Write a config file with platform defaults
    InitConfig(InitConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments shared by add-pack and add-song
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add from a link:\n    itg-cli add-pack https://example.com/Pack.zip\n\n\
                  Add a local archive, replacing any existing copy:\n    itg-cli add-pack ./Pack.tar.gz -o\n\n\
                  Add a folder, never replacing:\n    itg-cli add-song ./Song --keep")]
pub struct AddArgs {
    /// Local folder, archive, or http(s) link
    pub path_or_url: String,

    /// Overwrite an existing pack or song without asking
    #[arg(long, short = 'o', conflicts_with = "keep")]
    pub overwrite: bool,

    /// Keep an existing pack or song without asking
    #[arg(long, short = 'k')]
    pub keep: bool,
}

impl AddArgs {
    /// The non-interactive overwrite answer, if one was given
    pub fn overwrite_answer(&self) -> Option<bool> {
        if self.overwrite {
            Some(true)
        } else if self.keep {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the censor command
#[derive(Args, Debug)]
pub struct CensorArgs {
    /// Song folder inside the packs folder
    pub path: PathBuf,
}

/// Arguments for the uncensor command
#[derive(Args, Debug)]
pub struct UncensorArgs {
    /// Number from `itg-cli censored` to restore without the picker
    #[arg(long, short = 'i', value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub index: Option<usize>,
}

/// Arguments for the censored command
#[derive(Args, Debug)]
pub struct CensoredArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the init-config command
#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config (defaults to the --config path or the default location)
    pub path: Option<PathBuf>,

    /// Replace an existing file without asking
    #[arg(long, short = 'o')]
    pub overwrite: bool,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, short = 's')]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_add_pack() {
        let cli =
            Cli::try_parse_from(["itg-cli", "add-pack", "https://example.com/a.zip"]).unwrap();
        match cli.command {
            Commands::AddPack(args) => {
                assert_eq!(args.path_or_url, "https://example.com/a.zip");
                assert_eq!(args.overwrite_answer(), None);
            }
            _ => panic!("Expected AddPack command"),
        }
    }

    #[test]
    fn test_cli_parsing_add_song_flags() {
        let cli = Cli::try_parse_from(["itg-cli", "add-song", "./Song", "-o"]).unwrap();
        match cli.command {
            Commands::AddSong(args) => assert_eq!(args.overwrite_answer(), Some(true)),
            _ => panic!("Expected AddSong command"),
        }

        let cli = Cli::try_parse_from(["itg-cli", "add-song", "./Song", "--keep"]).unwrap();
        match cli.command {
            Commands::AddSong(args) => assert_eq!(args.overwrite_answer(), Some(false)),
            _ => panic!("Expected AddSong command"),
        }
    }

    #[test]
    fn test_cli_overwrite_conflicts_with_keep() {
        assert!(Cli::try_parse_from(["itg-cli", "add-pack", "x", "-o", "-k"]).is_err());
    }

    #[test]
    fn test_cli_global_config() {
        let cli = Cli::try_parse_from([
            "itg-cli",
            "censored",
            "--config",
            "/tmp/c.yaml",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert!(matches!(cli.command, Commands::Censored(CensoredArgs { json: true })));
    }

    #[test]
    fn test_cli_uncensor_index() {
        let cli = Cli::try_parse_from(["itg-cli", "uncensor", "--index", "2"]).unwrap();
        match cli.command {
            Commands::Uncensor(args) => assert_eq!(args.index, Some(2)),
            _ => panic!("Expected Uncensor command"),
        }
        assert!(Cli::try_parse_from(["itg-cli", "uncensor", "--index", "0"]).is_err());
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["itg-cli", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
