use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Annotome Developers",
    version,
    about = "Annotome CLI - Load, validate and export domain and site annotations for a proteome.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a proteome from FASTA and attach annotations from Domains and Sites files.
    Annotate(AnnotateArgs),
    /// Parse a Domains or Sites file without a proteome and report what it contains.
    Check(CheckArgs),
}

/// Arguments for the `annotate` subcommand.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    // --- Inputs ---
    /// Path to the FASTA file defining the proteome.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Domains file to load. Can be used multiple times.
    #[arg(short, long, value_name = "PATH")]
    pub domains: Vec<PathBuf>,

    /// Sites file to load. Can be used multiple times.
    #[arg(short, long, value_name = "PATH")]
    pub sites: Vec<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Format Overrides ---
    /// Field delimiter of the annotation files. Accepts a single ASCII character or `\t`/`tab`.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Use the UniProt accession (`sp|ACCESSION|...`) as the protein unique ID.
    #[arg(long)]
    pub uniprot: bool,

    // --- Policy Overrides ---
    /// Abort on the first annotation that cannot be attached instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Silently skip domains whose name already exists instead of failing.
    #[arg(long = "unsafe")]
    pub allow_duplicates: bool,

    /// Give domains with a colliding name a numeric suffix.
    #[arg(long)]
    pub autoname: bool,

    /// Do not report skipped annotations.
    #[arg(long)]
    pub silent_skips: bool,

    // --- Outputs ---
    /// Write all domains of the annotated proteome to this file.
    #[arg(long, value_name = "PATH")]
    pub write_domains: Option<PathBuf>,

    /// Write all sites of the annotated proteome to this file.
    #[arg(long, value_name = "PATH")]
    pub write_sites: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S policy.autoname=true
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: CheckTarget,

    /// Field delimiter of the file. Accepts a single ASCII character or `\t`/`tab`.
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Fail on malformed Sites lines instead of skipping them.
    #[arg(long)]
    pub strict: bool,
}

/// Exactly one file to check.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct CheckTarget {
    /// A Domains file.
    #[arg(short, long, value_name = "PATH")]
    pub domains: Option<PathBuf>,

    /// A Sites file.
    #[arg(short, long, value_name = "PATH")]
    pub sites: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_accepts_repeated_inputs_and_set_values() {
        let cli = Cli::parse_from([
            "annotome", "-vv", "annotate", "-f", "p.fasta", "-d", "a.tsv", "-d", "b.tsv",
            "--sites", "s.tsv", "--unsafe", "-S", "policy.autoname=true",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Annotate(args) => {
                assert_eq!(args.domains.len(), 2);
                assert_eq!(args.sites, [PathBuf::from("s.tsv")]);
                assert!(args.allow_duplicates);
                assert!(!args.strict);
                assert_eq!(args.set_values, ["policy.autoname=true"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn check_requires_exactly_one_file() {
        assert!(Cli::try_parse_from(["annotome", "check"]).is_err());
        assert!(
            Cli::try_parse_from(["annotome", "check", "--domains", "d", "--sites", "s"]).is_err()
        );
        let cli = Cli::try_parse_from(["annotome", "check", "--sites", "s.tsv"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.target.sites, Some(PathBuf::from("s.tsv"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
