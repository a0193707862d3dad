use crate::cli::CheckArgs;
use crate::config::parse_delimiter;
use crate::error::{CliError, Result};
use annotome::core::diagnostics::Diagnostics;
use annotome::core::io::domains::DomainsFile;
use annotome::core::io::sites::SitesFile;
use annotome::core::io::traits::{
    AnnotationFile, AnnotationTable, DEFAULT_DELIMITER, ReadOptions,
};
use std::path::Path;
use tracing::info;

/// What a syntactic check of one file found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub proteins: usize,
    pub records: usize,
    pub skipped_lines: usize,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let (path, summary) = check(&args)?;
    println!(
        "{}: {} record(s) for {} protein(s), {} line(s) skipped",
        path.display(),
        summary.records,
        summary.proteins,
        summary.skipped_lines
    );
    Ok(())
}

pub fn check(args: &CheckArgs) -> Result<(&Path, CheckSummary)> {
    let options = ReadOptions {
        delimiter: match &args.delimiter {
            Some(text) => parse_delimiter(text)?,
            None => DEFAULT_DELIMITER,
        },
        skip_bad: !args.strict,
    };

    match (&args.target.domains, &args.target.sites) {
        (Some(path), _) => {
            info!("Checking Domains file {:?}", path);
            let (table, diagnostics) = DomainsFile::read_from_path(path, &options)?;
            Ok((path.as_path(), summarize(&table, &diagnostics)))
        }
        (None, Some(path)) => {
            info!("Checking Sites file {:?}", path);
            let (table, diagnostics) = SitesFile::read_from_path(path, &options)?;
            Ok((path.as_path(), summarize(&table, &diagnostics)))
        }
        (None, None) => Err(CliError::Argument(
            "Either --domains or --sites is required".to_string(),
        )),
    }
}

fn summarize<R>(table: &AnnotationTable<R>, diagnostics: &Diagnostics) -> CheckSummary {
    CheckSummary {
        proteins: table.len(),
        records: table.values().map(Vec::len).sum(),
        skipped_lines: diagnostics.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use annotome::core::io::error::{InterchangeError, ParseError};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn check_args(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["annotome", "check"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Check(args) => args,
            other => panic!("Expected 'check' subcommand, got {other:?}"),
        }
    }

    #[test]
    fn counts_records_and_skipped_site_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sites.csv");
        fs::write(&path, "P1,1,PTM,S,0.5\nP2,x,PTM,S,0.5\nP2,4,PTM,T,1\nP1,2,PTM,S,1\n").unwrap();

        let args = check_args(&["--sites", path.to_str().unwrap(), "--delimiter", ","]);
        let (_, summary) = check(&args).unwrap();
        assert_eq!(
            summary,
            CheckSummary {
                proteins: 2,
                records: 3,
                skipped_lines: 1,
            }
        );

        let strict = check_args(&[
            "--sites",
            path.to_str().unwrap(),
            "--delimiter",
            ",",
            "--strict",
        ]);
        assert!(matches!(check(&strict).unwrap_err(), CliError::Interchange(_)));
    }

    #[test]
    fn malformed_domains_line_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("domains.tsv");
        fs::write(&path, "P1\t1\t5\tIDR\nP1\t1\t5\tIDR\ta:b:c\n").unwrap();

        let err = check(&check_args(&["--domains", path.to_str().unwrap()])).unwrap_err();
        match err {
            CliError::Interchange(InterchangeError::Parse(parse)) => {
                assert_eq!(parse.line(), Some(2))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
