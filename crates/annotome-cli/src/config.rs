use crate::cli::AnnotateArgs;
use crate::error::{CliError, Result};
use annotome::core::io::fasta::{FastaOptions, IdentifierScheme, InvalidSequenceAction};
use annotome::core::io::traits::DEFAULT_DELIMITER;
use annotome::engine::config::{LoadPolicy, LoadPolicyBuilder};
use serde::Deserialize;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPolicyConfig {
    safe: Option<bool>,
    #[serde(rename = "skip-bad")]
    skip_bad: Option<bool>,
    verbose: Option<bool>,
    autoname: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFormatConfig {
    delimiter: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFastaConfig {
    identifier: Option<IdentifierScheme>,
    #[serde(rename = "invalid-sequence-action")]
    invalid_sequence_action: Option<InvalidSequenceAction>,
}

/// The `annotate` configuration as read from a TOML file, every key optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnnotateConfig {
    policy: Option<PartialPolicyConfig>,
    format: Option<PartialFormatConfig>,
    fasta: Option<PartialFastaConfig>,
}

/// Fully resolved settings for one `annotate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotateConfig {
    pub policy: LoadPolicy,
    pub delimiter: u8,
    pub fasta: FastaOptions,
}

impl PartialAnnotateConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final settings. Precedence, lowest first: built-in
    /// defaults, the config file, command-line flags, `--set` values.
    pub fn merge_with_cli(mut self, args: &AnnotateArgs) -> Result<AnnotateConfig> {
        self.apply_flags(args);
        self.apply_set_values(&args.set_values)?;

        let policy_config = self.policy.take().unwrap_or_default();
        let format_config = self.format.take().unwrap_or_default();
        let fasta_config = self.fasta.take().unwrap_or_default();

        let mut builder = LoadPolicyBuilder::new();
        if let Some(safe) = policy_config.safe {
            builder = builder.safe(safe);
        }
        if let Some(skip_bad) = policy_config.skip_bad {
            builder = builder.skip_bad(skip_bad);
        }
        if let Some(verbose) = policy_config.verbose {
            builder = builder.verbose(verbose);
        }
        if let Some(autoname) = policy_config.autoname {
            builder = builder.autoname(autoname);
        }

        let delimiter = match format_config.delimiter {
            Some(text) => parse_delimiter(&text)?,
            None => DEFAULT_DELIMITER,
        };

        Ok(AnnotateConfig {
            policy: builder.build(),
            delimiter,
            fasta: FastaOptions {
                identifier: fasta_config.identifier.unwrap_or_default(),
                invalid_sequence_action: fasta_config.invalid_sequence_action.unwrap_or_default(),
            },
        })
    }

    fn apply_flags(&mut self, args: &AnnotateArgs) {
        let policy = self.policy.get_or_insert_with(Default::default);
        if args.strict {
            policy.skip_bad = Some(false);
        }
        if args.allow_duplicates {
            policy.safe = Some(false);
        }
        if args.autoname {
            policy.autoname = Some(true);
        }
        if args.silent_skips {
            policy.verbose = Some(false);
        }
        if let Some(delimiter) = &args.delimiter {
            self.format
                .get_or_insert_with(Default::default)
                .delimiter = Some(delimiter.clone());
        }
        if args.uniprot {
            self.fasta.get_or_insert_with(Default::default).identifier =
                Some(IdentifierScheme::UniprotAccession);
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "policy.safe" => {
                    self.policy.get_or_insert_with(Default::default).safe =
                        Some(parse_bool(key, value_str)?);
                }
                "policy.skip-bad" => {
                    self.policy.get_or_insert_with(Default::default).skip_bad =
                        Some(parse_bool(key, value_str)?);
                }
                "policy.verbose" => {
                    self.policy.get_or_insert_with(Default::default).verbose =
                        Some(parse_bool(key, value_str)?);
                }
                "policy.autoname" => {
                    self.policy.get_or_insert_with(Default::default).autoname =
                        Some(parse_bool(key, value_str)?);
                }
                "format.delimiter" => {
                    self.format
                        .get_or_insert_with(Default::default)
                        .delimiter = Some(value_str.to_string());
                }
                "fasta.identifier" => {
                    self.fasta.get_or_insert_with(Default::default).identifier =
                        Some(parse_keyword(key, value_str)?);
                }
                "fasta.invalid-sequence-action" => {
                    self.fasta
                        .get_or_insert_with(Default::default)
                        .invalid_sequence_action = Some(parse_keyword(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parses a delimiter given as a single ASCII character, or as `\t` or `tab`.
pub fn parse_delimiter(text: &str) -> Result<u8> {
    if matches!(text, "\\t" | "tab") {
        return Ok(b'\t');
    }
    match text.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CliError::Argument(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            text
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid boolean value for {}: {}", key, value)))
}

fn parse_keyword<'de, T: Deserialize<'de>>(key: &str, value: &'de str) -> Result<T> {
    let deserializer: StrDeserializer<'de, ValueError> = value.into_deserializer();
    T::deserialize(deserializer)
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}
