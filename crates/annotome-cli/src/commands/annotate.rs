use crate::cli::AnnotateArgs;
use crate::config::{AnnotateConfig, PartialAnnotateConfig};
use crate::error::Result;
use annotome::core::io::fasta::read_fasta;
use annotome::core::models::proteome::Proteome;
use annotome::engine::loader::LoadReport;
use annotome::workflows::{domains, sites};
use std::path::Path;
use tracing::info;

/// Totals for one `annotate` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub proteins: usize,
    pub dropped_proteins: usize,
    pub domains: usize,
    pub sites: usize,
    pub skipped: usize,
    pub diagnostics: usize,
}

impl AnnotationSummary {
    fn record(&mut self, report: &LoadReport) {
        self.skipped += report.skipped;
        self.diagnostics += report.diagnostics.len();
    }
}

pub fn run(args: AnnotateArgs) -> Result<()> {
    let summary = annotate(&args)?;

    println!("Annotation complete.");
    println!("  Proteins:    {}", summary.proteins);
    if summary.dropped_proteins > 0 {
        println!("  Dropped:     {}", summary.dropped_proteins);
    }
    println!("  Domains:     {}", summary.domains);
    println!("  Sites:       {}", summary.sites);
    println!("  Skipped:     {}", summary.skipped);
    println!("  Diagnostics: {}", summary.diagnostics);
    Ok(())
}

pub fn annotate(args: &AnnotateArgs) -> Result<AnnotationSummary> {
    let partial_config = match &args.config {
        Some(path) => PartialAnnotateConfig::from_file(path)?,
        None => PartialAnnotateConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(args)?;

    info!("Loading proteome from {:?}", &args.fasta);
    let (mut proteome, fasta_diagnostics) = read_fasta(&args.fasta, &config.fasta)?;

    let mut summary = AnnotationSummary {
        dropped_proteins: fasta_diagnostics.len(),
        diagnostics: fasta_diagnostics.len(),
        ..Default::default()
    };

    for path in &args.domains {
        let report =
            domains::add_domains_from_file(&mut proteome, path, config.delimiter, &config.policy)?;
        print_report("domain", path, &report);
        summary.record(&report);
    }
    for path in &args.sites {
        let report =
            sites::add_sites_from_file(&mut proteome, path, config.delimiter, &config.policy)?;
        print_report("site", path, &report);
        summary.record(&report);
    }

    write_outputs(&proteome, args, &config)?;

    summary.proteins = proteome.len();
    summary.domains = proteome.proteins().map(|p| p.num_domains()).sum();
    summary.sites = proteome.proteins().map(|p| p.num_sites()).sum();
    Ok(summary)
}

fn print_report(kind: &str, path: &Path, report: &LoadReport) {
    println!(
        "Loaded {} {}(s) from {} ({} skipped)",
        report.added,
        kind,
        path.display(),
        report.skipped
    );
}

fn write_outputs(
    proteome: &Proteome,
    args: &AnnotateArgs,
    config: &AnnotateConfig,
) -> Result<()> {
    if let Some(path) = &args.write_domains {
        domains::write_domains(proteome, path, config.delimiter)?;
        println!("Domains written to: {}", path.display());
    }
    if let Some(path) = &args.write_sites {
        sites::write_sites(proteome, path, config.delimiter)?;
        println!("Sites written to: {}", path.display());
    }
    Ok(())
}
