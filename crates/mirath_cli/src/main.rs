use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mirath_engine::{
    ALL_CATEGORIES, AllocationResult, CorrectionOutcome, DistributionConfig, HeirComposition,
    Sex, all_blockings, compute_distribution_with, descriptor, fraction_from_decimal,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mirath", about = "Exact Islamic estate distribution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distribute an estate among the given heirs
    Compute {
        #[command(flatten)]
        heirs: HeirArgs,
        /// Estate value to divide
        #[arg(long, default_value = "0")]
        estate: f64,
        /// JSON config file (MIRATH_* variables override it)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which categories the given heirs exclude
    Blocking {
        #[command(flatten)]
        heirs: HeirArgs,
        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Best fraction for a decimal share
    Fraction {
        /// Decimal value, e.g. 0.1666
        value: f64,
        /// Largest denominator (defaults to the configured maxDenominator)
        #[arg(long)]
        max_den: Option<u32>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the heir categories
    Heirs,
}

/// Surviving relatives. Counts default to zero.
#[derive(Args, Debug)]
struct HeirArgs {
    #[arg(long)]
    husband: bool,
    #[arg(long, default_value = "0")]
    wives: u32,
    #[arg(long, default_value = "0")]
    sons: u32,
    #[arg(long, default_value = "0")]
    daughters: u32,
    #[arg(long, default_value = "0")]
    sons_sons: u32,
    #[arg(long, default_value = "0")]
    sons_daughters: u32,
    #[arg(long)]
    father: bool,
    #[arg(long)]
    mother: bool,
    #[arg(long)]
    paternal_grandfather: bool,
    #[arg(long)]
    paternal_grandmother: bool,
    #[arg(long)]
    maternal_grandmother: bool,
    #[arg(long, default_value = "0")]
    full_brothers: u32,
    #[arg(long, default_value = "0")]
    full_sisters: u32,
    #[arg(long, default_value = "0")]
    paternal_brothers: u32,
    #[arg(long, default_value = "0")]
    paternal_sisters: u32,
    #[arg(long, default_value = "0")]
    maternal_brothers: u32,
    #[arg(long, default_value = "0")]
    maternal_sisters: u32,
    #[arg(long, default_value = "0")]
    full_brothers_sons: u32,
    #[arg(long, default_value = "0")]
    paternal_brothers_sons: u32,
    #[arg(long, default_value = "0")]
    full_paternal_uncles: u32,
    #[arg(long, default_value = "0")]
    paternal_paternal_uncles: u32,
    #[arg(long, default_value = "0")]
    full_uncles_sons: u32,
    #[arg(long, default_value = "0")]
    paternal_uncles_sons: u32,
}

impl HeirArgs {
    fn composition(&self) -> HeirComposition {
        HeirComposition {
            husband: self.husband,
            wives: self.wives,
            sons: self.sons,
            daughters: self.daughters,
            sons_sons: self.sons_sons,
            sons_daughters: self.sons_daughters,
            father: self.father,
            mother: self.mother,
            paternal_grandfather: self.paternal_grandfather,
            paternal_grandmother: self.paternal_grandmother,
            maternal_grandmother: self.maternal_grandmother,
            full_brothers: self.full_brothers,
            full_sisters: self.full_sisters,
            paternal_brothers: self.paternal_brothers,
            paternal_sisters: self.paternal_sisters,
            maternal_brothers: self.maternal_brothers,
            maternal_sisters: self.maternal_sisters,
            full_brothers_sons: self.full_brothers_sons,
            paternal_brothers_sons: self.paternal_brothers_sons,
            full_paternal_uncles: self.full_paternal_uncles,
            paternal_paternal_uncles: self.paternal_paternal_uncles,
            full_uncles_sons: self.full_uncles_sons,
            paternal_uncles_sons: self.paternal_uncles_sons,
        }
    }

    fn require_composition(&self) -> HeirComposition {
        let composition = self.composition();
        composition.validate().unwrap_or_else(|e| {
            eprintln!("Invalid heirs: {e}");
            std::process::exit(1);
        });
        composition
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MIRATH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> DistributionConfig {
    let base = match path {
        Some(p) => DistributionConfig::from_json_file(p),
        None => Ok(DistributionConfig::default()),
    };
    base.and_then(DistributionConfig::merge_env)
        .unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        })
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn print_result(result: &AllocationResult, config: &DistributionConfig) {
    println!(
        "{:<28} {:>5}  {:>9}  {:>9}  {:>9}  {:>9}  {:>16}",
        "Heir", "Count", "Raw", "Final", "Per head", "Percent", "Amount"
    );
    for e in &result.entries {
        if e.blocked {
            let reason = e.blocked_by.map(|b| b.to_string()).unwrap_or_default();
            println!(
                "{:<28} {:>5}  {reason}",
                e.category.english_name(),
                e.count
            );
            continue;
        }
        println!(
            "{:<28} {:>5}  {:>9}  {:>9}  {:>9}  {:>9}  {:>16}",
            e.category.english_name(),
            e.count,
            e.raw_fraction.to_string(),
            e.final_fraction.to_string(),
            e.per_head.to_string(),
            config.format_percent(e.percentage),
            config.format_amount(e.amount),
        );
    }

    match &result.correction {
        CorrectionOutcome::NotApplied => {}
        CorrectionOutcome::Reduction(r) => println!(
            "\nReduction (awl): total {} scaled by {}; base {} raised to {}",
            r.original_total, r.ratio, r.original_base, r.raised_base
        ),
        CorrectionOutcome::Redistribution(r) if r.to_spouse => {
            println!("\nRedistribution (radd): remainder {} returned to spouse", r.remainder)
        }
        CorrectionOutcome::Redistribution(r) => println!(
            "\nRedistribution (radd): remainder {} among {} heirs",
            r.remainder,
            r.recipients.len()
        ),
        CorrectionOutcome::Exception(e) => println!(
            "\nException ({}): spouse {}, mother {}, father {}",
            e.case.key(),
            e.spouse,
            e.mother,
            e.father
        ),
    }
    if !result.unallocated.is_zero() {
        println!("Unallocated: {}", result.unallocated);
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            heirs,
            estate,
            config,
            json,
        } => {
            let config = load_config(config.as_ref());
            let composition = heirs.require_composition();
            debug!(?composition, estate, "compute");
            let result = compute_distribution_with(&composition, estate, &config)
                .unwrap_or_else(|e| {
                    eprintln!("Distribution failed: {e}");
                    std::process::exit(1);
                });
            if json {
                print_json(&result);
            } else {
                print_result(&result, &config);
            }
        }

        Commands::Blocking { heirs, json } => {
            let composition = heirs.require_composition();
            let outcomes = all_blockings(&composition);
            if json {
                let list: Vec<_> = outcomes.values().collect();
                print_json(&list);
                return;
            }
            for outcome in outcomes.values() {
                let present = if composition.is_present(outcome.category) {
                    "present"
                } else {
                    "absent"
                };
                match outcome.blocked_by {
                    Some(by) => println!(
                        "{:<28} {present:<8} {by}",
                        outcome.category.english_name()
                    ),
                    None => println!(
                        "{:<28} {present:<8} not blocked",
                        outcome.category.english_name()
                    ),
                }
            }
        }

        Commands::Fraction {
            value,
            max_den,
            config,
        } => {
            let mut config = load_config(config.as_ref());
            if let Some(max) = max_den {
                config = config.with_max_denominator(max);
            }
            match fraction_from_decimal(value, &config) {
                Ok(r) => println!("{r} ({:.10})", r.to_f64()),
                Err(e) => {
                    eprintln!("Cannot convert {value}: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Heirs => {
            for category in ALL_CATEGORIES {
                let d = descriptor(category);
                let sex = match d.sex {
                    Sex::Male => "M",
                    Sex::Female => "F",
                };
                println!(
                    "{:<26} {:<28} {:<22} {sex}  {:<9} {}",
                    category.key(),
                    category.english_name(),
                    category.name(),
                    if d.residuary { "residuary" } else { "" },
                    d.citation
                );
            }
        }
    }
}
