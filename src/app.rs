use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand, error::ErrorKind};
use uuid::Uuid;

use crate::config::TransformConfig;
use crate::identity::load_overrides;
use crate::pipeline::{Pipeline, RunReport};
use crate::store::JsonLinesStore;
use crate::transport::fs::Traversal;
use crate::types::EpochSeconds;

#[derive(Debug, Parser)]
#[command(
    name = "rf2-transform",
    disable_help_subcommand = true,
    about = "Transform RF2 release files into a versioned fact graph"
)]
struct Rf2Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Transform a release directory (or one file) into a JSON-lines store.
    #[command(
        long_about = "Discover .txt/.tsv release files, transform concept, description, definition, language, identifier, and OWL expression files, and commit everything once at the end.",
        after_help = "Output is written to <OUTPUT>/facts.jsonl and <OUTPUT>/stamps.jsonl; nothing is written there if the run aborts."
    )]
    Transform(TransformArgs),
}

#[derive(Debug, clap::Args)]
struct TransformArgs {
    #[arg(long, value_name = "PATH", help = "Release directory or single release file")]
    input: PathBuf,
    #[arg(long, value_name = "DIR", help = "Output directory for the JSON-lines store")]
    output: PathBuf,
    #[arg(
        long,
        value_name = "UUID",
        value_parser = parse_namespace,
        help = "Origin namespace for text-derived identifiers"
    )]
    namespace: Uuid,
    #[arg(long, help = "Descend into subdirectories of the input")]
    recursive: bool,
    #[arg(long, help = "Follow symlinks while discovering release files")]
    follow_links: bool,
    #[arg(long, help = "Abort the run on the first failed file")]
    strict: bool,
    #[arg(long, help = "Transform files in parallel")]
    parallel: bool,
    #[arg(
        long,
        value_name = "TSV",
        help = "Two-column code<TAB>uuid table forcing codes onto existing ids"
    )]
    overrides: Option<PathBuf>,
    #[arg(long = "no-validate-order", help = "Skip the sorted-group check")]
    no_validate_order: bool,
    #[arg(long, help = "Also compose the author and LOINC Number starter concepts")]
    with_starter_data: bool,
    #[arg(
        long,
        value_name = "EPOCH_SECONDS",
        requires = "with_starter_data",
        help = "Stamp time for starter data (defaults to now)"
    )]
    starter_time: Option<EpochSeconds>,
}

/// Run the `rf2-transform` command line with `args_iter` (program name excluded).
pub fn run_rf2_transform<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<Rf2Cli, _>(std::iter::once("rf2-transform".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    match cli.command {
        Command::Transform(args) => {
            let report = run_transform(args)?;
            print_report(&report);
            Ok(())
        }
    }
}

fn run_transform(args: TransformArgs) -> Result<RunReport, Box<dyn Error>> {
    let mut config = TransformConfig::new(args.namespace)
        .with_traversal(if args.recursive {
            Traversal::Recursive
        } else {
            Traversal::TopLevel
        })
        .with_follow_links(args.follow_links)
        .with_strict(args.strict)
        .with_parallel(args.parallel)
        .with_validate_group_order(!args.no_validate_order);
    if let Some(path) = &args.overrides {
        config = config.with_overrides(load_overrides(path)?);
    }

    let store = JsonLinesStore::create(&args.output)?;
    let mut pipeline = Pipeline::new(&store, config);
    if args.with_starter_data {
        pipeline =
            pipeline.with_starter_data(args.starter_time.unwrap_or_else(|| Utc::now().timestamp()));
    }
    Ok(pipeline.run(&args.input)?)
}

fn print_report(report: &RunReport) {
    println!("=== rf2-transform ===");
    for file in &report.files {
        let kind = file.kind.map(|kind| kind.label()).unwrap_or("-");
        println!("{:<11} {}  {}", kind, file.path.display(), file.outcome);
    }
    println!(
        "files: {} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    match report.commit {
        Some(summary) => println!(
            "committed {} facts in {} sessions with {} distinct stamps",
            summary.facts, summary.sessions, summary.stamps
        ),
        None => println!("nothing committed"),
    }
}

fn parse_namespace(raw: &str) -> Result<Uuid, String> {
    Uuid::try_parse(raw.trim()).map_err(|err| format!("invalid --namespace '{raw}': {err}"))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
