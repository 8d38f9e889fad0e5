//! `regkit` command-line interface

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use regkit_core::{backup_file, compare_file, RegkitConfig, ReportFilter};
use regkit_store::default_reader;
use regkit_value::{Diagnostic, Severity};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let file_arg = Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to a Windows Registry Editor 5.00 file");
    let config_arg = Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("TOML configuration file");

    Command::new("regkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compare .reg files against the registry and generate rollback files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare every value in the file with the live registry")
                .arg(file_arg.clone())
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .default_value("all")
                        .value_parser(ReportFilter::NAMES)
                        .help("Which outcomes to show"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the full report as JSON"),
                )
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("backup")
                .about("Capture current values of every key in the file as a rollback file")
                .arg(file_arg)
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Destination (default: <stem>_backup.reg beside the input)"),
                )
                .arg(config_arg),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(args: &ArgMatches) -> anyhow::Result<RegkitConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => RegkitConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(RegkitConfig::default()),
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Info => tracing::info!("{diagnostic}"),
            Severity::Warning => tracing::warn!("{diagnostic}"),
            Severity::Error => tracing::error!("{diagnostic}"),
        }
    }
}

fn run_compare(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let file = args
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let filter: ReportFilter = args
        .get_one::<String>("filter")
        .map_or(Ok(ReportFilter::All), |name| name.parse::<ReportFilter>())
        .map_err(anyhow::Error::msg)?;

    let report = compare_file(file, default_reader(), &config)
        .with_context(|| format!("comparing {}", file.display()))?;
    report_diagnostics(&report.diagnostics);

    if args.get_flag("json") {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let columns = report.render(filter);
    println!("== .reg file ==");
    println!("{}", columns.file);
    println!();
    println!("== Live registry ==");
    println!("{}", columns.live);
    println!();
    println!("{}", report.summary);
    Ok(())
}

fn run_backup(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let file = args
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let output = args.get_one::<PathBuf>("output").map(PathBuf::as_path);

    let (written, rollback) = backup_file(file, output, default_reader(), &config)
        .with_context(|| format!("backing up {}", file.display()))?;
    report_diagnostics(&rollback.diagnostics);

    println!(
        "Rollback written to {} ({} values, {} marked for deletion)",
        written.display(),
        rollback.snapshot.entry_count(),
        rollback.snapshot.deletion_count()
    );
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("compare", args)) => run_compare(args),
        Some(("backup", args)) => run_backup(args),
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
