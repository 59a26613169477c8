use clap::Parser;
use maplink::cli::Cli;
use maplink::output::Output;
use maplink::{run, OsFilesystem};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let use_color = !cli.no_color && atty::is(atty::Stream::Stdout);
    let mut output = Output::new(use_color);
    let options = cli.run_options();

    let mapping = run(
        &OsFilesystem,
        &cli.source,
        &cli.target,
        &options,
        &mut |event| output.print_event(event),
    )?;

    if mapping.is_empty() {
        eprintln!("No files matched '{}'", cli.source);
        std::process::exit(1);
    }

    output.print_summary(&mapping, options.create);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("MAPLINK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("maplink={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
