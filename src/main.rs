use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use macbots::{
    blocklist::Blocklist,
    cli::Cli,
    filter::Inventory,
    report::Report,
    snapshot,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let Some(mode) = args.mode() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let blocklist = match &args.blocklist {
        Some(path) => Blocklist::from_file(path)?,
        None => Blocklist::default(),
    };
    tracing::debug!(?mode, blocklist = ?blocklist, "starting report");

    let bots = snapshot::load_records(&args.botmap)
        .with_context(|| format!("Failed to load bot snapshot {}", args.botmap.display()))?;

    let builder_hosts = if mode.needs_builder_snapshot() {
        snapshot::load_records(&args.buildermap).with_context(|| {
            format!(
                "Failed to load builder snapshot {}",
                args.buildermap.display()
            )
        })?
    } else {
        Vec::new()
    };

    let inventory = Inventory::new(bots, builder_hosts, blocklist);
    let report = Report::build(&inventory, &mode, args.vms_format)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out)?;
    out.flush()?;

    Ok(())
}
