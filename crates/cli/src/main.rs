//! `icdgen` binary.
//!
//! Reads the Vulkan API registry and writes the mock ICD headers. Diagnostics
//! go to stderr; `RUST_LOG` overrides the default filter.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use icdgen_registry::{GroupedCommands, RegistrySpec};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);
	run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let spec = RegistrySpec::load(&cli.registry)
		.with_context(|| format!("failed to load registry {}", cli.registry.display()))?;
	let set = spec.commands().context("failed to model registry commands")?;
	if set.unresolved > 0 {
		warn!(count = set.unresolved, "aliases with no definition in the registry were skipped");
	}

	let grouped = GroupedCommands::new(&set.commands);
	if grouped.is_empty() {
		warn!("registry defines no commands to generate; output only holds the lookups");
	}
	info!(
		commands = grouped.len(),
		handles = grouped.handles().count(),
		excluded = set.excluded,
		"registry loaded"
	);

	let written = icdgen_emit::generate(&grouped, &cli.output)
		.with_context(|| format!("failed to write {}", cli.output.display()))?;
	for path in written {
		println!("{}", path.display());
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("icdgen=debug,icdgen_emit=debug,icdgen_registry=debug,info")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
