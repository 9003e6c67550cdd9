use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "icdgen")]
#[command(about = "Generate mock Vulkan ICD sources from the API registry")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Path to the registry document (vk.xml)
	#[arg(long, short = 'r', visible_alias = "vk-xml", value_name = "PATH")]
	pub registry: PathBuf,

	/// Output header, or an existing directory for split headers
	#[arg(long, short = 'o', value_name = "PATH")]
	pub output: PathBuf,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}
