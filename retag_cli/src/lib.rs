use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Apply named, idempotent markup migrations to a source file.",
	long_about = "retag rewrites a single source file with an ordered list of pattern rules. \
	              Each recipe is safe to run twice: the second run changes nothing.\n\nQuick \
	              start:\n  retag list                         Show available recipes\n  retag \
	              check accordion-to-section   Exit 1 if the recipe would change the file\n  \
	              retag run accordion-to-section     Rewrite the file in place"
)]
pub struct RetagCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Targets and `retag.toml` are
	/// resolved relative to it.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List the built-in recipes and those defined in `retag.toml`.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Apply a recipe to its target file.
	///
	/// Reads the whole file, applies each rule of the recipe in order and
	/// writes the result back when anything changed. Prints the recipe's
	/// completion message on success.
	Run {
		/// Name of the recipe to apply.
		recipe: String,

		/// File to rewrite, overriding the recipe and config targets.
		#[arg(long, short)]
		file: Option<PathBuf>,

		/// Show what would change without writing the file.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Print a line diff of the changes.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Check whether a recipe has already been applied.
	///
	/// Exits with a non-zero status code when running the recipe would still
	/// change the file. Useful in CI after a migration has landed.
	Check {
		/// Name of the recipe to check.
		recipe: String,

		/// File to check, overriding the recipe and config targets.
		#[arg(long, short)]
		file: Option<PathBuf>,

		/// Print a line diff of the pending changes.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
