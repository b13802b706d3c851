use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use retag_cli::Commands;
use retag_cli::OutputFormat;
use retag_cli::RetagCli;
use retag_core::FileRewrite;
use retag_core::Recipe;
use retag_core::RecipeBook;
use retag_core::RetagConfig;
use retag_core::RuleReport;
use retag_core::preview_file;
use retag_core::rewrite_file;
use retag_core::verify_idempotent;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = RetagCli::parse();

	// Respect NO_COLOR env var, --no-color flag, and terminals without color.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Run {
			recipe,
			file,
			dry_run,
			diff,
		}) => run_recipe(&args, recipe, file.as_deref(), *dry_run, *diff),
		Some(Commands::Check {
			recipe,
			file,
			diff,
			format,
		}) => run_check(&args, recipe, file.as_deref(), *diff, *format),
		None => {
			eprintln!("No subcommand specified. Run `retag --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<retag_core::RetagError>() {
			Ok(retag_err) => {
				let report: miette::Report = (*retag_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr. `--verbose` forces debug output, otherwise `RUST_LOG`
/// decides and defaults to warnings only.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &RetagCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Project root, its config (if any) and every recipe available to it.
struct ProjectRecipes {
	root: PathBuf,
	config: Option<RetagConfig>,
	book: RecipeBook,
}

impl ProjectRecipes {
	fn load(args: &RetagCli) -> Result<Self, Box<dyn std::error::Error>> {
		let root = resolve_root(args);
		let config = RetagConfig::load(&root)?;
		let book = RecipeBook::new(config.as_ref())?;
		tracing::debug!(root = %root.display(), recipes = book.len(), "loaded recipes");

		if args.verbose {
			match RetagConfig::resolve_path(&root) {
				Some(path) => eprintln!("Using config: {}", path.display()),
				None => eprintln!("No retag.toml found in {}", root.display()),
			}
		}

		Ok(Self { root, config, book })
	}

	fn target(&self, recipe: &Recipe, file: Option<&Path>) -> PathBuf {
		recipe.resolve_target(&self.root, file, self.config.as_ref())
	}
}

fn run_list(args: &RetagCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let project = ProjectRecipes::load(args)?;

	match format {
		OutputFormat::Json => {
			let recipes: Vec<serde_json::Value> = project
				.book
				.iter()
				.map(|recipe| {
					let rules: Vec<serde_json::Value> = recipe
						.rules
						.iter()
						.map(|rule| {
							serde_json::json!({
								"name": rule.name(),
								"kind": rule.action().kind(),
								"unless": rule.guard(),
							})
						})
						.collect();
					let target = project.target(recipe, None);
					serde_json::json!({
						"name": recipe.name,
						"description": recipe.description,
						"message": recipe.message,
						"target": make_relative(&target, &project.root),
						"rules": rules,
					})
				})
				.collect();
			println!("{}", serde_json::Value::Array(recipes));
		}
		OutputFormat::Text => {
			println!("{}", colored!("Recipes:", bold));
			for recipe in project.book.iter() {
				let target = project.target(recipe, None);
				println!(
					"  {} {} ({})",
					colored!(recipe.name, bold),
					recipe.description,
					make_relative(&target, &project.root)
				);

				if args.verbose {
					for rule in &recipe.rules {
						println!("    - {rule}");
					}
				} else {
					let names: Vec<&str> = recipe.rules.iter().map(|rule| rule.name()).collect();
					println!("    rules: {}", names.join(", "));
				}
			}

			println!("\n{} recipe(s)", project.book.len());
		}
	}

	Ok(())
}

fn run_recipe(
	args: &RetagCli,
	name: &str,
	file: Option<&Path>,
	dry_run: bool,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let project = ProjectRecipes::load(args)?;
	let recipe = project.book.get(name)?;
	let target = project.target(recipe, file);
	let rel = make_relative(&target, &project.root);

	if dry_run {
		let preview = preview_file(&target, &recipe.rules)?;

		if preview.is_changed() {
			println!(
				"Dry run: would make {} substitution(s) in {rel}:",
				preview.substitutions()
			);
			print_reports(&preview.reports, false);
		} else {
			println!("Dry run: {rel} is already up to date.");
		}

		if show_diff {
			print_diff(&preview.original, &preview.content);
		}

		return Ok(());
	}

	let result = rewrite_file(&target, &recipe.rules)?;

	if args.verbose {
		println!("Made {} substitution(s) in {rel}:", result.substitutions());
		print_reports(&result.reports, true);
	}

	if show_diff {
		print_diff(&result.original, &result.content);
	}

	if let Err(e) = verify_idempotent(&result.content, &recipe.rules) {
		eprintln!("{} {e}", colored!("warning:", yellow));
	}

	println!("{}", colored!(recipe.message, green));

	Ok(())
}

fn run_check(
	args: &RetagCli,
	name: &str,
	file: Option<&Path>,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let project = ProjectRecipes::load(args)?;
	let recipe = project.book.get(name)?;
	let target = project.target(recipe, file);
	let rel = make_relative(&target, &project.root);
	let preview = preview_file(&target, &recipe.rules)?;
	let pending = preview.is_changed();

	match format {
		OutputFormat::Json => {
			println!("{}", check_json(recipe, &rel, &preview));
		}
		OutputFormat::Text => {
			if pending {
				eprintln!(
					"Check failed: `{}` would make {} substitution(s) in {rel}.",
					recipe.name,
					preview.substitutions()
				);
				print_pending_reports(&preview.reports);

				if show_diff {
					print_diff(&preview.original, &preview.content);
				}

				eprintln!();
				eprintln!("Run `retag run {}` to apply.", recipe.name);
			} else {
				println!(
					"Check passed: `{}` is already applied to {rel}.",
					recipe.name
				);
			}
		}
	}

	if pending {
		process::exit(1);
	}

	Ok(())
}

fn check_json(recipe: &Recipe, rel: &str, preview: &FileRewrite) -> serde_json::Value {
	let rules: Vec<serde_json::Value> = preview
		.reports
		.iter()
		.map(|report| {
			serde_json::json!({
				"rule": report.rule,
				"substitutions": report.substitutions,
				"skipped": report.skipped,
			})
		})
		.collect();

	serde_json::json!({
		"ok": !preview.is_changed(),
		"recipe": recipe.name,
		"file": rel,
		"substitutions": preview.substitutions(),
		"rules": rules,
	})
}

/// Print one line per rule. Rules that did nothing are only shown when
/// `include_unchanged` is set.
fn print_reports(reports: &[RuleReport], include_unchanged: bool) {
	for report in reports {
		if report.skipped {
			if include_unchanged {
				println!("  {} skipped (guard matched)", report.rule);
			}
		} else if report.substitutions > 0 || include_unchanged {
			println!("  {}: {} substitution(s)", report.rule, report.substitutions);
		}
	}
}

fn print_pending_reports(reports: &[RuleReport]) {
	for report in reports.iter().filter(|report| report.substitutions > 0) {
		eprintln!(
			"  rule `{}`: {} substitution(s)",
			report.rule, report.substitutions
		);
	}
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
