use std::path::Path;
use std::path::PathBuf;

use crate::RetagError;
use crate::RetagResult;
use crate::Rule;
use crate::RuleReport;

/// Result of applying an ordered rule list to a buffer.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
	/// The buffer after every rule has been applied.
	pub content: String,
	/// One report per rule, in application order.
	pub reports: Vec<RuleReport>,
}

impl RewriteOutcome {
	/// Total number of matches rewritten across all rules.
	pub fn substitutions(&self) -> usize {
		self.reports.iter().map(|report| report.substitutions).sum()
	}
}

/// Result of rewriting a file on disk.
#[derive(Debug, Clone)]
pub struct FileRewrite {
	/// Path of the file that was read.
	pub path: PathBuf,
	/// Content as it was read.
	pub original: String,
	/// Content after all rules were applied.
	pub content: String,
	/// One report per rule, in application order.
	pub reports: Vec<RuleReport>,
	/// Whether the new content was written back.
	pub written: bool,
}

impl FileRewrite {
	/// Returns true when the rules changed the content.
	pub fn is_changed(&self) -> bool {
		self.original != self.content
	}

	/// Total number of matches rewritten across all rules.
	pub fn substitutions(&self) -> usize {
		self.reports.iter().map(|report| report.substitutions).sum()
	}
}

/// Apply `rules` to `buffer` strictly in order and return the result.
///
/// Rules that match nothing leave the buffer as it is.
pub fn rewrite(buffer: &str, rules: &[Rule]) -> String {
	rewrite_with_report(buffer, rules).content
}

/// Same as [`rewrite`], but also reports what each rule did.
pub fn rewrite_with_report(buffer: &str, rules: &[Rule]) -> RewriteOutcome {
	let mut content = buffer.to_string();
	let mut reports = Vec::with_capacity(rules.len());

	for rule in rules {
		let (output, report) = rule.apply(&content);
		tracing::debug!(
			rule = rule.name(),
			substitutions = report.substitutions,
			skipped = report.skipped,
			"applied rule"
		);

		if report.substitutions > 0 {
			content = output.into_owned();
		}
		reports.push(report);
	}

	RewriteOutcome { content, reports }
}

/// Check that running `rules` over their own output changes nothing.
/// Returns the first rule that still finds something to rewrite.
pub fn verify_idempotent(buffer: &str, rules: &[Rule]) -> RetagResult<()> {
	let once = rewrite(buffer, rules);
	let twice = rewrite_with_report(&once, rules);

	match twice.reports.iter().find(|report| report.substitutions > 0) {
		Some(report) => {
			Err(RetagError::NotIdempotent {
				rule: report.rule.clone(),
			})
		}
		None => Ok(()),
	}
}

/// Read the whole file at `path` into a buffer.
pub fn read_buffer(path: &Path) -> RetagResult<String> {
	Ok(std::fs::read_to_string(path)?)
}

/// Compute the rewrite of the file at `path` without touching the disk.
pub fn preview_file(path: &Path, rules: &[Rule]) -> RetagResult<FileRewrite> {
	let original = read_buffer(path)?;
	let outcome = rewrite_with_report(&original, rules);

	Ok(FileRewrite {
		path: path.to_path_buf(),
		original,
		content: outcome.content,
		reports: outcome.reports,
		written: false,
	})
}

/// Read `path`, apply `rules`, and write the result back. The file is only
/// written when its content changed.
pub fn rewrite_file(path: &Path, rules: &[Rule]) -> RetagResult<FileRewrite> {
	let mut result = preview_file(path, rules)?;

	if result.is_changed() {
		std::fs::write(path, &result.content)?;
		result.written = true;
		tracing::info!(
			path = %path.display(),
			substitutions = result.substitutions(),
			"wrote rewritten file"
		);
	}

	Ok(result)
}
