use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum RetagError {
	#[error(transparent)]
	#[diagnostic(code(retag::io_error))]
	Io(#[from] std::io::Error),

	#[error("rule `{rule}` has an invalid pattern: {reason}")]
	#[diagnostic(
		code(retag::invalid_pattern),
		help("patterns use the `regex` crate syntax; prefix with `(?s)` to let `.` span lines")
	)]
	InvalidPattern { rule: String, reason: String },

	#[error("rule `{rule}` uses unknown capture group `{group}`")]
	#[diagnostic(
		code(retag::unknown_capture_group),
		help("name the group in the pattern with `(?P<{group}>...)` or use `$$` for a literal `$`")
	)]
	UnknownCaptureGroup { rule: String, group: String },

	#[error("rule `{rule}` has an empty token")]
	#[diagnostic(code(retag::empty_token))]
	EmptyToken { rule: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(retag::config_parse),
		help("check that retag.toml is valid TOML with an optional `target` and `[[recipes]]` tables")
	)]
	ConfigParse(String),

	#[error("unknown recipe: `{name}`")]
	#[diagnostic(code(retag::unknown_recipe), help("available recipes: {available}"))]
	UnknownRecipe { name: String, available: String },

	#[error("duplicate recipe `{0}`")]
	#[diagnostic(
		code(retag::duplicate_recipe),
		help("recipe names must be unique across built-in recipes and retag.toml")
	)]
	DuplicateRecipe(String),

	#[error("rule `{rule}` still rewrites content that has already been rewritten")]
	#[diagnostic(
		code(retag::not_idempotent),
		help("make the rule's output unable to match its own pattern, or add an `unless` guard")
	)]
	NotIdempotent { rule: String },
}

pub type RetagResult<T> = Result<T, RetagError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
