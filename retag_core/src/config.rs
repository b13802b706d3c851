use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::Recipe;
use crate::RetagError;
use crate::RetagResult;
use crate::Rule;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["retag.toml", ".retag.toml", ".config/retag.toml"];

/// Configuration loaded from a `retag.toml` file.
///
/// ```toml
/// target = "frontend/src/pages/ConsultationFormPage.tsx"
///
/// [[recipes]]
/// name = "card-to-paper"
/// description = "Swap AppCard for Paper"
/// message = "Swapped cards"
///
/// [[recipes.rules]]
/// type = "substitute"
/// pattern = '(?s)<AppCard>(?P<body>.*?)</AppCard>'
/// template = '<Paper>${body}</Paper>'
/// unless = 'never-matches'
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetagConfig {
	/// File rewritten by recipes that do not name their own target.
	#[serde(default)]
	pub target: Option<PathBuf>,
	/// Additional recipes, available next to the built-in ones.
	#[serde(default)]
	pub recipes: Vec<RecipeConfig>,
}

/// A `[[recipes]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeConfig {
	pub name: String,
	#[serde(default)]
	pub description: String,
	/// Printed after a successful run. Defaults to `Applied <name>`.
	#[serde(default)]
	pub message: Option<String>,
	/// Overrides the top-level `target` for this recipe.
	#[serde(default)]
	pub target: Option<PathBuf>,
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// A `[[recipes.rules]]` entry.
#[derive(Debug, Deserialize)]
pub struct RuleConfig {
	/// Name shown in reports. Defaults to `rule-<n>` (1-indexed).
	#[serde(default)]
	pub name: Option<String>,
	/// Guard pattern; the rule is skipped when it matches the buffer.
	#[serde(default)]
	pub unless: Option<String>,
	#[serde(flatten)]
	pub action: RuleActionConfig,
}

/// The action part of a `[[recipes.rules]]` entry, selected by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RuleActionConfig {
	Substitute {
		pattern: String,
		template: String,
	},
	Replace {
		from: String,
		to: String,
	},
	Delete {
		token: String,
		/// Only delete occurrences that start at a word boundary.
		#[serde(default)]
		word: bool,
	},
}

impl RetagConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> RetagResult<Option<RetagConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;

		Ok(Some(config))
	}

	/// Parse config file content.
	pub fn parse(content: &str) -> RetagResult<RetagConfig> {
		toml::from_str(content).map_err(|e| RetagError::ConfigParse(e.to_string()))
	}
}

impl RecipeConfig {
	/// Compile the configured rules into a [`Recipe`]. Fails on the first
	/// rule with an invalid pattern, template or token.
	pub fn compile(&self) -> RetagResult<Recipe> {
		let rules = self
			.rules
			.iter()
			.enumerate()
			.map(|(index, rule)| rule.compile(index + 1))
			.collect::<RetagResult<Vec<_>>>()?;

		Ok(Recipe {
			name: self.name.clone(),
			description: self.description.clone(),
			message: self
				.message
				.clone()
				.unwrap_or_else(|| format!("Applied {}", self.name)),
			target: self.target.clone(),
			rules,
		})
	}
}

impl RuleConfig {
	fn compile(&self, position: usize) -> RetagResult<Rule> {
		let name = self
			.name
			.clone()
			.unwrap_or_else(|| format!("rule-{position}"));

		let rule = match &self.action {
			RuleActionConfig::Substitute { pattern, template } => {
				Rule::substitute(name, pattern, template.as_str())?
			}
			RuleActionConfig::Replace { from, to } => {
				Rule::replace(name, from.as_str(), to.as_str())?
			}
			RuleActionConfig::Delete { token, word: true } => {
				Rule::delete_word(name, token.as_str())?
			}
			RuleActionConfig::Delete { token, word: false } => Rule::delete(name, token.as_str())?,
		};

		match &self.unless {
			Some(guard) => rule.unless(guard),
			None => Ok(rule),
		}
	}
}
