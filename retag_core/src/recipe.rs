use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use crate::RetagConfig;
use crate::RetagError;
use crate::RetagResult;
use crate::Rule;

/// File rewritten when neither the command line, the recipe nor `retag.toml`
/// names one.
pub const DEFAULT_TARGET: &str = "frontend/src/pages/ConsultationFormPage.tsx";

/// A named, ordered list of rules with the message printed once they have
/// been applied.
#[derive(Debug, Clone)]
pub struct Recipe {
	pub name: String,
	pub description: String,
	/// Confirmation printed after a successful run.
	pub message: String,
	/// File this recipe rewrites. Takes precedence over the `target` in
	/// `retag.toml`.
	pub target: Option<PathBuf>,
	pub rules: Vec<Rule>,
}

impl Recipe {
	/// Pick the file to rewrite: `explicit`, then the recipe's own target,
	/// then the config target, then [`DEFAULT_TARGET`]. Relative paths are
	/// joined onto `root`.
	pub fn resolve_target(
		&self,
		root: &Path,
		explicit: Option<&Path>,
		config: Option<&RetagConfig>,
	) -> PathBuf {
		let target = explicit
			.or(self.target.as_deref())
			.or_else(|| config.and_then(|config| config.target.as_deref()))
			.unwrap_or_else(|| Path::new(DEFAULT_TARGET));

		root.join(target)
	}
}

/// Convert MUI `<Accordion>` blocks into `<Section>` wrappers and drop the
/// accordion imports.
pub fn accordion_to_section() -> RetagResult<Recipe> {
	let rules = vec![
		Rule::substitute(
			"import-section",
			r"import \{ AppCard, AppButton, AppTextField, PageHeader \} from '\.\./ui';",
			"import { AppCard, AppButton, AppTextField, PageHeader, Section } from '../ui';",
		)?,
		// Pages without any `../ui` import get one after the first material import.
		Rule::substitute(
			"add-section-import",
			r"(?s)\A(?P<head>.*?from '@mui/material';\n)",
			"${head}import { AppCard, AppButton, AppTextField, PageHeader, Section } from '../ui';\n",
		)?
		.unless(r"from '\.\./ui'")?,
		Rule::substitute(
			"accordion-to-section",
			r#"(?s)<Accordion(?P<expanded> defaultExpanded)?>.*?<Typography variant="h6">(?P<title>.*?)</Typography>.*?<AccordionDetails[^>]*>(?P<body>.*?)</AccordionDetails>\s*</Accordion>"#,
			r#"<Section title="${title}"${expanded}>${body}</Section>"#,
		)?,
		Rule::delete("drop-accordion-import", "Accordion,")?,
		Rule::delete("drop-accordion-summary-import", "AccordionSummary,")?,
		Rule::delete("drop-accordion-details-import", "AccordionDetails,")?,
	];

	Ok(Recipe {
		name: "accordion-to-section".to_string(),
		description: "Replace Accordion blocks with Section and remove their imports".to_string(),
		message: "Refactoring complete!".to_string(),
		target: None,
		rules,
	})
}

/// Rename `TextField` usages to `AppTextField`.
pub fn app_text_field() -> RetagResult<Recipe> {
	let rules = vec![
		Rule::replace("rename-text-field", "<TextField", "<AppTextField")?,
		Rule::delete_word("drop-text-field-import", "TextField,")?,
	];

	Ok(Recipe {
		name: "app-text-field".to_string(),
		description: "Rename TextField to AppTextField and remove the material import".to_string(),
		message: "Renamed TextField to AppTextField".to_string(),
		target: None,
		rules,
	})
}

/// Undo [`app_text_field`]: rename back and restore the material import.
pub fn revert_app_text_field() -> RetagResult<Recipe> {
	let rules = vec![
		Rule::replace("revert-text-field", "<AppTextField", "<TextField")?,
		Rule::replace(
			"restore-text-field-import",
			"  Button,\n  Grid,\n",
			"  Button,\n  TextField,\n  Grid,\n",
		)?
		.unless(r"\bTextField,")?,
	];

	Ok(Recipe {
		name: "revert-app-text-field".to_string(),
		description: "Rename AppTextField back to TextField and restore its import".to_string(),
		message: "Reverted AppTextField to TextField".to_string(),
		target: None,
		rules,
	})
}

/// All recipes that ship with retag.
pub fn builtin_recipes() -> RetagResult<Vec<Recipe>> {
	Ok(vec![
		accordion_to_section()?,
		app_text_field()?,
		revert_app_text_field()?,
	])
}

/// Built-in recipes plus any defined in `retag.toml`, looked up by name.
#[derive(Debug, Default)]
pub struct RecipeBook {
	recipes: BTreeMap<String, Recipe>,
}

impl RecipeBook {
	/// Collect the built-in recipes and compile those from `config`.
	pub fn new(config: Option<&RetagConfig>) -> RetagResult<Self> {
		let mut book = Self::default();

		for recipe in builtin_recipes()? {
			book.insert(recipe)?;
		}

		if let Some(config) = config {
			for recipe in &config.recipes {
				book.insert(recipe.compile()?)?;
			}
		}

		Ok(book)
	}

	/// Add a recipe. Names must be unique.
	pub fn insert(&mut self, recipe: Recipe) -> RetagResult<()> {
		if self.recipes.contains_key(&recipe.name) {
			return Err(RetagError::DuplicateRecipe(recipe.name));
		}

		self.recipes.insert(recipe.name.clone(), recipe);
		Ok(())
	}

	pub fn get(&self, name: &str) -> RetagResult<&Recipe> {
		self.recipes.get(name).ok_or_else(|| {
			RetagError::UnknownRecipe {
				name: name.to_string(),
				available: self.names().join(", "),
			}
		})
	}

	/// Recipe names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		self.recipes.keys().map(String::as_str).collect()
	}

	/// Recipes in name order.
	pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
		self.recipes.values()
	}

	pub fn len(&self) -> usize {
		self.recipes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipes.is_empty()
	}
}
