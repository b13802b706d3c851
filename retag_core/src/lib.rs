//! `retag_core` is the core library for the retag rewrite tool. It applies an
//! ordered list of pattern rules to a single text buffer, typically one UI
//! source file, and writes the result back. Rules are written so that running
//! them a second time changes nothing.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   → read_buffer (whole file into a String)
//!   → Rule 1 → Rule 2 → … → Rule N (each sees the previous output)
//!   → write back (only when the content changed)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Loading `retag.toml`, which can set a default target and
//!   define extra recipes.
//! - [`recipe`] - The built-in recipes and the [`RecipeBook`] used to look
//!   them up by name.
//!
//! ## Key Types
//!
//! - [`Rule`] - A structural substitution, literal replacement, or token
//!   deletion, optionally guarded by an `unless` pattern.
//! - [`Recipe`] - A named rule list with a completion message.
//! - [`RewriteOutcome`] - Rewritten content plus a [`RuleReport`] per rule.
//! - [`FileRewrite`] - The same for a file on disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use retag_core::Rule;
//! use retag_core::rewrite;
//!
//! let rules = vec![
//! 	Rule::substitute(
//! 		"accordion",
//! 		r#"(?s)<Accordion(?P<expanded> defaultExpanded)?>.*?<Typography variant="h6">(?P<title>.*?)</Typography>.*?<AccordionDetails[^>]*>(?P<body>.*?)</AccordionDetails>\s*</Accordion>"#,
//! 		r#"<Section title="${title}"${expanded}>${body}</Section>"#,
//! 	)
//! 	.unwrap(),
//! ];
//!
//! let input = r#"<Accordion defaultExpanded><Typography variant="h6">Details</Typography><AccordionDetails>BODY</AccordionDetails></Accordion>"#;
//! assert_eq!(
//! 	rewrite(input, &rules),
//! 	r#"<Section title="Details" defaultExpanded>BODY</Section>"#
//! );
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use recipe::*;
pub use rule::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod recipe;
mod rule;

#[cfg(test)]
mod __fixtures;
