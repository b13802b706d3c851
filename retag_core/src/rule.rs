use std::borrow::Cow;
use std::fmt;

use regex::Captures;
use regex::Regex;

use crate::RetagError;
use crate::RetagResult;

/// A single match-and-replace transformation applied to a buffer.
///
/// Rules are applied in sequence by [`rewrite`](crate::rewrite). Each rule
/// sees the output of the rules before it.
#[derive(Debug, Clone)]
pub struct Rule {
	name: String,
	action: RuleAction,
	unless: Option<Regex>,
}

/// What a [`Rule`] does to every match it finds.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum RuleAction {
	/// Replace every non-overlapping match of `pattern` with `template`
	/// expanded against the match's capture groups.
	Substitute { pattern: Regex, template: String },
	/// Replace every occurrence of the literal `from` with `to`.
	Replace { from: String, to: String },
	/// Remove every occurrence of `token` together with the whitespace
	/// directly before it.
	Delete {
		token: String,
		word: bool,
		matcher: Regex,
	},
}

impl RuleAction {
	/// Short lowercase label used in listings.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Substitute { .. } => "substitute",
			Self::Replace { .. } => "replace",
			Self::Delete { .. } => "delete",
		}
	}
}

/// The effect one rule had on a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
	/// Name of the rule.
	pub rule: String,
	/// Number of matches that were rewritten.
	pub substitutions: usize,
	/// True when the rule's `unless` guard matched and the rule did nothing.
	pub skipped: bool,
}

impl Rule {
	/// Create a structural substitution.
	///
	/// `template` may reference captures as `$1`, `$name` or `${name}`; a
	/// group that did not take part in the match expands to an empty string,
	/// which is how optional flags are carried over. Use `$$` for a literal
	/// dollar sign.
	pub fn substitute(
		name: impl Into<String>,
		pattern: &str,
		template: impl Into<String>,
	) -> RetagResult<Self> {
		let name = name.into();
		let template = template.into();
		let pattern = compile(&name, pattern)?;
		check_template(&name, &pattern, &template)?;

		Ok(Self {
			name,
			action: RuleAction::Substitute { pattern, template },
			unless: None,
		})
	}

	/// Create a literal replacement of every occurrence of `from`.
	pub fn replace(
		name: impl Into<String>,
		from: impl Into<String>,
		to: impl Into<String>,
	) -> RetagResult<Self> {
		let name = name.into();
		let from = from.into();
		if from.is_empty() {
			return Err(RetagError::EmptyToken { rule: name });
		}

		Ok(Self {
			name,
			action: RuleAction::Replace {
				from,
				to: to.into(),
			},
			unless: None,
		})
	}

	/// Create a token deletion that removes `token` wherever it appears.
	pub fn delete(name: impl Into<String>, token: impl Into<String>) -> RetagResult<Self> {
		Self::deletion(name.into(), token.into(), false)
	}

	/// Create a token deletion that only removes `token` where it starts at a
	/// word boundary, so deleting `TextField,` leaves `AppTextField,` alone.
	pub fn delete_word(name: impl Into<String>, token: impl Into<String>) -> RetagResult<Self> {
		Self::deletion(name.into(), token.into(), true)
	}

	fn deletion(name: String, token: String, word: bool) -> RetagResult<Self> {
		if token.is_empty() {
			return Err(RetagError::EmptyToken { rule: name });
		}

		let boundary = if word && token.starts_with(is_word_char) {
			r"\b"
		} else {
			""
		};
		let matcher = compile(&name, &format!(r"\s*{boundary}{}", regex::escape(&token)))?;

		Ok(Self {
			name,
			action: RuleAction::Delete {
				token,
				word,
				matcher,
			},
			unless: None,
		})
	}

	/// Skip this rule whenever `guard` matches anywhere in the buffer.
	pub fn unless(mut self, guard: &str) -> RetagResult<Self> {
		self.unless = Some(compile(&self.name, guard)?);
		Ok(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn action(&self) -> &RuleAction {
		&self.action
	}

	pub fn guard(&self) -> Option<&str> {
		self.unless.as_ref().map(Regex::as_str)
	}

	/// Apply this rule to `buffer`. The buffer is borrowed back unchanged
	/// when nothing matched.
	pub fn apply<'a>(&self, buffer: &'a str) -> (Cow<'a, str>, RuleReport) {
		if self.unless.as_ref().is_some_and(|guard| guard.is_match(buffer)) {
			return (Cow::Borrowed(buffer), self.report(0, true));
		}

		let (output, substitutions) = match &self.action {
			RuleAction::Substitute { pattern, template } => {
				substitute_all(pattern, template, buffer)
			}
			RuleAction::Replace { from, to } => {
				let count = buffer.matches(from.as_str()).count();
				if count == 0 {
					(Cow::Borrowed(buffer), 0)
				} else {
					(Cow::Owned(buffer.replace(from.as_str(), to)), count)
				}
			}
			RuleAction::Delete { matcher, .. } => delete_all(matcher, buffer),
		};

		(output, self.report(substitutions, false))
	}

	fn report(&self, substitutions: usize, skipped: bool) -> RuleReport {
		RuleReport {
			rule: self.name.clone(),
			substitutions,
			skipped,
		}
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.action {
			RuleAction::Substitute { pattern, .. } => {
				write!(f, "{} (substitute /{}/)", self.name, pattern.as_str())?;
			}
			RuleAction::Replace { from, to } => {
				write!(f, "{} (replace {from:?} -> {to:?})", self.name)?;
			}
			RuleAction::Delete { token, word, .. } => {
				let scope = if *word { "delete word" } else { "delete" };
				write!(f, "{} ({scope} {token:?})", self.name)?;
			}
		}

		if let Some(guard) = self.guard() {
			write!(f, " unless /{guard}/")?;
		}

		Ok(())
	}
}

fn compile(rule: &str, pattern: &str) -> RetagResult<Regex> {
	Regex::new(pattern).map_err(|e| {
		RetagError::InvalidPattern {
			rule: rule.to_string(),
			reason: e.to_string(),
		}
	})
}

fn substitute_all<'a>(pattern: &Regex, template: &str, buffer: &'a str) -> (Cow<'a, str>, usize) {
	let mut count = 0;
	let output = pattern.replace_all(buffer, |caps: &Captures<'_>| {
		count += 1;
		let mut expanded = String::new();
		caps.expand(template, &mut expanded);
		expanded
	});

	(output, count)
}

/// Delete until the token is gone. A single pass can splice two fragments
/// into a fresh occurrence; every pass shrinks the buffer so this ends.
fn delete_all<'a>(matcher: &Regex, buffer: &'a str) -> (Cow<'a, str>, usize) {
	let mut total = 0;
	let mut current = Cow::Borrowed(buffer);

	loop {
		let count = matcher.find_iter(&current).count();
		if count == 0 {
			return (current, total);
		}

		total += count;
		current = Cow::Owned(matcher.replace_all(&current, "").into_owned());
	}
}

fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

/// Verify that every `$ref` in `template` names a group `pattern` defines.
/// Mirrors the reference grammar used by [`Captures::expand`].
fn check_template(rule: &str, pattern: &Regex, template: &str) -> RetagResult<()> {
	let names: Vec<&str> = pattern.capture_names().flatten().collect();
	let group_count = pattern.captures_len();
	let bytes = template.as_bytes();
	let mut index = 0;

	while index < bytes.len() {
		if bytes[index] != b'$' {
			index += 1;
			continue;
		}

		let rest = &template[index + 1..];
		if rest.starts_with('$') {
			index += 2;
			continue;
		}

		let (reference, consumed) = if let Some(braced) = rest.strip_prefix('{') {
			match braced.find('}') {
				Some(end) => (&braced[..end], end + 2),
				// `expand` treats an unterminated brace as literal text.
				None => ("", 0),
			}
		} else {
			let end = rest
				.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
				.unwrap_or(rest.len());
			(&rest[..end], end)
		};

		if !reference.is_empty() {
			let known = match reference.parse::<usize>() {
				Ok(number) => number < group_count,
				Err(_) => names.contains(&reference),
			};

			if !known {
				return Err(RetagError::UnknownCaptureGroup {
					rule: rule.to_string(),
					group: reference.to_string(),
				});
			}
		}

		index += 1 + consumed;
	}

	Ok(())
}
