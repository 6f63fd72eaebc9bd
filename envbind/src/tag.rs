//! Tag grammar for field binding directives.
//!
//! A directive is a semicolon-separated list of clauses, e.g.
//! `"TIMEOUT;default: 5;gte: 1;lte: 60"`. A clause is either a bare literal
//! (the field's key segment, or one of the `required`/`inline`/`-` markers)
//! or a `key: value` pair.

use crate::error::BindError;

const CLAUSE_SPLIT: char = ';';
const VALUE_SPLIT: char = ':';

const KEY_NAME: &str = "name";
const KEY_DEFAULT: &str = "default";

const SIG_SKIP: &str = "-";
const SIG_REQUIRED: &str = "required";
const SIG_INLINE: &str = "inline";

const KEY_LESS_THAN: &str = "lt";
const KEY_LESS_OR_EQUAL: &str = "lte";
const KEY_GREATER_THAN: &str = "gt";
const KEY_GREATER_OR_EQUAL: &str = "gte";

/// Parsed binding descriptor for one field occurrence.
///
/// Produced fresh by [`Tag::parse`] each time a field is visited and never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Tag {
    /// Key segment this field contributes; empty means "skip this field".
    pub name: String,
    /// Fallback literal, used only when the environment has no value and the
    /// field still holds its zero value.
    pub default: String,
    /// Fail the pass when the field resolves to nothing.
    pub required: bool,
    /// Bind children directly under the parent key, without this field's own
    /// segment.
    pub inline: bool,
    /// Numeric range bounds, present only when a bound clause was given.
    pub bounds: Option<NumberBounds>,
}

/// Optional numeric bounds attached to a tag.
///
/// A value satisfies the bounds iff it satisfies every present one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberBounds {
    pub less_than: Option<f64>,
    pub less_or_equal: Option<f64>,
    pub greater_than: Option<f64>,
    pub greater_or_equal: Option<f64>,
}

impl NumberBounds {
    fn set(&mut self, key: &str, value: &str, directive: &str) -> Result<(), BindError> {
        let threshold: f64 = value
            .parse()
            .map_err(|e| BindError::tag_syntax(directive, format!("bound '{key}': {e}")))?;
        match key {
            KEY_LESS_THAN => self.less_than = Some(threshold),
            KEY_LESS_OR_EQUAL => self.less_or_equal = Some(threshold),
            KEY_GREATER_THAN => self.greater_than = Some(threshold),
            KEY_GREATER_OR_EQUAL => self.greater_or_equal = Some(threshold),
            _ => unreachable!("caller dispatches only bound keys"),
        }
        Ok(())
    }

    /// Check a parsed value against every present bound.
    ///
    /// Note the deliberate asymmetry: `lt`/`gt` are strict exclusions while
    /// `lte`/`gte` are inclusive.
    pub fn check(&self, value: f64, name: &str) -> Result<(), BindError> {
        if let Some(limit) = self.less_than {
            if value >= limit {
                return Err(range(name, value, "less than", limit));
            }
        }
        if let Some(limit) = self.less_or_equal {
            if value > limit {
                return Err(range(name, value, "less than or equal to", limit));
            }
        }
        if let Some(limit) = self.greater_than {
            if value <= limit {
                return Err(range(name, value, "greater than", limit));
            }
        }
        if let Some(limit) = self.greater_or_equal {
            if value < limit {
                return Err(range(name, value, "greater than or equal to", limit));
            }
        }
        Ok(())
    }
}

fn range(name: &str, value: f64, relation: &'static str, limit: f64) -> BindError {
    BindError::Range {
        name: name.to_string(),
        value,
        relation,
        limit,
    }
}

impl Tag {
    /// Parse a full directive string.
    ///
    /// An empty directive parses to `Ok(None)`: the field takes no part in
    /// binding. Malformed numeric bound literals fail with
    /// [`BindError::TagSyntax`]; unknown `key: value` clauses are ignored.
    pub fn parse(directive: &str) -> Result<Option<Tag>, BindError> {
        if directive.is_empty() {
            return Ok(None);
        }
        let mut tag = Tag::default();
        for clause in directive.split(CLAUSE_SPLIT) {
            match clause {
                SIG_SKIP => continue,
                SIG_REQUIRED => tag.required = true,
                SIG_INLINE => tag.inline = true,
                _ => match clause.find(VALUE_SPLIT) {
                    None => tag.name = clause.to_string(),
                    Some(index) => {
                        let value = clause[index + 1..].trim();
                        match &clause[..index] {
                            KEY_NAME => tag.name = value.to_string(),
                            KEY_DEFAULT => tag.default = value.to_string(),
                            key @ (KEY_LESS_THAN | KEY_LESS_OR_EQUAL | KEY_GREATER_THAN
                            | KEY_GREATER_OR_EQUAL) => {
                                tag.bounds
                                    .get_or_insert_with(NumberBounds::default)
                                    .set(key, value, directive)?;
                            }
                            _ => {}
                        }
                    }
                },
            }
        }
        Ok(Some(tag))
    }
}
