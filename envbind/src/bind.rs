//! The type-driven binder: the [`Bind`] trait, the [`Context`] threaded
//! through the recursive walk, and the [`EnvParser`] entry point.
//!
//! Dispatch by structural kind is expressed through impls: scalars parse a
//! resolved string, `Option`/`Box` forward to their pointee, `Vec` and the map
//! types split one resolved string into elements, and `#[derive(Bind)]`
//! generates the struct arm that composes child keys per field.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use num_complex::{Complex32, Complex64};

use crate::error::BindError;
use crate::source;
use crate::tag::{NumberBounds, Tag};

const SEQUENCE_SPLIT: char = ',';
const MAP_ENTRY_SPLIT: char = '|';
const MAP_VALUE_SPLIT: char = ':';

/// Entry point for a binding pass.
///
/// Holds the key prefix and the split character joining key segments. The
/// configuration is immutable once built; chain [`with_prefix`] and
/// [`with_split_char`] before the first [`start`] call.
///
/// [`with_prefix`]: EnvParser::with_prefix
/// [`with_split_char`]: EnvParser::with_split_char
/// [`start`]: EnvParser::start
#[derive(Debug, Clone)]
pub struct EnvParser {
    prefix: String,
    split_char: String,
}

impl EnvParser {
    pub const DEFAULT_PREFIX: &'static str = "ENV";
    pub const DEFAULT_SPLIT_CHAR: &'static str = "_";

    pub fn new() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
            split_char: Self::DEFAULT_SPLIT_CHAR.to_string(),
        }
    }

    /// Replace the key prefix (default `"ENV"`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the character joining key segments (default `"_"`).
    pub fn with_split_char(mut self, split_char: impl Into<String>) -> Self {
        self.split_char = split_char.into();
        self
    }

    /// Bind `target` in place from the environment.
    ///
    /// Walks the target depth-first, resolving each leaf under its composed
    /// key. The first error aborts the pass; the target may be left partially
    /// populated.
    pub fn start<T: Bind>(&self, target: &mut T) -> Result<(), BindError> {
        target.bind(&Context::root(self))
    }

    /// Bind a fresh `T::default()` and return it.
    pub fn load<T: Bind + Default>(&self) -> Result<T, BindError> {
        let mut target = T::default();
        self.start(&mut target)?;
        Ok(target)
    }
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Binding context for one recursion point.
///
/// Carries the composed lookup key plus the required/default/bounds
/// directives of the current node. Each recursive step derives a new child
/// context; contexts are never mutated in place. A *synthetic* context (used
/// for sequence and map elements) suppresses environment lookup so that the
/// element's piece of the collection literal is consumed directly.
pub struct Context<'a> {
    conf: &'a EnvParser,
    key: String,
    synthetic: bool,
    default: String,
    required: bool,
    bounds: Option<NumberBounds>,
}

impl<'a> Context<'a> {
    fn root(conf: &'a EnvParser) -> Self {
        Context {
            conf,
            key: conf.prefix.clone(),
            synthetic: false,
            default: String::new(),
            required: false,
            bounds: None,
        }
    }

    /// Parse `directive` and bind `field` under the resulting child context.
    ///
    /// Fields whose directive is empty, or parses to a descriptor with no
    /// name and no `inline` marker, are skipped. An `inline` descriptor binds
    /// the field under this context unchanged, so its children attach
    /// directly to the parent key.
    pub fn bind_field<T: Bind>(&self, field: &mut T, directive: &str) -> Result<(), BindError> {
        let Some(tag) = Tag::parse(directive)? else {
            return Ok(());
        };
        if tag.inline {
            return field.bind(self);
        }
        if tag.name.is_empty() {
            return Ok(());
        }
        field.bind(&self.child(&tag))
    }

    fn child(&self, tag: &Tag) -> Context<'a> {
        Context {
            conf: self.conf,
            key: format!("{}{}{}", self.key, self.conf.split_char, tag.name),
            synthetic: self.synthetic,
            default: tag.default.clone(),
            required: tag.required,
            bounds: tag.bounds,
        }
    }

    /// Child context for one element of a collection literal: environment
    /// lookup is suppressed and `piece` stands in as the value.
    fn literal(&self, piece: &str) -> Context<'a> {
        Context {
            conf: self.conf,
            key: self.key.clone(),
            synthetic: true,
            default: piece.to_string(),
            required: false,
            bounds: None,
        }
    }

    /// Resolve the raw string for this node.
    ///
    /// `current_is_unset` reports whether the target still holds its zero
    /// value; the tag default only applies while it does.
    pub fn resolve(&self, current_is_unset: bool) -> String {
        if self.synthetic {
            if current_is_unset {
                return self.default.clone();
            }
            return String::new();
        }
        source::lookup(&self.key, current_is_unset, &self.default)
    }

    /// Whether this node was marked `required`.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The composed lookup key for this node.
    pub fn key(&self) -> &str {
        &self.key
    }

    // The synthetic top-level call: a scalar handed directly to `start` has
    // nothing to bind.
    fn is_root(&self) -> bool {
        !self.synthetic && self.key == self.conf.prefix
    }

    fn resolve_leaf(&self, current_is_unset: bool) -> Result<String, BindError> {
        let raw = self.resolve(current_is_unset);
        if raw.is_empty() && current_is_unset && self.required {
            return Err(BindError::required(&self.key));
        }
        Ok(raw)
    }

    fn check_bounds(&self, value: f64) -> Result<(), BindError> {
        match &self.bounds {
            Some(bounds) => bounds.check(value, &self.key),
            None => Ok(()),
        }
    }

    // Required collections are satisfied by a non-empty pre-existing value;
    // an empty one with nothing resolved fails.
    fn unresolved_collection(&self, currently_empty: bool) -> Result<(), BindError> {
        if self.required && currently_empty {
            return Err(BindError::required(&self.key));
        }
        Ok(())
    }
}

/// A value that can be bound in place from the environment.
///
/// Implemented for scalars, `Option<T>`, `Box<T>`, `Vec<T>`, `HashMap<K, V>`
/// and `BTreeMap<K, V>`; derive it for structs with `#[derive(Bind)]`, or
/// route a type through its [`DecodeEnv`](crate::DecodeEnv) impl with
/// [`impl_bind_via_decoder!`](crate::impl_bind_via_decoder).
pub trait Bind {
    /// Bind this value under the given context.
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError>;

    /// Whether this value still holds its zero state. Gates the tag-default
    /// fallback: a pre-populated value is never clobbered by a tag default.
    fn is_unset(&self) -> bool;
}

impl Bind for String {
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        if cx.is_root() {
            return Ok(());
        }
        let raw = cx.resolve_leaf(self.is_unset())?;
        if !raw.is_empty() {
            *self = raw;
        }
        Ok(())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Bind for bool {
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        if cx.is_root() {
            return Ok(());
        }
        let raw = cx.resolve_leaf(self.is_unset())?;
        if !raw.is_empty() {
            *self = raw
                .parse()
                .map_err(|e| BindError::parse_error::<bool>(cx.key(), e))?;
        }
        Ok(())
    }

    fn is_unset(&self) -> bool {
        !*self
    }
}

macro_rules! bind_number {
    ($($ty:ty),* $(,)?) => {$(
        impl Bind for $ty {
            fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
                if cx.is_root() {
                    return Ok(());
                }
                let raw = cx.resolve_leaf(self.is_unset())?;
                if raw.is_empty() {
                    return Ok(());
                }
                let value: $ty = raw
                    .parse()
                    .map_err(|e| BindError::parse_error::<$ty>(cx.key(), e))?;
                cx.check_bounds(value as f64)?;
                *self = value;
                Ok(())
            }

            fn is_unset(&self) -> bool {
                *self == 0 as $ty
            }
        }
    )*};
}

bind_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

// Complex scalars parse via num-complex's `FromStr` ("1+2i"); range bounds do
// not apply to them.
macro_rules! bind_complex {
    ($($ty:ty),* $(,)?) => {$(
        impl Bind for $ty {
            fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
                if cx.is_root() {
                    return Ok(());
                }
                let raw = cx.resolve_leaf(self.is_unset())?;
                if !raw.is_empty() {
                    *self = raw
                        .parse()
                        .map_err(|e| BindError::parse_error::<$ty>(cx.key(), e))?;
                }
                Ok(())
            }

            fn is_unset(&self) -> bool {
                *self == <$ty>::default()
            }
        }
    )*};
}

bind_complex!(Complex32, Complex64);

impl<T: Bind + Default> Bind for Option<T> {
    /// A `None` is lazily populated with the pointee's default before
    /// recursion so that nested fields have writable storage; the pointer
    /// itself is transparent to key composition.
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        self.get_or_insert_with(T::default).bind(cx)
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl<T: Bind> Bind for Box<T> {
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        (**self).bind(cx)
    }

    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }
}

impl<T: Bind + Default> Bind for Vec<T> {
    /// The whole sequence resolves from one environment value, split on `,`
    /// with each piece trimmed, and replaces the current contents wholesale.
    /// Nothing resolved leaves the vector untouched.
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        let raw = cx.resolve(self.is_unset());
        if raw.is_empty() {
            return cx.unresolved_collection(self.is_empty());
        }
        let mut elements = Vec::new();
        for piece in raw.split(SEQUENCE_SPLIT) {
            let mut element = T::default();
            element.bind(&cx.literal(piece.trim()))?;
            elements.push(element);
        }
        if cx.required() && elements.is_empty() {
            return Err(BindError::required(cx.key()));
        }
        *self = elements;
        Ok(())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

// One map entry: key and value substrings each bind recursively into fresh
// defaults, so entries of struct, pointer or custom-decoded types work the
// same way as plain scalars.
fn bind_entry<K, V>(cx: &Context<'_>, entry: &str) -> Result<(K, V), BindError>
where
    K: Bind + Default,
    V: Bind + Default,
{
    let Some(index) = entry.find(MAP_VALUE_SPLIT) else {
        return Err(BindError::tag_syntax(
            entry,
            format!("map entry is missing a '{MAP_VALUE_SPLIT}' separator"),
        ));
    };
    let mut key = K::default();
    key.bind(&cx.literal(&entry[..index]))?;
    let mut value = V::default();
    value.bind(&cx.literal(&entry[index + 1..]))?;
    Ok((key, value))
}

impl<K, V> Bind for HashMap<K, V>
where
    K: Bind + Default + Eq + Hash,
    V: Bind + Default,
{
    /// The whole map resolves from one environment value: `|`-separated
    /// entries, each split at its first `:`. Nothing resolved leaves the map
    /// untouched.
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        let raw = cx.resolve(self.is_unset());
        if raw.is_empty() {
            return cx.unresolved_collection(self.is_empty());
        }
        let mut entries = HashMap::new();
        for entry in raw.split(MAP_ENTRY_SPLIT) {
            let (key, value) = bind_entry(cx, entry)?;
            entries.insert(key, value);
        }
        if cx.required() && entries.is_empty() {
            return Err(BindError::required(cx.key()));
        }
        *self = entries;
        Ok(())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Bind for BTreeMap<K, V>
where
    K: Bind + Default + Ord,
    V: Bind + Default,
{
    fn bind(&mut self, cx: &Context<'_>) -> Result<(), BindError> {
        let raw = cx.resolve(self.is_unset());
        if raw.is_empty() {
            return cx.unresolved_collection(self.is_empty());
        }
        let mut entries = BTreeMap::new();
        for entry in raw.split(MAP_ENTRY_SPLIT) {
            let (key, value) = bind_entry(cx, entry)?;
            entries.insert(key, value);
        }
        if cx.required() && entries.is_empty() {
            return Err(BindError::required(cx.key()));
        }
        *self = entries;
        Ok(())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}
