//! Dotted property paths such as `owner.tags[2]` or `labels["en"]`.
//!
//! A path is evaluated against a value by looking up the descriptor of each
//! intermediate value in a [`DescriptorCache`]. A property followed by an
//! index or key uses the property's `GET_INDEXED` or `GET_MAPPED` getter
//! method when the type has one; otherwise the element is taken from the
//! container the property's `GET` accessor yields.
//!
//! # Examples
//!
//! ```
//! use vc_accessor::derive::Reflect;
//! use vc_accessor::descriptor::DescriptorCache;
//! use vc_accessor::path::PropertyPath;
//!
//! #[derive(Reflect, Clone)]
//! #[reflect(clone)]
//! struct Bag {
//!     pub tags: Vec<String>,
//! }
//!
//! #[derive(Reflect)]
//! struct Shelf {
//!     pub bag: Bag,
//! }
//!
//! let cache = DescriptorCache::default();
//! cache.register::<Shelf>();
//! cache.register::<Bag>();
//!
//! let shelf = Shelf { bag: Bag { tags: vec!["a".into(), "b".into()] } };
//! let path = PropertyPath::parse("bag.tags[1]").unwrap();
//!
//! let tag = path.read(&cache, &shelf).unwrap();
//! assert_eq!(tag.downcast_ref::<String>().unwrap(), "b");
//! ```

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::str::FromStr;

use thiserror::Error;

use crate::Reflect;
use crate::access::{AccessError, AccessorMode, AccessorSource, PropertyName, clone_value};
use crate::descriptor::{Descriptor, DescriptorCache};
use crate::member::ArgList;
use crate::ops::container;

// -----------------------------------------------------------------------------
// Segment

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// `.name`
    Property(PropertyName),
    /// `[3]`
    Index(usize),
    /// `["key"]`
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => {
                f.write_str("[\"")?;
                for c in key.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_str("\"]")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ParseError

/// A malformed property path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid property path `{path}` at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset of the offending character.
    pub offset: usize,
    pub message: &'static str,
    pub path: String,
}

// -----------------------------------------------------------------------------
// PropertyPath

/// A parsed, non-empty property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<Segment>,
}

impl PropertyPath {
    /// Parses `name(.name | [index] | ["key"])*`.
    ///
    /// A path may also start with a bracket segment, e.g. `[0].name`.
    /// Keys accept `\"` and `\\` escapes.
    pub fn parse(path: &str) -> Result<Self, ParseError> {
        Parser { path, offset: 0 }.parse()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Evaluates the path against `target`, returning an owned copy of the
    /// value it names.
    ///
    /// Fields and container elements are borrowed along the way; only the
    /// final value and the results of getter methods are owned.
    pub fn read(&self, cache: &DescriptorCache, target: &dyn Reflect) -> Result<Box<dyn Reflect>, AccessError> {
        walk(cache, target, &self.segments)
    }
}

/// Follows `segments` from `value`, cloning only the value they end at.
fn walk(cache: &DescriptorCache, value: &dyn Reflect, segments: &[Segment]) -> Result<Box<dyn Reflect>, AccessError> {
    let Some((segment, rest)) = segments.split_first() else {
        return clone_value(value);
    };
    match segment {
        Segment::Property(name) => {
            let descriptor = cache.descriptor_of(value)?;
            if let Some((element, rest)) = element_method(&descriptor, name, value, rest) {
                return walk(cache, &*element?, rest);
            }
            descriptor
                .require(name, AccessorMode::Get)?
                .with_value(value, |property| walk(cache, property, rest))
        }
        Segment::Index(index) => walk(cache, container::get(value, index)?, rest),
        Segment::Key(key) => walk(cache, container::get(value, key)?, rest),
    }
}

/// Reads `name[index]` or `name["key"]` through a getter method taking the
/// index or key, when the type has one.
fn element_method<'s>(
    descriptor: &Descriptor,
    name: &str,
    value: &dyn Reflect,
    rest: &'s [Segment],
) -> Option<(Result<Box<dyn Reflect>, AccessError>, &'s [Segment])> {
    let (next, after) = rest.split_first()?;
    let (mode, args) = match next {
        Segment::Index(index) => (AccessorMode::GetIndexed, ArgList::new().with(*index)),
        Segment::Key(key) => (AccessorMode::GetMapped, ArgList::new().with(key.clone())),
        Segment::Property(_) => return None,
    };
    let accessor = descriptor.accessor(name, mode)?;
    if accessor.source() != AccessorSource::Method {
        return None;
    }
    Some((accessor.read(value, args), after))
}

impl FromStr for PropertyPath {
    type Err = ParseError;

    #[inline]
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Property(_)) {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Parser

struct Parser<'a> {
    path: &'a str,
    offset: usize,
}

impl Parser<'_> {
    fn error(&self, offset: usize, message: &'static str) -> ParseError {
        ParseError {
            offset,
            message,
            path: self.path.to_string(),
        }
    }

    fn rest(&self) -> &str {
        &self.path[self.offset..]
    }

    fn parse(mut self) -> Result<PropertyPath, ParseError> {
        let mut segments = Vec::new();
        if self.path.is_empty() {
            return Err(self.error(0, "empty path"));
        }
        if !self.rest().starts_with('[') {
            segments.push(self.property()?);
        }
        while let Some(next) = self.rest().chars().next() {
            match next {
                '.' => {
                    self.offset += 1;
                    segments.push(self.property()?);
                }
                '[' => segments.push(self.bracket()?),
                _ => return Err(self.error(self.offset, "expected `.` or `[`")),
            }
        }
        Ok(PropertyPath { segments })
    }

    fn property(&mut self) -> Result<Segment, ParseError> {
        let rest = self.rest();
        let len = rest.find(['.', '[', ']', '"']).unwrap_or(rest.len());
        let name = PropertyName::new(&rest[..len]).ok_or_else(|| self.error(self.offset, "expected a property name"))?;
        self.offset += len;
        Ok(Segment::Property(name))
    }

    fn bracket(&mut self) -> Result<Segment, ParseError> {
        let open = self.offset;
        self.offset += 1;
        let segment = if self.rest().starts_with('"') {
            self.offset += 1;
            Segment::Key(self.quoted(open)?)
        } else {
            let rest = self.rest();
            let len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if len == 0 {
                return Err(self.error(self.offset, "expected an index or a quoted key"));
            }
            let index = rest[..len]
                .parse()
                .map_err(|_| self.error(self.offset, "index out of range"))?;
            self.offset += len;
            Segment::Index(index)
        };
        if !self.rest().starts_with(']') {
            return Err(self.error(self.offset, "expected `]`"));
        }
        self.offset += 1;
        Ok(segment)
    }

    /// Reads a key up to its closing quote; `open` is the offset of `[`.
    fn quoted(&mut self, open: usize) -> Result<String, ParseError> {
        let mut key = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((at, c)) = chars.next() {
            match c {
                '"' => {
                    self.offset += at + 1;
                    return Ok(key);
                }
                '\\' => match chars.next() {
                    Some((_, escaped @ ('"' | '\\'))) => key.push(escaped),
                    _ => return Err(self.error(self.offset + at, "invalid escape")),
                },
                c => key.push(c),
            }
        }
        Err(self.error(open, "unterminated key"))
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseError, PropertyPath, Segment};
    use crate::access::PropertyName;
    use alloc::string::ToString;

    fn name(name: &str) -> Segment {
        Segment::Property(PropertyName::new(name).unwrap())
    }

    #[test]
    fn parse_segments() {
        let path = PropertyPath::parse("owner.tags[2].labels[\"e\\\"n\"]").unwrap();
        assert_eq!(
            path.segments(),
            [
                name("owner"),
                name("tags"),
                Segment::Index(2),
                name("labels"),
                Segment::Key("e\"n".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "owner.tags[2].labels[\"e\\\"n\"]");
    }

    #[test]
    fn display_parses_back() {
        let path = PropertyPath {
            segments: alloc::vec![name("labels"), Segment::Key("a\nb \"c\" \\ é".to_string())],
        };
        let shown = path.to_string();
        assert_eq!(shown, "labels[\"a\nb \\\"c\\\" \\\\ é\"]");
        assert_eq!(PropertyPath::parse(&shown).unwrap(), path);
    }

    #[test]
    fn parse_leading_index() {
        let path: PropertyPath = "[0].name".parse().unwrap();
        assert_eq!(path.segments(), [Segment::Index(0), name("name")]);
    }

    #[test]
    fn parse_errors() {
        let offset = |path: &str| PropertyPath::parse(path).map_err(|err: ParseError| err.offset).unwrap_err();
        assert_eq!(offset(""), 0);
        assert_eq!(offset("tags."), 5);
        assert_eq!(offset("tags[x]"), 5);
        assert_eq!(offset("tags[1"), 6);
        assert_eq!(offset("tags[\"en]"), 4);
        assert_eq!(offset("tags[1]x"), 7);
    }
}
