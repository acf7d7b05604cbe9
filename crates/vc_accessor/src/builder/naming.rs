//! Property naming rules shared by the method builders.
//!
//! Both `camelCase` and `snake_case` method names are understood:
//! `getTags`, `get_tags` and, with bare getters enabled, `tags` all name the
//! property `tags`.

use alloc::string::String;

use crate::access::PropertyName;

pub const GET: &str = "get";
pub const SET: &str = "set";
pub const IS: &str = "is";
pub const ADD: &str = "add";
pub const REMOVE: &str = "remove";
pub const PUT: &str = "put";

const VERBS: [&str; 6] = [GET, SET, IS, ADD, REMOVE, PUT];

/// `(camelCase, snake_case, word)` forms of the size suffixes, longest first.
const SIZE_SUFFIXES: [(&str, &str, &str); 4] = [
    ("Length", "_length", "length"),
    ("Count", "_count", "count"),
    ("Size", "_size", "size"),
    ("Len", "_len", "len"),
];

/// Strips `prefix` when it is followed by `_` or an upper-case letter.
///
/// ```
/// use vc_accessor::builder::naming::strip_prefix;
///
/// assert_eq!(strip_prefix("getTags", "get"), Some("Tags"));
/// assert_eq!(strip_prefix("get_tags", "get"), Some("tags"));
/// assert_eq!(strip_prefix("getaway", "get"), None);
/// assert_eq!(strip_prefix("get", "get"), None);
/// ```
pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    if let Some(rest) = rest.strip_prefix('_') {
        return (!rest.is_empty()).then_some(rest);
    }
    rest.starts_with(|c: char| c.is_uppercase()).then_some(rest)
}

/// Whether `name` starts with one of the accessor verbs.
pub fn has_verb_prefix(name: &str) -> bool {
    VERBS.iter().any(|verb| strip_prefix(name, verb).is_some())
}

/// Splits a size suffix off `name`.
///
/// Returns the remaining stem and the suffix as a lower-case word. The stem
/// is empty when the whole name is the suffix.
///
/// ```
/// use vc_accessor::builder::naming::split_size_suffix;
///
/// assert_eq!(split_size_suffix("TagsCount"), Some(("Tags", "count")));
/// assert_eq!(split_size_suffix("tags_len"), Some(("tags", "len")));
/// assert_eq!(split_size_suffix("Size"), Some(("", "size")));
/// assert_eq!(split_size_suffix("Ratio"), None);
/// assert_eq!(split_size_suffix("resize"), None);
/// ```
pub fn split_size_suffix(name: &str) -> Option<(&str, &'static str)> {
    for (camel, snake, word) in SIZE_SUFFIXES {
        if name == camel || name == word {
            return Some(("", word));
        }
        if let Some(stem) = name.strip_suffix(snake).filter(|stem| !stem.is_empty()) {
            return Some((stem, word));
        }
        let camel_stem = name
            .strip_suffix(camel)
            .filter(|stem| stem.ends_with(|c: char| c.is_lowercase() || c.is_ascii_digit()));
        if let Some(stem) = camel_stem {
            return Some((stem, word));
        }
    }
    None
}

/// Lower-cases the first letter, leaving names that start with two
/// capitals (`URL`) unchanged.
///
/// ```
/// use vc_accessor::builder::naming::decapitalize;
///
/// assert_eq!(decapitalize("Tags"), "tags");
/// assert_eq!(decapitalize("URL"), "URL");
/// assert_eq!(decapitalize("tags"), "tags");
/// ```
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return String::from(name);
    }
    let mut result = String::with_capacity(name.len());
    result.extend(first.to_lowercase());
    result.push_str(&name[first.len_utf8()..]);
    result
}

/// The property named by a prefix-stripped method name.
///
/// `None` when nothing is left of the name.
pub fn property_name(stem: &str) -> Option<PropertyName> {
    PropertyName::new(&decapitalize(stem.trim_matches('_')))
}
