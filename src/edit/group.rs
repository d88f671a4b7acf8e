//! Built-in lump groups.
//!
//! A group token (`_word_`) stands for a fixed, ordered list of rules:
//!
//! | Token | Rules |
//! |-------|-------|
//! | `_name_` | level names: `ExMy` or `MAPxx` |
//! | `_base_` | `_name_`, THINGS, LINEDEFS, SIDEDEFS, VERTEXES, SECTORS |
//! | `_built_` | SEGS, SSECTORS, NODES, REJECT, BLOCKMAP |
//! | `_standard_` | `_base_` and `_built_` |
//! | `_ns_` | namespace markers (`*_START`, `*_END`) |
//!
//! Rules always compare case-insensitively.

use crate::namespace::Marker;
use crate::{Error, Result};

/// One name-matching rule of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// An exact lump name.
    Name(&'static str),
    /// A level marker: `E` digit `M` digit, or `MAP` and two digits.
    LevelName,
    /// A namespace start or end marker.
    Marker,
}

impl Rule {
    /// Returns `true` if `name` satisfies the rule.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Rule::Name(expected) => name.eq_ignore_ascii_case(expected),
            Rule::LevelName => is_level_name(name),
            Rule::Marker => Marker::parse(name).is_some(),
        }
    }
}

fn is_level_name(name: &str) -> bool {
    let b = name.as_bytes();
    match b.len() {
        4 => {
            b[0].eq_ignore_ascii_case(&b'E')
                && b[1].is_ascii_digit()
                && b[2].eq_ignore_ascii_case(&b'M')
                && b[3].is_ascii_digit()
        }
        5 => b[..3].eq_ignore_ascii_case(b"MAP") && b[3].is_ascii_digit() && b[4].is_ascii_digit(),
        _ => false,
    }
}

const NAME: &[Rule] = &[Rule::LevelName];

const BASE: &[Rule] = &[
    Rule::LevelName,
    Rule::Name("THINGS"),
    Rule::Name("LINEDEFS"),
    Rule::Name("SIDEDEFS"),
    Rule::Name("VERTEXES"),
    Rule::Name("SECTORS"),
];

const BUILT: &[Rule] = &[
    Rule::Name("SEGS"),
    Rule::Name("SSECTORS"),
    Rule::Name("NODES"),
    Rule::Name("REJECT"),
    Rule::Name("BLOCKMAP"),
];

const STANDARD: &[Rule] = &[
    Rule::LevelName,
    Rule::Name("THINGS"),
    Rule::Name("LINEDEFS"),
    Rule::Name("SIDEDEFS"),
    Rule::Name("VERTEXES"),
    Rule::Name("SECTORS"),
    Rule::Name("SEGS"),
    Rule::Name("SSECTORS"),
    Rule::Name("NODES"),
    Rule::Name("REJECT"),
    Rule::Name("BLOCKMAP"),
];

const NAMESPACE: &[Rule] = &[Rule::Marker];

/// Group tokens, in the order they are documented.
pub const GROUP_TOKENS: [&str; 5] = ["_name_", "_base_", "_built_", "_standard_", "_ns_"];

/// Returns `true` if `token` has the shape of a group token (`_word_`).
///
/// The shape alone decides; unknown words are rejected by [`expand`].
pub fn is_group_token(token: &str) -> bool {
    token.len() > 2
        && token.starts_with('_')
        && token.ends_with('_')
        && token[1..token.len() - 1]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric())
}

/// Returns the rules of a group token.
///
/// # Errors
///
/// Returns [`Error::UnknownGroup`] for any token outside the five groups.
pub fn expand(token: &str) -> Result<&'static [Rule]> {
    match token.to_ascii_lowercase().as_str() {
        "_name_" => Ok(NAME),
        "_base_" => Ok(BASE),
        "_built_" => Ok(BUILT),
        "_standard_" => Ok(STANDARD),
        "_ns_" => Ok(NAMESPACE),
        _ => Err(Error::UnknownGroup {
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selects(token: &str, name: &str) -> bool {
        expand(token).unwrap().iter().any(|rule| rule.matches(name))
    }

    #[test]
    fn test_level_names() {
        for name in ["E1M1", "e4m9", "MAP01", "map32"] {
            assert!(is_level_name(name), "{name}");
        }
        for name in ["E1M10", "MAP1", "MAPXX", "EXM1", "THINGS"] {
            assert!(!is_level_name(name), "{name}");
        }
    }

    #[test]
    fn test_standard_has_eleven_lumps() {
        let rules = expand("_standard_").unwrap();
        assert_eq!(rules.len(), 11);

        let mut combined = expand("_base_").unwrap().to_vec();
        combined.extend_from_slice(expand("_built_").unwrap());
        assert_eq!(rules, combined.as_slice());
    }

    #[test]
    fn test_group_selection() {
        assert!(selects("_base_", "MAP07"));
        assert!(selects("_base_", "vertexes"));
        assert!(!selects("_base_", "NODES"));
        assert!(selects("_built_", "NODES"));
        assert!(selects("_ns_", "FF_START"));
        assert!(selects("_ns_", "p_end"));
        assert!(!selects("_ns_", "ENDOOM"));
        assert!(!selects("_standard_", "CREDIT"));
    }

    #[test]
    fn test_unknown_group() {
        assert!(is_group_token("_levels_"));
        let err = expand("_levels_").unwrap_err();
        assert!(matches!(err, Error::UnknownGroup { ref token } if token == "_levels_"));
    }

    #[test]
    fn test_group_token_shape() {
        for token in GROUP_TOKENS {
            assert!(is_group_token(token));
            assert!(expand(token).is_ok());
        }
        assert!(is_group_token("_BASE_"));
        assert!(!is_group_token("__"));
        assert!(!is_group_token("_START"));
        assert!(!is_group_token("S_START"));
        assert!(!is_group_token("_a b_"));
    }
}
