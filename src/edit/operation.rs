//! Change directives and their token grammar.
//!
//! | Token | Action |
//! |-------|--------|
//! | `NAME` | delete (keep, under invert) |
//! | `NAME=text` | replace with the bytes of `text` |
//! | `NAME=:path` | replace with the contents of `path` |
//! | `NAME=@` | touch: keep the current bytes |
//! | `+NAME=text`, `+NAME=:path` | add a new lump |
//!
//! `NAME` may also be a group token such as `_standard_` or a regular
//! expression between slashes (`/D_.*/`) matched against the whole name.

use std::path::PathBuf;

use regex::{Regex, RegexBuilder};

use crate::format::directory::validate_name;
use crate::{Error, Result};

use super::group::{self, Rule};

/// What a directive applies to.
#[derive(Debug, Clone)]
pub enum Target {
    /// One name, compared according to the case option.
    Literal(String),
    /// A built-in group.
    Group {
        /// The group token as written.
        token: String,
        /// The rules of the group.
        rules: &'static [Rule],
    },
    /// A pattern matched against the whole name.
    Regex {
        /// The pattern as written, without slashes.
        pattern: String,
    },
}

impl Target {
    /// Parses a target. Literal names are taken as written.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownGroup`] for a `_word_` token that names no group
    /// - [`Error::InvalidRegex`] for a `/pattern/` that does not compile
    pub fn parse(text: &str) -> Result<Self> {
        if let Some(pattern) = text
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            compile(pattern, false)?;
            return Ok(Target::Regex {
                pattern: pattern.to_string(),
            });
        }
        if group::is_group_token(text) {
            return Ok(Target::Group {
                token: text.to_string(),
                rules: group::expand(text)?,
            });
        }
        Ok(Target::Literal(text.to_string()))
    }

    /// Returns the literal name, if this is a literal target.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Target::Literal(name) => Some(name),
            _ => None,
        }
    }

    /// Builds the matcher for this target.
    pub(crate) fn matcher(&self, case_sensitive: bool) -> Result<Matcher<'_>> {
        Ok(match self {
            Target::Literal(name) => Matcher::Literal {
                name: name.as_str(),
                case_sensitive,
            },
            Target::Group { rules, .. } => Matcher::Rules(*rules),
            Target::Regex { pattern } => Matcher::Regex(compile(pattern, !case_sensitive)?),
        })
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Literal(name) => write!(f, "{}", name),
            Target::Group { token, .. } => write!(f, "{}", token),
            Target::Regex { pattern } => write!(f, "/{}/", pattern),
        }
    }
}

/// Compiled form of a [`Target`].
#[derive(Debug)]
pub(crate) enum Matcher<'a> {
    Literal { name: &'a str, case_sensitive: bool },
    Rules(&'static [Rule]),
    Regex(Regex),
}

impl Matcher<'_> {
    pub(crate) fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Literal {
                name: expected,
                case_sensitive: true,
            } => name == *expected,
            Matcher::Literal { name: expected, .. } => name.eq_ignore_ascii_case(expected),
            Matcher::Rules(rules) => rules.iter().any(|rule| rule.matches(name)),
            Matcher::Regex(regex) => regex.is_match(name),
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(&format!("^(?:{})$", pattern))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| Error::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

/// What a directive does to the regions it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the payload with literal bytes.
    Replace(Vec<u8>),
    /// Replace the payload with the contents of a file, read at parse time.
    ReplaceFile {
        /// The file the data came from.
        path: PathBuf,
        /// Its contents.
        data: Vec<u8>,
    },
    /// Keep the payload as is.
    Touch,
    /// Remove the region, or keep it when editing inverted.
    Delete,
    /// Append a new lump; never matches existing regions.
    Add(Vec<u8>),
}

impl Action {
    /// Returns the action name as a string.
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::Replace(_) | Action::ReplaceFile { .. } => "replace",
            Action::Touch => "touch",
            Action::Delete => "delete",
            Action::Add(_) => "add",
        }
    }
}

/// A parsed change: a target and what to do with it.
#[derive(Debug, Clone)]
pub struct Directive {
    /// The token the directive was parsed from.
    pub token: String,
    /// What the directive applies to.
    pub target: Target,
    /// What the directive does.
    pub action: Action,
}

impl Directive {
    /// Parses one change token.
    ///
    /// Names and values are trimmed. File values are read immediately.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidChange`] for an empty name, an add without a value,
    ///   a touching add, or an add with a group or pattern target
    /// - [`Error::UnknownGroup`] and [`Error::InvalidRegex`] from [`Target::parse`]
    /// - [`Error::MissingSourceFile`] if a `:path` value cannot be read
    /// - [`Error::InvalidLumpName`] if an added name does not fit a directory entry
    pub fn parse(token: &str) -> Result<Self> {
        let (is_add, body) = match token.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (name, value) = split_token(body);
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_change(token, "missing lump name"));
        }

        let target = Target::parse(name)?;
        let action = match value.map(str::trim) {
            None if is_add => return Err(Error::invalid_change(token, "an added lump needs a value")),
            None => Action::Delete,
            Some("@") if is_add => {
                return Err(Error::invalid_change(token, "an added lump has no current value"));
            }
            Some("@") => Action::Touch,
            Some(value) => {
                let (path, data) = match value.strip_prefix(':') {
                    Some(path) => read_source(token, path)?,
                    None => (None, value.as_bytes().to_vec()),
                };
                match (is_add, path) {
                    (true, _) => Action::Add(data),
                    (false, Some(path)) => Action::ReplaceFile { path, data },
                    (false, None) => Action::Replace(data),
                }
            }
        };

        if is_add {
            let name = target
                .literal()
                .ok_or_else(|| Error::invalid_change(token, "an added lump needs a literal name"))?;
            validate_name(name)?;
        }

        Ok(Self {
            token: token.to_string(),
            target,
            action,
        })
    }

    /// Returns `true` for add directives.
    pub fn is_add(&self) -> bool {
        matches!(self.action, Action::Add(_))
    }

    /// Returns `true` for bare (delete) directives.
    pub fn is_bare(&self) -> bool {
        self.action == Action::Delete
    }
}

/// Splits a token body into its target and optional value.
///
/// A pattern target ends at the first `/` followed by `=` or the end of
/// the token, so `=` may appear inside the pattern.
fn split_token(body: &str) -> (&str, Option<&str>) {
    if body.starts_with('/') {
        if let Some(end) = body[1..].find("/=") {
            let split = end + 2;
            return (&body[..split], Some(&body[split + 1..]));
        }
        if body.len() > 1 && body.ends_with('/') {
            return (body, None);
        }
    }
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

fn read_source(token: &str, path: &str) -> Result<(Option<PathBuf>, Vec<u8>)> {
    if path.is_empty() {
        return Err(Error::invalid_change(token, "missing file name after ':'"));
    }
    let path = PathBuf::from(path);
    let data = std::fs::read(&path).map_err(|source| Error::MissingSourceFile {
        token: token.to_string(),
        path: path.clone(),
        source,
    })?;
    Ok((Some(path), data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_actions() {
        let d = Directive::parse("THINGS").unwrap();
        assert_eq!(d.action, Action::Delete);
        assert!(d.is_bare());
        assert_eq!(d.target.literal(), Some("THINGS"));

        let d = Directive::parse(" demo1 = hello ").unwrap();
        assert_eq!(d.target.literal(), Some("demo1"));
        assert_eq!(d.action, Action::Replace(b"hello".to_vec()));

        let d = Directive::parse("ENDOOM=@").unwrap();
        assert_eq!(d.action, Action::Touch);

        let d = Directive::parse("+NEWLUMP=foo").unwrap();
        assert!(d.is_add());
        assert_eq!(d.action, Action::Add(b"foo".to_vec()));
        assert_eq!(d.action.action_type(), "add");
    }

    #[test]
    fn test_parse_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x01\x02\x03").unwrap();
        let path = file.path().display().to_string();

        let d = Directive::parse(&format!("MAP01=:{}", path)).unwrap();
        assert!(matches!(d.action, Action::ReplaceFile { ref data, .. } if data == b"\x01\x02\x03"));

        let d = Directive::parse(&format!("+DEHACKED=:{}", path)).unwrap();
        assert_eq!(d.action, Action::Add(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_source_file() {
        let err = Directive::parse("MAP01=:/nonexistent/map01.lmp").unwrap_err();
        assert!(matches!(err, Error::MissingSourceFile { .. }));
    }

    #[test]
    fn test_parse_targets() {
        let d = Directive::parse("_standard_").unwrap();
        assert!(matches!(d.target, Target::Group { rules, .. } if rules.len() == 11));

        let d = Directive::parse("/D_.*/=@").unwrap();
        assert!(matches!(d.target, Target::Regex { ref pattern } if pattern == "D_.*"));
        assert_eq!(d.action, Action::Touch);

        let d = Directive::parse("/A=B/").unwrap();
        assert!(matches!(d.target, Target::Regex { ref pattern } if pattern == "A=B"));
        assert_eq!(d.action, Action::Delete);

        assert!(matches!(Directive::parse("_bogus_"), Err(Error::UnknownGroup { .. })));
        assert!(matches!(Directive::parse("/(/"), Err(Error::InvalidRegex { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_adds() {
        for token in ["+NEWLUMP", "+NEWLUMP=@", "+_base_=x", "+/A/=x", "=x", "+=x"] {
            let err = Directive::parse(token).unwrap_err();
            assert!(matches!(err, Error::InvalidChange { .. }), "{token}: {err}");
        }
        let err = Directive::parse("+TOOLONGNAME=x").unwrap_err();
        assert!(matches!(err, Error::InvalidLumpName { .. }));
    }

    #[test]
    fn test_matchers() {
        let literal = Target::parse("things").unwrap();
        assert!(literal.matcher(false).unwrap().matches("THINGS"));
        assert!(!literal.matcher(true).unwrap().matches("THINGS"));

        let regex = Target::parse("/d_e1m./").unwrap();
        assert!(regex.matcher(false).unwrap().matches("D_E1M1"));
        assert!(!regex.matcher(true).unwrap().matches("D_E1M1"));
        assert!(!regex.matcher(false).unwrap().matches("XD_E1M1"));

        let group = Target::parse("_ns_").unwrap();
        assert!(group.matcher(true).unwrap().matches("s_start"));
    }
}
