//! Namespace marker resolution.
//!
//! Lumps between `<TAG>_START` and `<TAG>_END` markers belong to namespace
//! `TAG`; namespaces nest. [`resolve`] walks the regions once with a stack
//! of open tags and stores the path of open tags on every lump and gap.
//!
//! ```text
//! F_START      []
//! F1_START     [F]
//! FLOOR0_1     [F, F1]
//! F1_END       [F]
//! F_END        []
//! ```

use crate::read::{Region, RegionKind};
use crate::{Error, Result};

const START_SUFFIX: &str = "_START";
const END_SUFFIX: &str = "_END";

/// A namespace marker lump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// `<TAG>_START`
    Start(&'a str),
    /// `<TAG>_END`
    End(&'a str),
}

impl<'a> Marker<'a> {
    /// Classifies a lump name. Suffixes are matched case-insensitively and
    /// the tag must not be empty.
    pub fn parse(name: &'a str) -> Option<Self> {
        if let Some(tag) = strip_suffix_ignore_case(name, START_SUFFIX) {
            return Some(Marker::Start(tag));
        }
        strip_suffix_ignore_case(name, END_SUFFIX).map(Marker::End)
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if split == 0 || !name.is_char_boundary(split) {
        return None;
    }
    let (tag, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(tag)
}

struct Open {
    tag: String,
    index: usize,
    name: String,
}

/// Annotates regions with their namespace path.
///
/// A start marker gets the path outside its namespace; an end marker gets
/// the path after its namespace is closed. Header and directory regions are
/// never inside a namespace.
///
/// # Errors
///
/// Returns [`Error::UnterminatedNamespace`] if an end marker does not close
/// the innermost open tag, or a start marker is never closed. Regions are
/// left partially annotated in that case.
pub fn resolve(regions: &mut [Region]) -> Result<()> {
    let mut stack: Vec<Open> = Vec::new();

    for region in regions.iter_mut() {
        match region.kind {
            RegionKind::Header | RegionKind::Directory => {
                region.namespace.clear();
                continue;
            }
            RegionKind::Gap => {
                region.namespace = path(&stack);
                continue;
            }
            RegionKind::Lump => {}
        }

        match Marker::parse(&region.name) {
            Some(Marker::Start(tag)) => {
                region.namespace = path(&stack);
                stack.push(Open {
                    tag: tag.to_string(),
                    index: region.index,
                    name: region.name.clone(),
                });
            }
            Some(Marker::End(tag)) => {
                match stack.pop() {
                    Some(open) if open.tag.eq_ignore_ascii_case(tag) => {}
                    _ => {
                        return Err(Error::UnterminatedNamespace {
                            tag: tag.to_string(),
                            index: region.index,
                            name: region.name.clone(),
                        });
                    }
                }
                region.namespace = path(&stack);
            }
            None => region.namespace = path(&stack),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(Error::UnterminatedNamespace {
            tag: open.tag,
            index: open.index,
            name: open.name,
        });
    }

    log::debug!("Resolved namespaces for {} regions", regions.len());
    Ok(())
}

fn path(stack: &[Open]) -> Vec<String> {
    stack.iter().map(|open| open.tag.clone()).collect()
}
