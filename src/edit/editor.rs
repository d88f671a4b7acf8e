//! Change engine applying directives to a region sequence.

use std::collections::{HashMap, HashSet};

use crate::read::{Region, Wad};
use crate::{Error, Result};

use super::operation::{Action, Directive, Target};

/// Options controlling how directives match regions.
///
/// # Example
///
/// ```rust
/// use wadlump::edit::EditOptions;
///
/// let options = EditOptions::new().once(true).invert(true);
/// assert!(options.once);
/// assert!(!options.case_sensitive);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Compare names exactly instead of ASCII case-insensitively.
    pub case_sensitive: bool,
    /// Only the first live match of each target is affected.
    pub once: bool,
    /// Bare tokens name the lumps to keep; every other lump and gap is deleted.
    pub invert: bool,
}

impl EditOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets case-sensitive matching.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Limits each target to its first match.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Turns bare tokens into a keep-list.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Result of applying changes.
#[must_use = "edit result should be checked to verify the changes matched as expected"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResult {
    /// Number of regions before editing.
    pub regions_read: usize,
    /// Number of lumps before editing.
    pub lumps_read: usize,
    /// Number of regions left unchanged.
    pub regions_kept: usize,
    /// Number of regions whose payload was replaced.
    pub regions_replaced: usize,
    /// Number of regions touched without a change.
    pub regions_touched: usize,
    /// Number of regions deleted.
    pub regions_deleted: usize,
    /// Number of lumps added.
    pub lumps_added: usize,
}

impl EditResult {
    /// Returns the number of regions after editing.
    pub fn total_regions(&self) -> usize {
        self.regions_kept + self.regions_replaced + self.regions_touched + self.lumps_added
    }

    /// Returns `true` if any region was replaced, deleted or added.
    pub fn has_changes(&self) -> bool {
        self.regions_replaced + self.regions_deleted + self.lumps_added > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Kept,
    Touched,
    Replaced,
    Deleted,
}

/// An editor for changing the regions of a [`Wad`].
///
/// Changes are queued and only applied when [`apply`](Self::apply) is
/// called, in the order they were queued. Header and directory regions
/// are never matched; `notindir` names gap regions.
///
/// # Example
///
/// ```rust,ignore
/// use wadlump::Wad;
/// use wadlump::edit::{EditOptions, EditableWad};
///
/// let mut wad = Wad::open_path("doom2.wad")?;
/// let mut editor = wad.edit().with_options(EditOptions::new().once(true));
/// editor.change("_built_")?;
/// editor.change("+DEHACKED=:patch.deh")?;
/// let result = editor.apply()?;
/// println!("Deleted {}, added {}", result.regions_deleted, result.lumps_added);
/// ```
pub struct Editor<'a, R> {
    wad: &'a mut Wad<R>,
    directives: Vec<Directive>,
    options: EditOptions,
}

impl<'a, R> Editor<'a, R> {
    /// Creates a new editor for the given archive.
    pub fn new(wad: &'a mut Wad<R>) -> Self {
        Self {
            wad,
            directives: Vec::new(),
            options: EditOptions::default(),
        }
    }

    /// Sets the matching options.
    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the matching options.
    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Returns the number of pending directives.
    pub fn pending_directives(&self) -> usize {
        self.directives.len()
    }

    /// Returns the pending directives.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Parses and queues a change token.
    ///
    /// # Errors
    ///
    /// See [`Directive::parse`].
    pub fn change(&mut self, token: &str) -> Result<()> {
        self.directives.push(Directive::parse(token)?);
        Ok(())
    }

    /// Parses and queues several change tokens.
    pub fn changes<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.change(token.as_ref())?;
        }
        Ok(())
    }

    /// Queues deletion of `target` (a name, group token or `/pattern/`).
    pub fn delete(&mut self, target: &str) -> Result<()> {
        self.queue(target, Action::Delete)
    }

    /// Queues replacement of the payload of `target`.
    pub fn replace(&mut self, target: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        self.queue(target, Action::Replace(data.into()))
    }

    /// Queues a touch of `target`.
    pub fn touch(&mut self, target: &str) -> Result<()> {
        self.queue(target, Action::Touch)
    }

    /// Queues a new lump. It is appended after all other changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLumpName`] if the name does not fit a
    /// directory entry.
    pub fn add(&mut self, name: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        crate::format::directory::validate_name(name)?;
        self.directives.push(Directive {
            token: format!("+{}", name),
            target: Target::Literal(name.to_string()),
            action: Action::Add(data.into()),
        });
        Ok(())
    }

    fn queue(&mut self, target: &str, action: Action) -> Result<()> {
        let token = match &action {
            Action::Delete => target.to_string(),
            Action::Touch => format!("{}=@", target),
            _ => format!("{}=...", target),
        };
        self.directives.push(Directive {
            token,
            target: Target::parse(target)?,
            action,
        });
        Ok(())
    }

    /// Applies all queued directives to the regions.
    ///
    /// Nothing is changed if an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTarget`] if two non-add directives name the
    /// same literal target.
    pub fn apply(self) -> Result<EditResult> {
        let Self {
            wad,
            directives,
            options,
        } = self;
        check_duplicates(&directives, options.case_sensitive)?;

        let regions = &mut wad.regions;
        let mut result = EditResult {
            regions_read: regions.len(),
            lumps_read: regions.iter().filter(|r| r.is_lump()).count(),
            ..Default::default()
        };

        // Match everything first so a failure leaves the regions untouched.
        let mut status = vec![Status::Kept; regions.len()];
        let mut payloads: HashMap<usize, &[u8]> = HashMap::new();
        let mut keep: HashSet<usize> = HashSet::new();
        let mut any_bare = false;

        for directive in directives.iter().filter(|d| !d.is_add()) {
            let inverted_bare = options.invert && directive.is_bare();
            any_bare |= inverted_bare;

            let names = expand(regions, &status, &directive.target, options.case_sensitive)?;
            if names.is_empty() {
                log::warn!("Change '{}' matched no regions", directive.token);
                continue;
            }
            for name in &names {
                let matches = (0..regions.len()).filter(|&i| {
                    status[i] != Status::Deleted
                        && is_matchable(&regions[i])
                        && same_name(regions[i].label(), name, options.case_sensitive)
                });
                let limit = if options.once { 1 } else { usize::MAX };
                for i in matches.take(limit).collect::<Vec<_>>() {
                    if inverted_bare {
                        keep.insert(i);
                        continue;
                    }
                    match &directive.action {
                        Action::Delete => status[i] = Status::Deleted,
                        Action::Replace(data) | Action::ReplaceFile { data, .. } => {
                            status[i] = Status::Replaced;
                            payloads.insert(i, data);
                        }
                        Action::Touch => {
                            if status[i] == Status::Kept {
                                status[i] = Status::Touched;
                            }
                        }
                        Action::Add(_) => {}
                    }
                }
            }
        }

        if options.invert {
            if any_bare {
                for (i, region) in regions.iter().enumerate() {
                    if is_matchable(region) && !keep.contains(&i) {
                        status[i] = Status::Deleted;
                    }
                }
            } else {
                log::warn!("Inverted editing without bare names to keep; nothing is deleted");
            }
        }

        for (i, data) in payloads {
            if status[i] == Status::Replaced {
                regions[i].set_payload(data.to_vec());
            }
        }
        for s in &status {
            match s {
                Status::Kept => result.regions_kept += 1,
                Status::Touched => result.regions_touched += 1,
                Status::Replaced => result.regions_replaced += 1,
                Status::Deleted => result.regions_deleted += 1,
            }
        }
        let mut status = status.into_iter();
        regions.retain(|_| status.next() != Some(Status::Deleted));

        let mut next_index = result.regions_read;
        for directive in directives.into_iter().filter(Directive::is_add) {
            if let (Target::Literal(name), Action::Add(data)) = (directive.target, directive.action) {
                let mut region = Region::lump(name, data);
                region.offset = wad.source_len;
                region.index = next_index;
                next_index += 1;
                regions.push(region);
                result.lumps_added += 1;
            }
        }

        log::debug!(
            "Applied changes: {} kept, {} replaced, {} touched, {} deleted, {} added",
            result.regions_kept,
            result.regions_replaced,
            result.regions_touched,
            result.regions_deleted,
            result.lumps_added
        );
        Ok(result)
    }
}

/// Lumps and gaps can be matched; header and directory regions cannot.
fn is_matchable(region: &Region) -> bool {
    region.is_lump() || region.kind == crate::read::RegionKind::Gap
}

fn same_name(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

fn fold(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_ascii_uppercase()
    }
}

/// Expands a target into the distinct live names it matches, in first-occurrence order.
fn expand(
    regions: &[Region],
    status: &[Status],
    target: &Target,
    case_sensitive: bool,
) -> Result<Vec<String>> {
    let matcher = target.matcher(case_sensitive)?;
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (region, status) in regions.iter().zip(status) {
        if *status == Status::Deleted || !is_matchable(region) {
            continue;
        }
        let label = region.label();
        if matcher.matches(label) && seen.insert(fold(label, case_sensitive)) {
            names.push(label.to_string());
        }
    }
    Ok(names)
}

fn check_duplicates(directives: &[Directive], case_sensitive: bool) -> Result<()> {
    let mut seen = HashSet::new();
    for directive in directives.iter().filter(|d| !d.is_add()) {
        if let Some(name) = directive.target.literal() {
            if !seen.insert(fold(name, case_sensitive)) {
                return Err(Error::DuplicateTarget {
                    target: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Extension trait for editing a [`Wad`].
pub trait EditableWad<R> {
    /// Creates an editor for this archive.
    fn edit(&mut self) -> Editor<'_, R>;
}

impl<R> EditableWad<R> for Wad<R> {
    fn edit(&mut self) -> Editor<'_, R> {
        Editor::new(self)
    }
}
