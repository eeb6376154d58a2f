//! Name search and disambiguation
//!
//! Searching is a case-insensitive substring filter that keeps dataset order.
//! Resolving narrows the matches to a single record: nothing to pick, an
//! automatic pick, or an explicit choice by the operator.

use crate::catalog::{Module, Weapon};
use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search term cannot be empty")]
    EmptySearchTerm,
}

/// Records that can be looked up by display name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Weapon {
    fn name(&self) -> &str {
        &self.weapon_name
    }
}

impl Named for Module {
    fn name(&self) -> &str {
        &self.module_name
    }
}

/// Filter records whose field (chosen by `field`) contains `term`, ignoring case
///
/// Blank terms are rejected instead of matching everything. The term is used
/// as typed otherwise, inner whitespace included.
pub fn search_by<'a, T, F>(
    records: &'a [T],
    term: &str,
    field: F,
) -> Result<Vec<&'a T>, SearchError>
where
    F: Fn(&T) -> &str,
{
    if term.trim().is_empty() {
        return Err(SearchError::EmptySearchTerm);
    }

    let needle = term.to_lowercase();
    Ok(records
        .iter()
        .filter(|record| field(*record).to_lowercase().contains(&needle))
        .collect())
}

/// Search records by their display name
pub fn search<'a, T: Named>(records: &'a [T], term: &str) -> Result<Vec<&'a T>, SearchError> {
    search_by(records, term, |record| record.name())
}

/// Outcome of narrowing search matches to one record
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, T> {
    /// Nothing matched
    NoResults,
    Selected(&'a T),
    /// The operator cancelled the choice
    Aborted,
}

/// Narrow matches to a single record
///
/// With several matches, `choose` receives the candidate names in match order
/// and returns the index of the pick, or `None` to cancel. It is never called
/// for zero or one match. An out-of-range index counts as a cancellation.
pub fn resolve<'a, T, C>(matches: Vec<&'a T>, choose: C) -> Resolution<'a, T>
where
    T: Named,
    C: FnOnce(&[&str]) -> Option<usize>,
{
    match try_resolve(matches, |names| Ok::<_, Infallible>(choose(names))) {
        Ok(resolution) => resolution,
        Err(never) => match never {},
    }
}

/// Like [`resolve`], for choosers that can fail (e.g. reading a prompt)
pub fn try_resolve<'a, T, C, E>(matches: Vec<&'a T>, choose: C) -> Result<Resolution<'a, T>, E>
where
    T: Named,
    C: FnOnce(&[&str]) -> Result<Option<usize>, E>,
{
    let resolution = match matches.as_slice() {
        [] => Resolution::NoResults,
        [only] => Resolution::Selected(*only),
        many => {
            let names: Vec<&str> = many.iter().map(|record| record.name()).collect();
            match choose(&names)?.and_then(|index| many.get(index)) {
                Some(record) => Resolution::Selected(*record),
                None => Resolution::Aborted,
            }
        }
    };

    Ok(resolution)
}
