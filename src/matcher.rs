//! Content-model matcher
//!
//! Pure functions that check the set of child names actually present under a
//! composite node against its declared [`ContentModel`], producing the
//! canonical validated order. Findings go to the caller-supplied error sink;
//! nothing is ever raised for document-content problems, so the host walk can
//! continue with sibling nodes and surface every problem in one pass.

use indexmap::IndexSet;
use tracing::debug;

use crate::content::{Choice, ChoiceOption, ContentItem, ContentModel};
use crate::error::ErrorRecord;

/// Sink field name for names that matched no declared slot.
pub const EXTRA_FIELD: &str = "_extra";

/// Sink field name for choice-group mismatches.
pub const CHOICE_FIELD: &str = "_choice";

/// Validate `present_names` against the declared content model and return
/// the matched names in canonical declared order.
///
/// For each item in declaration order: a present element is appended to the
/// result; a required-but-absent element yields a "missing required key"
/// record; a choice delegates to [`match_choice`] on the candidate subset.
/// Names no declared slot consumed are reported once, as a single combined
/// record; names a choice could only place through its degenerate fallback
/// count as unconsumed, even though they stay in the returned order. The
/// ordered result is returned regardless of errors.
pub fn match_sequence(
    model: &ContentModel,
    present_names: &IndexSet<String>,
    path: &str,
    errors: &mut Vec<ErrorRecord>,
) -> Vec<String> {
    let mut result = Vec::new();
    let mut consumed: Vec<String> = Vec::new();
    for item in model.items() {
        match item {
            ContentItem::Element(element) => {
                if present_names.contains(element.name()) {
                    result.push(element.name().to_string());
                    consumed.push(element.name().to_string());
                } else if element.is_required() {
                    errors.push(ErrorRecord::new(
                        path,
                        element.name(),
                        format!("missing required key: {} at {}", element.name(), path),
                    ));
                }
            }
            ContentItem::Choice(choice) => {
                let candidates: IndexSet<String> = present_names
                    .iter()
                    .filter(|name| choice.all_names().contains(*name))
                    .cloned()
                    .collect();
                match choice_outcome(choice, &candidates, path, errors) {
                    ChoiceMatch::Selected(names) => {
                        consumed.extend(names.iter().cloned());
                        result.extend(names);
                    }
                    ChoiceMatch::Fallback(names) => result.extend(names),
                }
            }
        }
    }

    let extra: Vec<&str> = present_names
        .iter()
        .filter(|name| !consumed.iter().any(|matched| matched == *name))
        .map(String::as_str)
        .collect();
    if !extra.is_empty() {
        errors.push(ErrorRecord::new(
            path,
            EXTRA_FIELD,
            format!("could not match key(s): {}", extra.join(", ")),
        ));
    }

    result
}

/// Match `candidates` (already intersected with the choice's names) against
/// the choice's alternatives.
///
/// An option minimally matches when the candidates cover all of its required
/// names, and maximally matches when the candidates introduce nothing outside
/// its names. Among options satisfying both, the first-declared one wins;
/// declaration order is the only tie-break. When neither condition holds for
/// any option, the mismatch is reported for each failed condition (the checks
/// are independent, so both may report) and the fallback returns the
/// flat-map hits of the candidates in an unspecified order. Within
/// [`match_sequence`] fallback names additionally count as unmatched.
pub fn match_choice(
    choice: &Choice,
    candidates: &IndexSet<String>,
    path: &str,
    errors: &mut Vec<ErrorRecord>,
) -> Vec<String> {
    match choice_outcome(choice, candidates, path, errors) {
        ChoiceMatch::Selected(names) | ChoiceMatch::Fallback(names) => names,
    }
}

/// Whether a choice placed its candidates through a selected option or
/// through the degenerate fallback. Fallback names are not consumed.
enum ChoiceMatch {
    Selected(Vec<String>),
    Fallback(Vec<String>),
}

fn choice_outcome(
    choice: &Choice,
    candidates: &IndexSet<String>,
    path: &str,
    errors: &mut Vec<ErrorRecord>,
) -> ChoiceMatch {
    if candidates.is_empty() && !choice.is_required() {
        return ChoiceMatch::Selected(Vec::new());
    }

    let no_match_msg = || {
        let names: Vec<&str> = candidates.iter().map(String::as_str).collect();
        format!(
            "could not match keys: {} with choices: {}",
            names.join(", "),
            choice.describe()
        )
    };

    let option_count = choice.options().len();
    let min_ok: Vec<bool> = (0..option_count)
        .map(|i| choice.required_names(i).iter().all(|n| candidates.contains(n)))
        .collect();
    let max_ok: Vec<bool> = (0..option_count)
        .map(|i| {
            candidates.iter().all(|n| {
                choice.required_names(i).contains(n) || choice.optional_names(i).contains(n)
            })
        })
        .collect();

    if !min_ok.iter().any(|ok| *ok) {
        errors.push(ErrorRecord::new(path, CHOICE_FIELD, no_match_msg()));
    }
    if !max_ok.iter().any(|ok| *ok) {
        errors.push(ErrorRecord::new(path, CHOICE_FIELD, no_match_msg()));
    }

    let matched = (0..option_count).find(|&i| min_ok[i] && max_ok[i]);
    if let Some(index) = matched {
        debug!(option = index, "matched choice option");
        return ChoiceMatch::Selected(match &choice.options()[index] {
            ChoiceOption::Single(element) => vec![element.name().to_string()],
            ChoiceOption::Sequence(elements) => elements
                .iter()
                .filter(|e| candidates.contains(e.name()))
                .map(|e| e.name().to_string())
                .collect(),
        });
    }

    // Degenerate fallback: no option satisfies both conditions. The order of
    // this result is unspecified.
    ChoiceMatch::Fallback(
        candidates
            .iter()
            .filter(|name| choice.flat_map().contains_key(*name))
            .cloned()
            .collect(),
    )
}
