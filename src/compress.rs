use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, trace};

use crate::{CompressionReport, Conditions, Rule, RuleList};

pub(crate) fn compress(rules: &[Rule]) -> RuleList {
    let (compressed, _) = run(rules);
    compressed.into_iter().cloned().collect()
}

pub(crate) fn compress_detailed(rules: &[Rule]) -> CompressionReport {
    let start = Instant::now();
    let (compressed, stats) = run(rules);
    let output: RuleList = compressed.into_iter().cloned().collect();
    CompressionReport::new(
        output,
        stats.duplicates_removed,
        stats.truncated,
        stats.catch_all,
        stats.hoisted,
        start.elapsed(),
    )
}

struct Stats {
    duplicates_removed: usize,
    truncated: usize,
    catch_all: Option<usize>,
    hoisted: bool,
}

fn run(rules: &[Rule]) -> (Vec<&Rule>, Stats) {
    let simplified = simplify(rules);
    let duplicates_removed = rules.len() - simplified.len();
    let simplified_len = simplified.len();

    let truncation = truncate_catch_all(simplified);
    let stats = Stats {
        duplicates_removed,
        truncated: simplified_len - truncation.rules.len(),
        catch_all: truncation.catch_all,
        hoisted: truncation.hoisted,
    };

    debug!(
        input = rules.len(),
        output = truncation.rules.len(),
        duplicates_removed = stats.duplicates_removed,
        truncated = stats.truncated,
        "compressed rule list"
    );
    (truncation.rules, stats)
}

/// Drop every rule whose conditions also appear on a later rule.
///
/// For any condition `A`, `A OR (NOT A AND X)`, `A OR (A OR X)`,
/// `NOT A AND (A OR X)` and `NOT A AND (NOT A AND X)` all reduce by removing
/// the inner `A`. Under last-match-wins the later rule decides every input
/// matching `A`, so an earlier rule testing exactly `A` never changes the
/// outcome, whatever its behavior.
pub(crate) fn simplify(rules: &[Rule]) -> Vec<&Rule> {
    let mut seen: HashSet<&Conditions> = HashSet::with_capacity(rules.len());
    let mut kept: Vec<&Rule> = rules
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(index, rule)| {
            if seen.insert(rule.conditions()) {
                Some(rule)
            } else {
                trace!(index, behavior = %rule.behavior(), "dropping rule with repeated conditions");
                None
            }
        })
        .collect();
    kept.reverse();
    kept
}

struct Truncation<'a> {
    rules: Vec<&'a Rule>,
    catch_all: Option<usize>,
    hoisted: bool,
}

/// Collapse the rules around the last catch-all rule.
///
/// The run of same-behavior rules starting at the catch-all is redundant: the
/// catch-all already yields that behavior for everything they match. An
/// allowing catch-all takes the place of the run. A denying catch-all is
/// dropped together with the run and with every rule before it, which it
/// shadowed, so the default deny decides in its place.
fn truncate_catch_all(rules: Vec<&Rule>) -> Truncation<'_> {
    let Some(index) = rules.iter().rposition(|rule| rule.is_catch_all()) else {
        return Truncation {
            rules,
            catch_all: None,
            hoisted: false,
        };
    };

    let catch_all = rules[index];
    let behavior = catch_all.base_behavior();
    let rest = rules[index..]
        .iter()
        .position(|rule| rule.base_behavior() != behavior)
        .map_or(rules.len(), |offset| index + offset);
    let hoisted = !catch_all.cannot_catch_all();

    let mut out = Vec::with_capacity(rules.len());
    if hoisted {
        out.extend_from_slice(&rules[..index]);
        out.push(catch_all);
    } else {
        trace!(index, "dropping catch-all deny and the rules it shadows");
    }
    out.extend_from_slice(&rules[rest..]);

    Truncation {
        rules: out,
        catch_all: Some(index),
        hoisted,
    }
}
