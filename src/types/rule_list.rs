use std::fmt;
use std::ops::Index;

use super::behavior::Behavior;
use super::compression_report::CompressionReport;
use super::conditions::ConditionsMatcher;
use super::rule::Rule;
use super::subject::{Action, Subject};

/// Rules in priority order: the later a rule appears, the higher its
/// priority. The last rule that matches a request decides it, and a request
/// no rule matches is denied.
///
/// # Example
///
/// ```
/// use lastmatch::{Behavior, ConditionMap, Rule, RuleList, Subject};
///
/// let rules: RuleList = [
///     Rule::allow("read", Subject::root("Doc")).build().unwrap(),
///     Rule::deny("read", Subject::root("Doc"))
///         .when(ConditionMap::new().with("status", "locked"))
///         .build()
///         .unwrap(),
/// ]
/// .into_iter()
/// .collect();
///
/// // A locked document matches both rules; the deny comes last.
/// assert_eq!(rules.decide(|_| true), Behavior::Deny);
/// assert_eq!(rules.decide(|rule| rule.conditions().is_none()), Behavior::Allow);
/// assert_eq!(rules.compress(), rules);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleList {
    rules: Vec<Rule>,
}

impl RuleList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with a higher priority than every rule already present.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Rule> {
        self.rules
    }

    /// The highest-priority rule satisfying `matches`.
    pub fn last_match(&self, mut matches: impl FnMut(&Rule) -> bool) -> Option<&Rule> {
        self.rules.iter().rev().find(|rule| matches(*rule))
    }

    /// Behavior of [`last_match()`](Self::last_match), or `Deny` when no
    /// rule matches.
    pub fn decide(&self, matches: impl FnMut(&Rule) -> bool) -> Behavior {
        self.last_match(matches)
            .map_or(Behavior::Deny, Rule::behavior)
    }

    /// Decide `action` on a concrete `instance` of `subject`, delegating
    /// condition checks to `matcher`.
    pub fn decide_for<T, M>(
        &self,
        action: &Action,
        subject: &Subject,
        instance: &T,
        matcher: &M,
    ) -> Behavior
    where
        T: ?Sized,
        M: ConditionsMatcher<T> + ?Sized,
    {
        self.decide(|rule| {
            rule.is_relevant(action, subject) && matcher.matches(rule.conditions(), instance)
        })
    }

    /// Rules that take part in deciding `action` on `subject`, in the same order.
    #[must_use]
    pub fn relevant(&self, action: &Action, subject: &Subject) -> RuleList {
        self.rules
            .iter()
            .filter(|rule| rule.is_relevant(action, subject))
            .cloned()
            .collect()
    }

    /// A shorter list that decides every request the same way.
    ///
    /// Removes rules whose conditions reappear on a later rule, then
    /// collapses the rules around the last catch-all rule. Both rewrites
    /// assume the rules were already narrowed to one action and subject,
    /// e.g. with [`relevant()`](Self::relevant).
    #[must_use]
    pub fn compress(&self) -> RuleList {
        crate::compress::compress(&self.rules)
    }

    /// Compress and report what each pass removed.
    pub fn compress_detailed(&self) -> CompressionReport {
        crate::compress::compress_detailed(&self.rules)
    }
}

impl FromIterator<Rule> for RuleList {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Rule>> for RuleList {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl IntoIterator for RuleList {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Index<usize> for RuleList {
    type Output = Rule;

    fn index(&self, index: usize) -> &Rule {
        &self.rules[index]
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catch_all = self.rules.iter().filter(|r| r.is_catch_all()).count();
        write!(
            f,
            "RuleList({} rules, {} catch-all)",
            self.rules.len(),
            catch_all,
        )
    }
}
