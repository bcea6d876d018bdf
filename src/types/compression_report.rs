use std::fmt;
use std::time::Duration;

use super::rule_list::RuleList;

/// Detailed result returned by
/// [`RuleList::compress_detailed()`](super::rule_list::RuleList::compress_detailed).
///
/// Holds the compressed list together with how many rules each pass removed
/// and the wall-clock duration of the run.
#[derive(Debug, Clone)]
#[must_use]
pub struct CompressionReport {
    rules: RuleList,
    duplicates_removed: usize,
    truncated: usize,
    catch_all_index: Option<usize>,
    catch_all_hoisted: bool,
    duration: Duration,
}

impl CompressionReport {
    pub(crate) fn new(
        rules: RuleList,
        duplicates_removed: usize,
        truncated: usize,
        catch_all_index: Option<usize>,
        catch_all_hoisted: bool,
        duration: Duration,
    ) -> Self {
        Self {
            rules,
            duplicates_removed,
            truncated,
            catch_all_index,
            catch_all_hoisted,
            duration,
        }
    }

    /// The compressed list, same as [`RuleList::compress()`](super::rule_list::RuleList::compress).
    #[must_use]
    pub fn rules(&self) -> &RuleList {
        &self.rules
    }

    pub fn into_rules(self) -> RuleList {
        self.rules
    }

    /// Rules removed because a later rule had identical conditions.
    #[must_use]
    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    /// Rules removed around the last catch-all rule.
    #[must_use]
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Position of the last catch-all rule after duplicate removal, if any.
    #[must_use]
    pub fn catch_all_index(&self) -> Option<usize> {
        self.catch_all_index
    }

    /// Whether the catch-all rule was kept. `false` when there was none or
    /// when it was a deny.
    #[must_use]
    pub fn catch_all_hoisted(&self) -> bool {
        self.catch_all_hoisted
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rules: {}", self.rules.len())?;
        write!(f, ", duplicates removed: {}", self.duplicates_removed)?;
        write!(f, ", truncated: {}", self.truncated)?;
        match self.catch_all_index {
            Some(idx) if self.catch_all_hoisted => write!(f, ", catch-all: kept (at {idx})")?,
            Some(idx) => write!(f, ", catch-all: dropped (at {idx})")?,
            None => write!(f, ", catch-all: none")?,
        }
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
