use std::collections::HashSet;

use super::associations::AssociationTree;
use super::behavior::Behavior;
use super::conditions::Conditions;
use super::error::RuleError;
use super::subject::{Action, Subject};

/// One authorization statement: for these actions on these subjects, under
/// these conditions, access is allowed or denied.
///
/// Rules are immutable once built. Create them with [`Rule::allow()`] /
/// [`Rule::deny()`] or [`Rule::new()`].
///
/// # Example
///
/// ```
/// use lastmatch::{ConditionMap, Rule, Subject};
///
/// let rule = Rule::deny("read", Subject::root("Doc"))
///     .when(ConditionMap::new().with("status", "locked"))
///     .build()
///     .unwrap();
/// assert!(!rule.is_catch_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRule"))]
pub struct Rule {
    behavior: Behavior,
    actions: Vec<Action>,
    subjects: Vec<Subject>,
    conditions: Conditions,
    attributes: Vec<String>,
}

impl Rule {
    /// Build a rule from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] when no action or no subject is given, or when
    /// an attribute name is blank or repeated.
    pub fn new<S: Into<String>>(
        behavior: Behavior,
        actions: impl IntoIterator<Item = Action>,
        subjects: impl IntoIterator<Item = Subject>,
        conditions: impl Into<Conditions>,
        attributes: impl IntoIterator<Item = S>,
    ) -> Result<Self, RuleError> {
        let actions: Vec<Action> = actions.into_iter().collect();
        if actions.is_empty() {
            return Err(RuleError::NoActions);
        }
        let subjects: Vec<Subject> = subjects.into_iter().collect();
        if subjects.is_empty() {
            return Err(RuleError::NoSubjects);
        }
        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        check_attributes(&attributes)?;

        Ok(Self {
            behavior,
            actions,
            subjects,
            conditions: conditions.into(),
            attributes,
        })
    }

    pub fn allow(action: impl Into<Action>, subject: impl Into<Subject>) -> RuleBuilder {
        RuleBuilder::new(Behavior::Allow, action.into(), subject.into())
    }

    pub fn deny(action: impl Into<Action>, subject: impl Into<Subject>) -> RuleBuilder {
        RuleBuilder::new(Behavior::Deny, action.into(), subject.into())
    }

    #[must_use]
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// The behavior compared during compression. Equal to
    /// [`behavior()`](Self::behavior) for every rule this crate builds.
    #[must_use]
    pub fn base_behavior(&self) -> Behavior {
        self.behavior
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    #[must_use]
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Attributes this rule is restricted to. Empty means the whole object.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Associations named by nested conditions, for joining before the
    /// conditions can be checked in a query.
    pub fn associations_hash(&self) -> AssociationTree {
        self.conditions.associations()
    }

    /// A rule matches every instance of everything it names: no conditions,
    /// and no declared subject is a strict subtype.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.conditions.is_none() && self.subjects.iter().all(Subject::is_hierarchy_root)
    }

    /// A catch-all deny. Compression drops such a rule instead of moving it
    /// forward, leaving the default deny in its place.
    #[must_use]
    pub fn cannot_catch_all(&self) -> bool {
        self.base_behavior().is_deny() && self.is_catch_all()
    }

    #[must_use]
    pub fn matches_action(&self, action: &Action) -> bool {
        self.actions.iter().any(|declared| declared.covers(action))
    }

    #[must_use]
    pub fn matches_subject(&self, subject: &Subject) -> bool {
        self.subjects.iter().any(|declared| declared.covers(subject))
    }

    /// Whether this rule takes part in deciding `action` on `subject`.
    #[must_use]
    pub fn is_relevant(&self, action: &Action, subject: &Subject) -> bool {
        self.matches_action(action) && self.matches_subject(subject)
    }

    /// Unrestricted rules match every attribute. Asked about the object as a
    /// whole, a restricted rule only counts when it allows: allowing one
    /// field grants some access to the object, denying one field does not
    /// deny the object.
    #[must_use]
    pub fn matches_attribute(&self, attribute: Option<&str>) -> bool {
        if self.attributes.is_empty() {
            return true;
        }
        match attribute {
            None => self.behavior.is_allow(),
            Some(name) => self.attributes.iter().any(|a| a == name),
        }
    }
}

fn check_attributes(attributes: &[String]) -> Result<(), RuleError> {
    let mut seen = HashSet::new();
    for name in attributes {
        if name.trim().is_empty() {
            return Err(RuleError::BlankAttribute);
        }
        if !seen.insert(name.as_str()) {
            return Err(RuleError::DuplicateAttribute { name: name.clone() });
        }
    }
    Ok(())
}

/// Builder returned by [`Rule::allow()`] and [`Rule::deny()`].
#[derive(Debug, Clone)]
#[must_use]
pub struct RuleBuilder {
    behavior: Behavior,
    actions: Vec<Action>,
    subjects: Vec<Subject>,
    conditions: Conditions,
    attributes: Vec<String>,
}

impl RuleBuilder {
    fn new(behavior: Behavior, action: Action, subject: Subject) -> Self {
        Self {
            behavior,
            actions: vec![action],
            subjects: vec![subject],
            conditions: Conditions::None,
            attributes: Vec::new(),
        }
    }

    /// Also apply to `action`.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Also apply to `subject`.
    pub fn subject(mut self, subject: impl Into<Subject>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    pub fn when(mut self, conditions: impl Into<Conditions>) -> Self {
        self.conditions = conditions.into();
        self
    }

    pub fn on_attributes<S: Into<String>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
        self.attributes.extend(attributes.into_iter().map(Into::into));
        self
    }

    /// # Errors
    ///
    /// See [`Rule::new()`].
    pub fn build(self) -> Result<Rule, RuleError> {
        Rule::new(
            self.behavior,
            self.actions,
            self.subjects,
            self.conditions,
            self.attributes,
        )
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRule {
    behavior: Behavior,
    actions: Vec<Action>,
    subjects: Vec<Subject>,
    #[serde(default)]
    conditions: Conditions,
    #[serde(default)]
    attributes: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRule> for Rule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        Rule::new(
            raw.behavior,
            raw.actions,
            raw.subjects,
            raw.conditions,
            raw.attributes,
        )
    }
}
