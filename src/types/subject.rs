use std::fmt;

/// An action a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Wildcard: every action.
    Any,
    Named(String),
}

impl Action {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Action::Named(name.to_owned())
    }

    /// Whether a rule declared for `self` covers a request for `requested`.
    #[must_use]
    pub fn covers(&self, requested: &Action) -> bool {
        matches!(self, Action::Any) || self == requested
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Action::named(name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Any => write!(f, "*"),
            Action::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A subject type, optionally placed in a single-table hierarchy.
///
/// `base` names the root type of the hierarchy. A type with no base is its
/// own root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubjectType {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    base: Option<String>,
}

impl SubjectType {
    #[must_use]
    pub fn root(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            base: None,
        }
    }

    #[must_use]
    pub fn subtype(name: &str, base: &str) -> Self {
        Self {
            name: name.to_owned(),
            base: Some(base.to_owned()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    #[must_use]
    pub fn is_hierarchy_root(&self) -> bool {
        self.base.is_none()
    }

    /// Whether instances of `other` can also be instances of `self`, or the
    /// other way round.
    fn related_to(&self, other: &SubjectType) -> bool {
        self.name == other.name
            || other.base.as_deref() == Some(self.name.as_str())
            || self.base.as_deref() == Some(other.name.as_str())
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Some(base) => write!(f, "{} < {base}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The subject a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Subject {
    /// Wildcard: every subject type.
    All,
    Type(SubjectType),
}

impl Subject {
    #[must_use]
    pub fn root(name: &str) -> Self {
        Subject::Type(SubjectType::root(name))
    }

    #[must_use]
    pub fn subtype(name: &str, base: &str) -> Self {
        Subject::Type(SubjectType::subtype(name, base))
    }

    /// `false` only for a strict subtype. The wildcard counts as a root.
    #[must_use]
    pub fn is_hierarchy_root(&self) -> bool {
        match self {
            Subject::All => true,
            Subject::Type(ty) => ty.is_hierarchy_root(),
        }
    }

    /// Whether a rule declared for `self` is relevant to a request about
    /// `requested`.
    ///
    /// Rules on a base type apply to its subtypes, and rules on a subtype
    /// are relevant to requests about the base type.
    #[must_use]
    pub fn covers(&self, requested: &Subject) -> bool {
        match (self, requested) {
            (Subject::All, _) => true,
            (Subject::Type(_), Subject::All) => false,
            (Subject::Type(declared), Subject::Type(requested)) => declared.related_to(requested),
        }
    }
}

impl From<SubjectType> for Subject {
    fn from(ty: SubjectType) -> Self {
        Subject::Type(ty)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::All => write!(f, "all"),
            Subject::Type(ty) => write!(f, "{ty}"),
        }
    }
}
