use std::fmt;

/// The effect a rule has when it is the last match for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Behavior {
    Allow,
    Deny,
}

impl Behavior {
    #[must_use]
    pub fn is_allow(self) -> bool {
        self == Behavior::Allow
    }

    #[must_use]
    pub fn is_deny(self) -> bool {
        self == Behavior::Deny
    }
}

impl From<bool> for Behavior {
    fn from(allowed: bool) -> Self {
        if allowed {
            Behavior::Allow
        } else {
            Behavior::Deny
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Allow => write!(f, "allow"),
            Behavior::Deny => write!(f, "deny"),
        }
    }
}
