use thiserror::Error;

/// Invalid arguments passed when constructing a [`Rule`](super::Rule).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule must apply to at least one action")]
    NoActions,

    #[error("rule must apply to at least one subject")]
    NoSubjects,

    #[error("attribute names must not be blank")]
    BlankAttribute,

    #[error("duplicate attribute '{name}'")]
    DuplicateAttribute { name: String },
}
