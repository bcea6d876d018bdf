mod compress;
mod types;

pub use types::{
    Action, AssociationTree, Behavior, CompressionReport, ConditionMap, ConditionValue,
    Conditions, ConditionsMatcher, FlatMap, MatcherHandle, NestedMap, Rule, RuleBuilder,
    RuleError, RuleList, Subject, SubjectType, Value,
};
