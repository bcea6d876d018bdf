mod associations;
mod behavior;
mod compression_report;
mod conditions;
mod error;
mod rule;
mod rule_list;
mod subject;
mod value;

pub use associations::AssociationTree;
pub use behavior::Behavior;
pub use compression_report::CompressionReport;
pub use conditions::{
    ConditionMap, ConditionValue, Conditions, ConditionsMatcher, FlatMap, MatcherHandle, NestedMap,
};
pub use error::RuleError;
pub use rule::{Rule, RuleBuilder};
pub use rule_list::RuleList;
pub use subject::{Action, Subject, SubjectType};
pub use value::Value;
