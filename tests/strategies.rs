#![allow(dead_code)]

use lastmatch::{
    Action, Behavior, ConditionMap, ConditionValue, Conditions, MatcherHandle, Rule, RuleList,
    Subject, Value,
};
use proptest::prelude::*;

// --- Fixed document schema ---
// status : string, one of {"draft", "published", "locked"}
// owner  : bool

const STATUSES: &[&str] = &["draft", "published", "locked"];

/// A concrete document the generated rules are decided against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub status: &'static str,
    pub owner: bool,
}

impl Doc {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "status" => Some(Value::from(self.status)),
            "owner" => Some(Value::Bool(self.owner)),
            _ => None,
        }
    }
}

/// Every document the schema allows.
pub fn all_docs() -> Vec<Doc> {
    STATUSES
        .iter()
        .flat_map(|&status| {
            [false, true]
                .into_iter()
                .map(move |owner| Doc { status, owner })
        })
        .collect()
}

/// Equality matcher over the fixed schema. Only used by tests that generate
/// flat conditions.
pub fn doc_matches(conditions: &Conditions, doc: &Doc) -> bool {
    match conditions {
        Conditions::None => true,
        Conditions::Flat(map) => map.iter().all(|(key, expected)| match expected {
            ConditionValue::Value(v) => doc.field(key).as_ref() == Some(v),
            ConditionValue::Map(_) => false,
        }),
        _ => false,
    }
}

pub fn read() -> Action {
    Action::named("read")
}

pub fn doc_subject() -> Subject {
    Subject::root("Doc")
}

fn arb_behavior() -> impl Strategy<Value = Behavior> {
    any::<bool>().prop_map(Behavior::from)
}

/// Conditions over the document schema: none, or one or two equality checks.
/// The pool is small so duplicates are common.
fn arb_flat_conditions() -> impl Strategy<Value = Conditions> {
    prop_oneof![
        1 => Just(Conditions::None),
        3 => prop::sample::select(STATUSES)
            .prop_map(|s| Conditions::from(ConditionMap::new().with("status", s))),
        2 => any::<bool>().prop_map(|o| Conditions::from(ConditionMap::new().with("owner", o))),
        2 => (prop::sample::select(STATUSES), any::<bool>()).prop_map(|(s, o)| {
            Conditions::from(ConditionMap::new().with("status", s).with("owner", o))
        }),
    ]
}

/// Any kind of conditions, including nested maps, raw fragments and opaque
/// matchers drawn from a shared pool of handles.
fn arb_any_conditions() -> impl Strategy<Value = Conditions> {
    let handles = vec![MatcherHandle::new("visible"), MatcherHandle::new("archived")];
    prop_oneof![
        4 => arb_flat_conditions(),
        1 => prop::sample::select(STATUSES).prop_map(|s| {
            Conditions::from(
                ConditionMap::new().with("author", ConditionMap::new().with("status", s)),
            )
        }),
        1 => any::<bool>().prop_map(|b| Conditions::raw("visible = ?", vec![Value::Bool(b)])),
        1 => prop::sample::select(handles).prop_map(Conditions::Opaque),
    ]
}

fn arb_subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        4 => Just(Subject::root("Doc")),
        1 => Just(Subject::subtype("Memo", "Doc")),
        1 => Just(Subject::All),
    ]
}

/// Rules for `read` on `Doc` with flat conditions: lists whose decisions can
/// be checked with [`doc_matches`].
pub fn arb_doc_rules() -> impl Strategy<Value = RuleList> {
    prop::collection::vec((arb_behavior(), arb_flat_conditions()), 0..=12).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(behavior, conditions)| {
                Rule::new(behavior, [read()], [doc_subject()], conditions, Vec::<String>::new())
                    .expect("generated rule should be valid")
            })
            .collect::<RuleList>()
    })
}

/// Rules mixing subjects, actions and every kind of condition.
pub fn arb_mixed_rules() -> impl Strategy<Value = RuleList> {
    prop::collection::vec(
        (
            arb_behavior(),
            prop::sample::select(vec![Action::named("read"), Action::named("update"), Action::Any]),
            arb_subject(),
            arb_any_conditions(),
        ),
        0..=12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .map(|(behavior, action, subject, conditions)| {
                Rule::new(behavior, [action], [subject], conditions, Vec::<String>::new())
                    .expect("generated rule should be valid")
            })
            .collect::<RuleList>()
    })
}
