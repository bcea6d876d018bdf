use std::sync::Arc;
use std::thread;

use lastmatch::{Action, ConditionMap, Rule, RuleList, Subject};

fn main() {
    let doc = Subject::root("Doc");
    let rules: RuleList = (0..64_i64)
        .map(|i| {
            let builder = if i % 3 == 0 {
                Rule::deny(Action::Any, doc.clone())
            } else {
                Rule::allow("read", doc.clone())
            };
            builder
                .when(ConditionMap::new().with("team", i % 16))
                .build()
                .expect("failed to build rule")
        })
        .collect();
    let rules = Arc::new(rules);

    let handles: Vec<_> = ["read", "update", "destroy", "share"]
        .into_iter()
        .map(|action| {
            let rules = Arc::clone(&rules);
            let doc = doc.clone();
            thread::spawn(move || {
                let compressed = rules.relevant(&Action::named(action), &doc).compress();
                println!("{action}: {} -> {}", rules.len(), compressed.len());
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
