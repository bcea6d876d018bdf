use lastmatch::{Action, ConditionMap, Rule, RuleList, Subject};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = Subject::root("Doc");
    let read = Action::named("read");

    // Rules as an ability definition would declare them: later rules win.
    let rules: RuleList = [
        Rule::allow("read", doc.clone())
            .when(ConditionMap::new().with("status", "published"))
            .build(),
        Rule::deny("read", doc.clone())
            .when(ConditionMap::new().with("status", "locked"))
            .build(),
        Rule::deny("read", doc.clone())
            .when(ConditionMap::new().with("author", ConditionMap::new().with("banned", true)))
            .build(),
        Rule::allow("read", doc.clone()).build(),
        Rule::allow("read", doc.clone())
            .when(ConditionMap::new().with("owner", true))
            .build(),
        Rule::deny("read", doc.clone())
            .when(ConditionMap::new().with("status", "locked"))
            .build(),
    ]
    .into_iter()
    .collect::<Result<_, _>>()
    .expect("failed to build rules");

    println!("{rules}");

    let report = rules.relevant(&read, &doc).compress_detailed();
    println!("{report}");
    for rule in report.rules() {
        println!(
            "  {} {:?} joins: [{}]",
            rule.behavior(),
            rule.conditions(),
            rule.associations_hash().paths().join(", ")
        );
    }
}
