use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lastmatch::{ConditionMap, Rule, RuleList, Subject};

/// Build `n` rules on `Doc`, alternating allow and deny, where roughly a
/// third repeat an earlier condition and a catch-all sits in the middle.
fn build_rules(n: usize) -> RuleList {
    let doc = Subject::root("Doc");
    (0..n)
        .map(|i| {
            let builder = if i % 2 == 0 {
                Rule::allow("read", doc.clone())
            } else {
                Rule::deny("read", doc.clone())
            };
            let builder = if i == n / 2 {
                builder
            } else {
                let key = i64::try_from(i % (n * 2 / 3).max(1)).unwrap_or_default();
                builder.when(ConditionMap::new().with("id", key))
            };
            builder.build().unwrap()
        })
        .collect()
}

/// Build `n` rules with unique conditions and no catch-all.
fn build_unique_rules(n: usize) -> RuleList {
    (0..n)
        .map(|i| {
            let id = i64::try_from(i).unwrap_or_default();
            Rule::allow("read", Subject::root("Doc"))
                .when(ConditionMap::new().with("id", id))
                .build()
                .unwrap()
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for &n in &[10, 100, 1000] {
        let rules = build_rules(n);
        group.bench_function(&format!("{n}_rules_mixed"), |b| {
            b.iter(|| black_box(&rules).compress());
        });

        let unique = build_unique_rules(n);
        group.bench_function(&format!("{n}_rules_unique"), |b| {
            b.iter(|| black_box(&unique).compress());
        });
    }

    group.finish();
}

fn bench_compress_detailed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_detailed");

    for &n in &[10, 100, 1000] {
        let rules = build_rules(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| black_box(&rules).compress_detailed());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_compress_detailed);
criterion_main!(benches);
