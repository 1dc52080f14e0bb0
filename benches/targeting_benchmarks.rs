use criterion::{Criterion, criterion_group, criterion_main};
use openflag::EvaluationContext;
use openflag::openflag_targeting::{Criterion as Rule, FlagDefinition, Variant};
use std::hint::black_box;

fn tiered_flag(variants: usize) -> FlagDefinition {
    let mut flag = FlagDefinition::new("fallback");
    for i in 0..variants {
        flag = flag.with_variant(
            Variant::new(format!("tier-{}", i), i as u64)
                .with_criterion(Rule::new("plan", "pro"))
                .with_criterion(Rule::new("tier", i as u64)),
        );
    }
    flag.with_variant(Variant::new("fallback", 0))
}

fn bench_targeting(c: &mut Criterion) {
    let mut group = c.benchmark_group("targeting");

    let flag = tiered_flag(32);
    let first = EvaluationContext::new()
        .with_attribute("plan", "pro")
        .with_attribute("tier", 0);
    let last = EvaluationContext::new()
        .with_attribute("plan", "pro")
        .with_attribute("tier", 31);
    let miss = EvaluationContext::new().with_attribute("plan", "free");

    group.bench_function("first_variant_match", |b| {
        b.iter(|| flag.evaluate(black_box(&first)))
    });

    group.bench_function("last_variant_match", |b| {
        b.iter(|| flag.evaluate(black_box(&last)))
    });

    group.bench_function("default_fallback", |b| {
        b.iter(|| flag.evaluate(black_box(&miss)))
    });

    group.finish();
}

fn bench_targeting_key_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("targeting_key_gate");

    let mut flag = FlagDefinition::new("everyone");
    for i in 0..64 {
        flag = flag.with_variant(
            Variant::new(format!("user-{}", i), true).with_targeting_key(format!("user-{}", i)),
        );
    }
    let flag = flag.with_variant(Variant::new("everyone", false));
    let context = EvaluationContext::new().with_targeting_key("user-63");

    group.bench_function("pinned_user", |b| {
        b.iter(|| flag.evaluate(black_box(&context)))
    });

    group.finish();
}

criterion_group!(benches, bench_targeting, bench_targeting_key_gate);
criterion_main!(benches);
