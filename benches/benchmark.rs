// Benchmarks for graph construction, pair scoring and top-k recommendation
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use diettree::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

const ATTRIBUTES: [&str; 5] = ["Calories", "Protein (g)", "Carbs (g)", "Sugars (g)", "Total Fat (g)"];
const KINDS: [&str; 3] = ["Food", "Drink", "Dessert"];

fn generate_records(count: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let mut pairs = vec![
                ("Item".to_string(), format!("item-{i:06}")),
                ("Category".to_string(), KINDS[i % KINDS.len()].to_string()),
            ];
            pairs.push(("Calories".to_string(), rng.random_range(0..1200).to_string()));
            for attribute in &ATTRIBUTES[1..] {
                pairs.push((attribute.to_string(), rng.random_range(0..80).to_string()));
            }
            Record::from_pairs(pairs)
        })
        .collect()
}

fn weighted_policy() -> ScorePolicy {
    let weighting = Weighting::uniform(ATTRIBUTES)
        .with("Calories", 3.0)
        .with("Protein (g)", 2.0);
    ScorePolicy::CategoryWeighted(weighting)
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let config = BuildConfig::default();

    for size in [1_000, 10_000].iter() {
        let records = generate_records(*size);
        group.bench_with_input(BenchmarkId::new("catalog", size), size, |b, _| {
            b.iter(|| Catalog::build(black_box(records.clone()), &config).unwrap());
        });
    }
    group.finish();
}

fn benchmark_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let catalog = Catalog::build(generate_records(1_000), &BuildConfig::default()).unwrap();
    let scorer = Scorer::new(catalog.graph());

    for (name, policy) in [
        ("unweighted", ScorePolicy::Unweighted),
        ("strict", ScorePolicy::Strict),
        ("category_weighted", weighted_policy()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| scorer.score(black_box("item-000001"), black_box("item-000002"), &policy).unwrap());
        });
    }
    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let policy = weighted_policy();

    for size in [1_000, 10_000, 50_000].iter() {
        let catalog = Catalog::build(generate_records(*size), &BuildConfig::default()).unwrap();
        let recommender = Recommender::new(catalog.graph());
        group.bench_with_input(BenchmarkId::new("top10", size), size, |b, _| {
            b.iter(|| recommender.rank(black_box("item-000000"), 10, &policy).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_score, benchmark_recommend);
criterion_main!(benches);
