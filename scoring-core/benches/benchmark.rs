use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use scoring_core::dispatcher::aggregate_requests;
use scoring_core::{EvaluationRequest, ModelService};

const IRIS: &str = r#"{
    "kind": "rules",
    "target": "Species",
    "rules": [
        {"field": "Petal.Length", "operator": "lessThan", "value": 2.45, "score": "setosa"},
        {"field": "Petal.Width", "operator": "lessOrEqual", "value": 1.75, "score": "versicolor"}
    ],
    "default": "virginica"
}"#;

fn baskets(rows: usize, transactions: usize) -> Vec<EvaluationRequest> {
    (0..rows)
        .map(|row| {
            EvaluationRequest::new(Some(row.to_string()))
                .with_argument("transaction", (row % transactions) as i64)
                .with_argument("item", format!("item-{}", row % 17))
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let grouped = baskets(1_000, 50);
    let distinct = baskets(1_000, 1_000);

    c.bench_function("aggregate 1000 rows into 50 groups", |b| {
        b.iter(|| aggregate_requests("transaction", black_box(&grouped)).len())
    });
    c.bench_function("aggregate 1000 distinct rows", |b| {
        b.iter(|| aggregate_requests("transaction", black_box(&distinct)).len())
    });
}

fn bench_table(c: &mut Criterion) {
    let service = ModelService::default();
    if let Err(e) = service.deploy("iris", IRIS) {
        panic!("failed to deploy benchmark model: {e}");
    }

    let mut table = String::from("Id,Petal.Length,Petal.Width\n");
    for row in 0..1_000 {
        table.push_str(&format!("{},{}.{},{}.{}\n", row, row % 7, row % 10, row % 3, row % 10));
    }

    c.bench_function("evaluate 1000-row table", |b| {
        b.iter(|| service.evaluate_table("iris", black_box(&table), Some("Id")))
    });
}

criterion_group!(benches, bench_aggregation, bench_table);
criterion_main!(benches);
