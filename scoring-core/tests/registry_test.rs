mod mocks;

use std::sync::{Arc, Barrier};
use std::thread;

use mocks::{LabelEvaluator, label_of};
use scoring_core::{DeployedModel, FieldMap, ModelRegistry, Value};

fn label(model: &DeployedModel) -> Value {
    label_of(&model.evaluator().evaluate(&FieldMap::new()).unwrap())
}

#[test]
fn test_concurrent_readers_see_whole_models() {
    let registry = ModelRegistry::new();
    registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator("a"))));
    let barrier = Barrier::new(5);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                barrier.wait();
                for _ in 0..1_000 {
                    let model = registry.get("m").unwrap();
                    let seen = label(&model);
                    assert!(seen == Value::from("a") || seen == Value::from("b"));
                }
            });
        }
        scope.spawn(|| {
            barrier.wait();
            for round in 0..200 {
                let next = if round % 2 == 0 { "b" } else { "a" };
                registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator(next))));
            }
        });
    });

    assert_eq!(registry.len(), 1);
}

#[test]
fn test_last_deploy_wins() {
    let registry = ModelRegistry::new();
    registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator("a"))));
    registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator("b"))));

    assert_eq!(label(&registry.get("m").unwrap()), Value::from("b"));
}

#[test]
fn test_concurrent_deploys_of_distinct_ids() {
    let registry = ModelRegistry::new();
    let ids: Vec<String> = (0..16).map(|i| format!("model-{i:02}")).collect();

    thread::scope(|scope| {
        for id in &ids {
            let registry = registry.clone();
            scope.spawn(move || {
                registry.deploy(DeployedModel::new(id.as_str(), Box::new(LabelEvaluator("x"))));
            });
        }
    });

    assert_eq!(registry.list_ids(), ids);
}

#[test]
fn test_racing_removes_succeed_once() {
    let registry = ModelRegistry::new();
    registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator("a"))));
    let barrier = Barrier::new(8);

    let removed: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.remove("m").is_some() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(removed, 1);
    assert!(registry.get("m").is_none());
}

#[test]
fn test_in_flight_evaluation_outlives_removal() {
    let registry = ModelRegistry::new();
    registry.deploy(DeployedModel::new("m", Box::new(LabelEvaluator("a"))));
    let held: Arc<DeployedModel> = registry.get("m").unwrap();
    let removed = Barrier::new(2);

    thread::scope(|scope| {
        scope.spawn(|| {
            removed.wait();
            assert_eq!(label(&held), Value::from("a"));
        });
        assert!(registry.remove("m").is_some());
        removed.wait();
    });

    assert!(registry.get("m").is_none());
    assert_eq!(held.id(), "m");
}
