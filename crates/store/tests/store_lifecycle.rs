//! Black-box tests of the store through its public API only.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use stockroom_catalog::{ProductDraft, ProductPatch};
use stockroom_core::{DomainError, Entity, ProductId};
use stockroom_observability::{LogConfig, LogFormat};
use stockroom_store::{
    EffectError, MemorySink, MutationEffect, Operation, ProductStore, Severity, StoreConfig,
};

/// Lets mutations through only when the test releases a permit. Loads pass
/// straight through.
struct Gate(Arc<Semaphore>);

#[async_trait]
impl MutationEffect for Gate {
    async fn run(&self, operation: Operation) -> Result<(), EffectError> {
        if operation == Operation::Load {
            return Ok(());
        }
        let permit = self.0.acquire().await.map_err(|e| EffectError::Failed {
            operation,
            reason: e.to_string(),
        })?;
        permit.forget();
        Ok(())
    }
}

fn draft(name: &str, category: &str, price: &str, quantity: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        price: price.to_string(),
        quantity: quantity.to_string(),
        description: format!("{name} for the test pantry"),
    }
}

fn init_logging() {
    stockroom_observability::init_with(&LogConfig {
        filter: "stockroom_store=debug".to_string(),
        format: LogFormat::Pretty,
    });
}

#[tokio::test]
async fn form_to_store_round_trip() {
    init_logging();
    let sink = Arc::new(MemorySink::new());
    let store = ProductStore::builder()
        .config(StoreConfig::immediate())
        .sink(sink.clone())
        .build();
    store.initialize().await.unwrap();

    // Invalid input never reaches the store.
    let bad = draft("", "Dairy", "0", "3");
    let err = bad.parse().unwrap_err();
    let DomainError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "price"]);
    assert_eq!(store.snapshot().len(), 5);

    let created = store
        .create(draft("Butter", "Dairy", "3.25", "12").parse().unwrap())
        .await
        .unwrap();
    assert_eq!(created.category().as_str(), "Dairy");

    // Edit form: pre-fill, change one field, save as a full patch.
    let mut edit = ProductDraft::from_product(&created);
    edit.quantity = "60".to_string();
    let saved = store
        .update(created.id().clone(), edit.into_patch().unwrap())
        .await
        .unwrap();
    assert_eq!(saved.quantity(), 60);
    assert_eq!(saved.name(), "Butter");
    assert_eq!(saved.id(), created.id());

    store.delete(created.id().clone()).await.unwrap();
    assert!(store.get(created.id()).is_none());

    let outcomes: Vec<_> = sink
        .received()
        .into_iter()
        .map(|n| (n.title, n.severity))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("products.productAdded", Severity::Success),
            ("products.productUpdated", Severity::Success),
            ("products.productDeleted", Severity::Success),
        ]
    );
}

#[tokio::test]
async fn readers_see_previous_snapshot_while_mutation_is_in_flight() {
    init_logging();
    let gate = Arc::new(Semaphore::new(0));
    let store = ProductStore::builder()
        .effect(Arc::new(Gate(gate.clone())))
        .sink(Arc::new(MemorySink::new()))
        .build();
    store.initialize().await.unwrap();
    assert!(!store.is_busy());
    let before = store.snapshot();

    let pending = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .update(ProductId::from("1"), ProductPatch::new().quantity(5))
                .await
        }
    });

    let mut busy = store.subscribe_busy();
    busy.wait_for(|b| *b).await.unwrap();
    assert!(store.is_busy());
    assert_eq!(*store.snapshot(), *before);

    gate.add_permits(1);
    let updated = pending.await.unwrap().unwrap();

    assert_eq!(updated.quantity(), 5);
    assert!(!store.is_busy());
    assert_eq!(store.snapshot().version(), before.version() + 1);
}

#[tokio::test]
async fn dropped_caller_does_not_cancel_started_operation() {
    let gate = Arc::new(Semaphore::new(0));
    let store = ProductStore::builder()
        .effect(Arc::new(Gate(gate.clone())))
        .sink(Arc::new(MemorySink::new()))
        .build();
    store.initialize().await.unwrap();

    let caller = tokio::spawn({
        let store = store.clone();
        async move { store.delete(ProductId::from("5")).await }
    });
    let mut busy = store.subscribe_busy();
    busy.wait_for(|b| *b).await.unwrap();

    caller.abort();
    gate.add_permits(1);
    busy.wait_for(|b| !*b).await.unwrap();

    assert!(store.get(&ProductId::from("5")).is_none());
    assert_eq!(store.snapshot().len(), 4);
}

#[tokio::test]
async fn queued_mutations_apply_in_order_without_lost_updates() {
    let gate = Arc::new(Semaphore::new(0));
    let store = ProductStore::builder()
        .effect(Arc::new(Gate(gate.clone())))
        .sink(Arc::new(MemorySink::new()))
        .build();
    store.initialize().await.unwrap();

    let mut busy = store.subscribe_busy();
    let first = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .create(draft("Apples", "Fruits", "1.20", "80").parse().unwrap())
                .await
        }
    });
    // The first create now holds the write lock and waits on the gate.
    busy.wait_for(|b| *b).await.unwrap();

    let second = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .create(draft("Pears", "Fruits", "1.40", "30").parse().unwrap())
                .await
        }
    });

    gate.add_permits(2);
    let apples = first.await.unwrap().unwrap();
    let pears = second.await.unwrap().unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 7);
    assert_eq!(snapshot.version(), 3);
    let tail: Vec<_> = snapshot.products()[5..].to_vec();
    assert_eq!(tail, vec![apples, pears]);
    assert!(!store.is_busy());
}
