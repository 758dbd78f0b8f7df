//! The product store: owner of the live collection.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::{Mutex, OnceCell, watch};
use tracing::{debug, error, info, warn};

use stockroom_catalog::{NewProduct, Product, ProductPatch, seed_products};
use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::effect::{MutationEffect, Operation, SimulatedLatency};
use crate::notify::{Notification, NotificationSink, TracingSink};
use crate::snapshot::Snapshot;

/// Authoritative in-memory product collection.
///
/// Cheap to clone; clones share the same collection.
///
/// - Readers call [`ProductStore::snapshot`] (or subscribe) and always see a
///   complete, immutable snapshot.
/// - Mutations are applied one at a time. A second call issued while one is in
///   flight waits its turn; it is not rejected. [`ProductStore::is_busy`] is
///   the signal callers use to avoid issuing one.
/// - Once started, an operation runs to completion even if the caller stops
///   awaiting it.
/// - A mutation issued before [`ProductStore::initialize`] first runs the
///   load itself, so edits always apply on top of the seed collection.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<Inner>,
}

struct Inner {
    snapshot: watch::Sender<Arc<Snapshot>>,
    busy: watch::Sender<bool>,
    /// Held across the effect so that mutations never interleave.
    write: Mutex<()>,
    loaded: OnceCell<()>,
    /// True until a load succeeds or fails.
    loading: AtomicBool,
    in_flight: AtomicUsize,
    effect: Arc<dyn MutationEffect>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
}

impl ProductStore {
    /// Store with simulated latency from `config`, the system clock and
    /// `tracing`-backed notifications.
    pub fn new(config: &StoreConfig) -> Self {
        Self::builder().config(config.clone()).build()
    }

    pub fn builder() -> ProductStoreBuilder {
        ProductStoreBuilder::default()
    }

    /// Load the seed collection. Runs at most once per store: later (or
    /// concurrent) calls wait for the same load and never duplicate records.
    pub async fn initialize(&self) -> DomainResult<()> {
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.initialize().await }).await
    }

    /// Append a new record with a fresh id and today's date.
    pub async fn create(&self, fields: NewProduct) -> DomainResult<Product> {
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.create(fields).await }).await
    }

    /// Merge `patch` onto record `id` and re-stamp its date.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.update(id, patch).await }).await
    }

    /// Remove record `id`, returning it.
    pub async fn delete(&self, id: ProductId) -> DomainResult<Product> {
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.delete(id).await }).await
    }

    /// The latest committed snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.current()
    }

    /// Receiver notified on every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// True while the initial load is pending or a mutation is in flight.
    pub fn is_busy(&self) -> bool {
        *self.inner.busy.borrow()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.loaded.initialized()
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.inner.current().get(id).cloned()
    }
}

impl core::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let snapshot = self.inner.current();
        f.debug_struct("ProductStore")
            .field("version", &snapshot.version())
            .field("len", &snapshot.len())
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Run `task` on its own tokio task so that dropping the caller's future does
/// not abort a started operation.
async fn detach<T, F>(task: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task)
        .await
        .map_err(|err| DomainError::operation_failed(format!("store task did not finish: {err}")))?
}

/// Marks one mutation as in flight for as long as it lives.
struct BusyGuard<'a> {
    inner: &'a Inner,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.refresh_busy();
    }
}

impl Inner {
    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.borrow())
    }

    fn begin(&self) -> BusyGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.refresh_busy();
        BusyGuard { inner: self }
    }

    fn refresh_busy(&self) {
        self.busy.send_if_modified(|busy| {
            let now = self.loading.load(Ordering::SeqCst)
                || self.in_flight.load(Ordering::SeqCst) > 0;
            let changed = *busy != now;
            *busy = now;
            changed
        });
    }

    fn commit(&self, next: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(next);
        self.snapshot.send_replace(Arc::clone(&next));
        next
    }

    async fn run_effect(&self, operation: Operation) -> DomainResult<()> {
        self.effect.run(operation).await.map_err(|err| {
            error!(%operation, %err, "effect failed; collection unchanged");
            DomainError::operation_failed(err.to_string())
        })
    }

    async fn initialize(&self) -> DomainResult<()> {
        if self.loaded.initialized() {
            debug!("store already initialized; skipping load");
            return Ok(());
        }
        self.ensure_loaded().await
    }

    /// Wait for (or run) the single load. Failed loads are retried by the
    /// next caller.
    async fn ensure_loaded(&self) -> DomainResult<()> {
        self.loaded.get_or_try_init(|| self.load()).await?;
        Ok(())
    }

    async fn load(&self) -> DomainResult<()> {
        self.loading.store(true, Ordering::SeqCst);
        self.refresh_busy();

        let result = self.load_seed().await;

        self.loading.store(false, Ordering::SeqCst);
        self.refresh_busy();
        if result.is_err() {
            self.sink.notify(Notification::failed_to_load());
        }
        result
    }

    #[tracing::instrument(skip_all)]
    async fn load_seed(&self) -> DomainResult<()> {
        let _write = self.write.lock().await;
        self.run_effect(Operation::Load).await?;

        // Mutations wait for the load, so nothing has been committed yet.
        let snapshot = self.commit(self.current().next(seed_products()?));
        info!(
            version = snapshot.version(),
            len = snapshot.len(),
            "seed collection loaded"
        );
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn create(&self, fields: NewProduct) -> DomainResult<Product> {
        self.ensure_loaded().await?;
        let _busy = self.begin();
        let _write = self.write.lock().await;

        if let Err(err) = self.run_effect(Operation::Create).await {
            self.sink
                .notify(Notification::failed_to_save(Some(fields.name().to_string())));
            return Err(err);
        }

        let current = self.current();
        let id = fresh_id(&current);
        let product = Product::new(id, fields, self.clock.today());
        let snapshot = self.commit(current.with_appended(product.clone()));

        info!(
            product_id = %product.id_typed(),
            version = snapshot.version(),
            "product created"
        );
        self.sink.notify(Notification::added(product.name()));
        Ok(product)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        patch.validate().into_result()?;
        self.ensure_loaded().await?;

        let _busy = self.begin();
        let _write = self.write.lock().await;

        let Some(existing) = self.current().get(&id).cloned() else {
            warn!("update of unknown product");
            self.sink.notify(Notification::failed_to_save(None));
            return Err(DomainError::not_found(id));
        };

        if let Err(err) = self.run_effect(Operation::Update).await {
            self.sink
                .notify(Notification::failed_to_save(Some(existing.name().to_string())));
            return Err(err);
        }

        // The write lock is still held, so the record cannot have moved.
        let current = self.current();
        let idx = current
            .position(&id)
            .ok_or_else(|| DomainError::not_found(id.clone()))?;
        let mut updated = existing;
        updated.apply(&patch, self.clock.today());
        let snapshot = self.commit(current.with_replaced(idx, updated.clone()));

        info!(version = snapshot.version(), "product updated");
        self.sink.notify(Notification::updated(updated.name()));
        Ok(updated)
    }

    #[tracing::instrument(skip_all, fields(product_id = %id))]
    async fn delete(&self, id: ProductId) -> DomainResult<Product> {
        self.ensure_loaded().await?;
        let _busy = self.begin();
        let _write = self.write.lock().await;

        let Some(existing) = self.current().get(&id).cloned() else {
            warn!("delete of unknown product");
            self.sink.notify(Notification::failed_to_delete(None));
            return Err(DomainError::not_found(id));
        };

        if let Err(err) = self.run_effect(Operation::Delete).await {
            self.sink
                .notify(Notification::failed_to_delete(Some(existing.name().to_string())));
            return Err(err);
        }

        let current = self.current();
        let idx = current
            .position(&id)
            .ok_or_else(|| DomainError::not_found(id.clone()))?;
        let snapshot = self.commit(current.without(idx));

        info!(version = snapshot.version(), "product deleted");
        self.sink.notify(Notification::deleted(existing.name()));
        Ok(existing)
    }
}

fn fresh_id(snapshot: &Snapshot) -> ProductId {
    loop {
        let id = ProductId::generate();
        if !snapshot.contains(&id) {
            return id;
        }
    }
}

/// Assembles a [`ProductStore`] from its collaborators.
pub struct ProductStoreBuilder {
    config: StoreConfig,
    effect: Option<Arc<dyn MutationEffect>>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
}

impl Default for ProductStoreBuilder {
    fn default() -> Self {
        Self {
            config: StoreConfig::default(),
            effect: None,
            clock: Arc::new(SystemClock),
            sink: Arc::new(TracingSink),
        }
    }
}

impl ProductStoreBuilder {
    /// Latency used by the default [`SimulatedLatency`] effect.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the simulated latency with a custom effect.
    pub fn effect(mut self, effect: Arc<dyn MutationEffect>) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> ProductStore {
        let effect = self
            .effect
            .unwrap_or_else(|| Arc::new(SimulatedLatency::new(&self.config)));
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::empty()));
        let (busy, _) = watch::channel(true);

        ProductStore {
            inner: Arc::new(Inner {
                snapshot,
                busy,
                write: Mutex::new(()),
                loaded: OnceCell::new(),
                loading: AtomicBool::new(true),
                in_flight: AtomicUsize::new(0),
                effect,
                clock: self.clock,
                sink: self.sink,
            }),
        }
    }
}
