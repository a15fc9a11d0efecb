//! # Versioned Resource Actors
//!
//! A generic single-owner store for catalog records. Each [`ResourceActor`] owns
//! one table of [`Versioned`] rows and processes requests one at a time, which
//! makes it the serialization point for every write to that table.
//!
//! Updates go through a compare-and-set on the row's [`Version`]: the caller
//! names the version it last read, and the actor applies the update only if that
//! is still the stored version. Otherwise it answers [`FrameworkError::Conflict`]
//! and writes nothing.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record managed by a [`ResourceActor`] must implement.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Ord + Hash + Copy + Send + Sync + Display + Debug;
    type CreateParams: Send + Debug;
    type Update: Send + Debug;
    /// Unconditional, domain-specific mutations (no version check).
    type Action: Send + Debug;

    fn id(&self) -> Self::Id;

    /// Construct the full record from a freshly minted id and the payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    /// Apply a field update. Runs against a copy; an error discards the copy.
    fn on_update(&mut self, update: Self::Update) -> Result<(), FrameworkError>;

    fn handle_action(&mut self, action: Self::Action) -> Result<(), FrameworkError>;
}

/// Opaque, monotonically advancing row version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub const INITIAL: Self = Self(1);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A stored record together with its version token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Versioned<T> {
    pub version: Version,
    pub entity: T,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Version conflict: expected {expected}, current {current}")]
    Conflict { expected: Version, current: Version },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<Versioned<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    List {
        respond_to: Response<Vec<Versioned<T>>>,
    },
    Update {
        id: T::Id,
        expected: Version,
        update: T::Update,
        respond_to: Response<Versioned<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<Versioned<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Versioned<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient { sender })
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list()));
                }
                ResourceRequest::Update {
                    id,
                    expected,
                    update,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_update(id, expected, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    #[instrument(skip(self, params))]
    fn handle_create(&mut self, params: T::CreateParams) -> Result<Versioned<T>, FrameworkError> {
        let id = (self.next_id_fn)();
        if self.store.contains_key(&id) {
            warn!(%id, "Generated id already in use");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }

        let row = Versioned {
            version: Version::INITIAL,
            entity: T::from_create_params(id, params)?,
        };
        self.store.insert(id, row.clone());

        info!(%id, "Item created");
        Ok(row)
    }

    fn handle_list(&self) -> Vec<Versioned<T>> {
        let mut rows: Vec<Versioned<T>> = self.store.values().cloned().collect();
        rows.sort_by_key(|row| row.entity.id());
        rows
    }

    /// The compare-and-set: version check, update and version advance happen
    /// inside one message, so no other writer can interleave.
    #[instrument(fields(item_id = %id, expected_version = %expected), skip(self, update))]
    fn handle_update(
        &mut self,
        id: T::Id,
        expected: Version,
        update: T::Update,
    ) -> Result<Versioned<T>, FrameworkError> {
        let row = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        if row.version != expected {
            warn!(current = %row.version, "Stale version, update rejected");
            return Err(FrameworkError::Conflict {
                expected,
                current: row.version,
            });
        }

        let mut entity = row.entity.clone();
        entity.on_update(update)?;

        row.entity = entity;
        row.version = row.version.next();

        info!(version = %row.version, "Item updated");
        Ok(row.clone())
    }

    #[instrument(fields(item_id = %id), skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        match self.store.remove(&id) {
            Some(_) => {
                info!("Item deleted");
                Ok(())
            }
            None => {
                debug!("Item not found for delete");
                Err(FrameworkError::NotFound(id.to_string()))
            }
        }
    }

    #[instrument(fields(item_id = %id), skip(self, action))]
    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<Versioned<T>, FrameworkError> {
        let row = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        let mut entity = row.entity.clone();
        entity.handle_action(action)?;

        row.entity = entity;
        row.version = row.version.next();

        info!(version = %row.version, "Action applied");
        Ok(row.clone())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<Versioned<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update_versioned(
        &self,
        id: T::Id,
        expected: Version,
        update: T::Update,
    ) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            expected,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<Versioned<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use testresult::TestResult;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u64,
        label: String,
        capacity: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
    }

    #[derive(Debug)]
    struct ShelfUpdate {
        capacity: i64,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Relabel(String),
    }

    impl Entity for Shelf {
        type Id = u64;
        type CreateParams = ShelfCreate;
        type Update = ShelfUpdate;
        type Action = ShelfAction;

        fn id(&self) -> u64 {
            self.id
        }

        fn from_create_params(id: u64, params: ShelfCreate) -> Result<Self, FrameworkError> {
            Ok(Self {
                id,
                label: params.label,
                capacity: 0,
            })
        }

        fn on_update(&mut self, update: ShelfUpdate) -> Result<(), FrameworkError> {
            self.label.push('*');
            self.capacity = u32::try_from(update.capacity)
                .map_err(|_| FrameworkError::Rejected("capacity must be positive".into()))?;
            Ok(())
        }

        fn handle_action(&mut self, action: ShelfAction) -> Result<(), FrameworkError> {
            match action {
                ShelfAction::Relabel(label) => self.label = label,
            }
            Ok(())
        }
    }

    fn spawn_shelves() -> ResourceClient<Shelf> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || counter.fetch_add(1, Ordering::SeqCst);
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn create_starts_at_initial_version() -> TestResult {
        let client = spawn_shelves();

        let created = client.create(ShelfCreate { label: "A".into() }).await?;
        assert_eq!(created.version, Version::INITIAL);

        let fetched = client.get(created.entity.id).await?;
        assert_eq!(fetched, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn update_with_current_version_advances_exactly_once() -> TestResult {
        let client = spawn_shelves();
        let created = client.create(ShelfCreate { label: "A".into() }).await?;

        let updated = client
            .update_versioned(created.entity.id, created.version, ShelfUpdate { capacity: 4 })
            .await?;
        assert_eq!(updated.version, created.version.next());
        assert_eq!(updated.entity.capacity, 4);

        let replay = client
            .update_versioned(created.entity.id, created.version, ShelfUpdate { capacity: 9 })
            .await;
        assert_eq!(
            replay,
            Err(FrameworkError::Conflict {
                expected: created.version,
                current: updated.version,
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn stale_version_never_applies() -> TestResult {
        let client = spawn_shelves();
        let created = client.create(ShelfCreate { label: "A".into() }).await?;
        let current = client
            .update_versioned(created.entity.id, created.version, ShelfUpdate { capacity: 1 })
            .await?;

        for _ in 0..3 {
            let result = client
                .update_versioned(created.entity.id, created.version, ShelfUpdate { capacity: 7 })
                .await;
            assert!(
                matches!(result, Err(FrameworkError::Conflict { .. })),
                "expected Conflict, got {result:?}"
            );
        }

        assert_eq!(client.get(created.entity.id).await?, Some(current));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_update_leaves_row_untouched() -> TestResult {
        let client = spawn_shelves();
        let created = client.create(ShelfCreate { label: "A".into() }).await?;

        let result = client
            .update_versioned(created.entity.id, created.version, ShelfUpdate { capacity: -1 })
            .await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));

        // on_update mutated the label before failing; the copy must be discarded.
        assert_eq!(client.get(created.entity.id).await?, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let client = spawn_shelves();

        let result = client
            .update_versioned(42, Version::INITIAL, ShelfUpdate { capacity: 1 })
            .await;

        assert_eq!(result, Err(FrameworkError::NotFound("42".into())));
    }

    #[tokio::test]
    async fn action_bumps_version_without_check() -> TestResult {
        let client = spawn_shelves();
        let created = client.create(ShelfCreate { label: "A".into() }).await?;

        let relabelled = client
            .perform_action(created.entity.id, ShelfAction::Relabel("B".into()))
            .await?;

        assert_eq!(relabelled.entity.label, "B");
        assert_eq!(relabelled.version, created.version.next());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_and_delete_removes() -> TestResult {
        let client = spawn_shelves();
        let first = client.create(ShelfCreate { label: "A".into() }).await?;
        let second = client.create(ShelfCreate { label: "B".into() }).await?;

        let ids: Vec<u64> = client.list().await?.iter().map(|row| row.entity.id).collect();
        assert_eq!(ids, vec![first.entity.id, second.entity.id]);

        client.delete(first.entity.id).await?;
        assert_eq!(client.get(first.entity.id).await?, None);
        assert_eq!(
            client.delete(first.entity.id).await,
            Err(FrameworkError::NotFound(first.entity.id.to_string()))
        );
        Ok(())
    }
}
