//! Channel-level stand-ins for the store actors.
//!
//! [`create_mock_client`] hands out a catalog client and [`create_mock_ledger`]
//! a ledger client, each wired to a mailbox the test reads directly. The
//! `expect_*` helpers pop the next request, so a test can script product
//! lookups, cart loads and commit outcomes one message at a time.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{
    Entity, FrameworkError, ResourceClient, ResourceRequest, Version, Versioned,
};
use crate::clients::LedgerClient;
use crate::domain::{CallerId, CartRow};
use crate::ledger::{CommitBatch, LedgerError, LedgerRequest};

type Reply<T, E> = oneshot::Sender<Result<T, E>>;

/// Creates a resource client whose requests land on the returned receiver
/// instead of a running actor.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Same as [`create_mock_client`] for the ledger mailbox.
pub fn create_mock_ledger(buffer_size: usize) -> (LedgerClient, mpsc::Receiver<LedgerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Reply<Versioned<T>, FrameworkError>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Reply<Option<Versioned<T>>, FrameworkError>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Version, T::Update, Reply<Versioned<T>, FrameworkError>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            expected,
            update,
            respond_to,
        }) => Some((id, expected, update, respond_to)),
        _ => None,
    }
}

pub async fn expect_load_cart(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(CallerId, Reply<Vec<CartRow>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::LoadCart { caller, respond_to }) => Some((caller, respond_to)),
        _ => None,
    }
}

pub async fn expect_commit(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(CommitBatch, Reply<(), LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Commit { batch, respond_to }) => Some((batch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductCreate, ProductId, ProductUpdate};

    #[tokio::test]
    async fn create_request_reaches_the_mailbox() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let create_task = tokio::spawn(async move {
            client
                .create_product(ProductCreate {
                    name: "Test".to_string(),
                    price: dec!(1.25),
                    category_id: None,
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");

        let id = ProductId::now_v7();
        let stored = Versioned {
            version: Version::INITIAL,
            entity: Product::from_create_params(id, payload).expect("valid product"),
        };
        responder.send(Ok(stored.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn guarded_update_forwards_the_expected_version() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);
        let id = ProductId::now_v7();
        let expected = Version::INITIAL.next();

        let update_task = tokio::spawn(async move {
            client
                .update_product(
                    id,
                    expected,
                    ProductUpdate {
                        price: Some(dec!(2)),
                        ..ProductUpdate::default()
                    },
                )
                .await
        });

        let (sent_id, sent_version, update, responder) =
            expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(sent_id, id);
        assert_eq!(sent_version, expected);
        assert_eq!(update.price, Some(dec!(2)));
        responder
            .send(Err(FrameworkError::Conflict {
                expected,
                current: expected.next(),
            }))
            .unwrap();

        let err = update_task.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Conflict);
    }
}
