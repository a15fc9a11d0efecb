/// Constructor plus the versioned read, guarded-update and delete methods
/// shared by every catalog client.
macro_rules! impl_versioned_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$crate::actor_framework::Versioned<$entity>>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $entity_name_snake s>](
                    &self,
                ) -> Result<Vec<$crate::actor_framework::Versioned<$entity>>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list().await.map_err(<$error>::from)
                }

                /// Applies `update` only if the stored row is still at `expected`.
                #[tracing::instrument(skip(self, update))]
                pub async fn [<update_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                    expected: $crate::actor_framework::Version,
                    update: <$entity as $crate::actor_framework::Entity>::Update,
                ) -> Result<$crate::actor_framework::Versioned<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .update_versioned(id, expected, update)
                        .await
                        .map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }
            }
        }
    };
}

/// One request/response round trip on a hand-written actor mailbox.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::ledger::LedgerError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::ledger::LedgerError::ActorClosed)?;

                response
                    .await
                    .map_err(|_| $crate::ledger::LedgerError::ActorDropped)?
            }
        }
    };
}
