/// Generates `get_<entity>` and `delete_<entity>` on a client wrapping a
/// `ResourceClient`, mapping framework failures onto `StoreError`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $label:literal, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self, id), fields(id = %id))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<Option<$entity>, $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(id)
                        .await
                        .map_err(|e| $crate::error::StoreError::from_framework($label, e))
                }

                #[tracing::instrument(skip(self, id), fields(id = %id))]
                pub async fn [<delete_ $entity_name_snake>](
                    &self,
                    id: <$entity as $crate::actor_framework::Entity>::Id,
                ) -> Result<(), $crate::error::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner
                        .delete(id)
                        .await
                        .map_err(|e| $crate::error::StoreError::from_framework($label, e))
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }

            pub async fn shutdown(&self) -> Result<(), $crate::error::StoreError> {
                self.inner
                    .shutdown()
                    .await
                    .map_err(|e| $crate::error::StoreError::from_framework("actor", e))
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $label:literal, $entity_name_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $label, $entity_name_snake);
    };
}

/// One request/response round trip against a hand-written service.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::StoreError::Unavailable("actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::StoreError::Unavailable("actor dropped response".to_string()))?
            }
        }
    };
}
