use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::actor_framework::ResourceActor;
use crate::actors::CartService;
use crate::app_system::SystemError;
use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::config::StoreConfig;
use crate::domain::{Order, OrderId, Product, ProductId, User, UserId};
use crate::ledger::{CartLedger, Catalog, OrderLedger, UserDirectory};
use crate::store::{SharedCartStore, SharedOrderStore, SharedProductStore, SharedUserStore};

/// Monotonic id source starting at 1.
pub(crate) fn id_sequence<I: From<u64>>() -> impl Fn() -> I + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || I::from(counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all actors.
///
/// Spawns one actor per store, wires the ledgers over their clients, and
/// stops everything in [`StoreSystem::shutdown`]. Must be created inside a
/// Tokio runtime.
pub struct StoreSystem {
    pub catalog: Catalog,
    pub users: UserDirectory,
    pub cart: CartLedger,
    pub orders: OrderLedger,
    product_client: ProductClient,
    user_client: UserClient,
    cart_client: CartClient,
    order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: &StoreConfig) -> Self {
        let buffer = config.actor_buffer;

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new("product", buffer, id_sequence::<ProductId>());
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new("user", buffer, id_sequence::<UserId>());
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new("order", buffer, id_sequence::<OrderId>());
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        let (cart_service, cart_client) = CartService::new(buffer);
        let cart_handle = tokio::spawn(cart_service.run());

        let products: SharedProductStore = Arc::new(product_client.clone());
        let cart_store: SharedCartStore = Arc::new(cart_client.clone());
        let order_store: SharedOrderStore = Arc::new(order_client.clone());
        let user_store: SharedUserStore = Arc::new(user_client.clone());

        let cart = CartLedger::new(
            cart_store,
            products.clone(),
            config.shipping,
            config.cart,
        );
        let orders = OrderLedger::new(
            order_store,
            products.clone(),
            cart.clone(),
            config.shipping,
            config.checkout,
        );

        info!(buffer, "Store system started");
        Self {
            catalog: Catalog::new(products),
            users: UserDirectory::new(user_store),
            cart,
            orders,
            product_client,
            user_client,
            cart_client,
            order_client,
            handles: vec![product_handle, user_handle, order_handle, cart_handle],
        }
    }

    /// Sends every actor a shutdown message and waits for all of them. A
    /// failed signal is logged and the remaining actors are still stopped.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            catalog,
            users,
            cart,
            orders,
            product_client,
            user_client,
            cart_client,
            order_client,
            handles,
        } = self;
        drop((catalog, users, cart, orders));

        let signals = [
            ("order", order_client.shutdown().await),
            ("cart", cart_client.shutdown().await),
            ("user", user_client.shutdown().await),
            ("product", product_client.shutdown().await),
        ];
        drop((order_client, cart_client, user_client, product_client));

        let mut first_error = None;
        for (actor, signal) in signals {
            if let Err(e) = signal {
                warn!(actor, error = %e, "Shutdown signal not delivered");
                first_error.get_or_insert(SystemError::Signal(e));
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                first_error.get_or_insert(SystemError::TaskFailed(e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}
