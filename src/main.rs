use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

use outdoor_store::app_system::{setup_tracing, StoreSystem};
use outdoor_store::config::StoreConfig;
use outdoor_store::domain::NewProduct;
use outdoor_store::ledger::Signup;

fn seed_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Trail Runner 2", Decimal::new(1299, 1), 10)
            .category("Footwear")
            .brand("Ridgeline")
            .description("Lightweight trail running shoe")
            .rating(4.6, 212),
        NewProduct::new("Alpine Tent 3P", Decimal::new(45900, 2), 4)
            .category("Camping")
            .brand("Summit Co")
            .description("Three person four season tent")
            .rating(4.8, 87),
        NewProduct::new("Down Sleeping Bag", Decimal::new(27950, 2), 6)
            .category("Camping")
            .brand("Summit Co")
            .description("Rated to -10C")
            .rating(4.4, 140),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting outdoor store demo");
    let system = StoreSystem::new(&config);

    let mut product_ids = Vec::new();
    for product in seed_catalog() {
        product_ids.push(system.catalog.add_product(product).await?);
    }
    info!(count = product_ids.len(), "Catalog seeded");

    let user_id = system
        .users
        .register(Signup {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Pine Street, Boulder".to_string(),
        })
        .await?;
    info!(user_id = %user_id, "Shopper registered");

    let span = tracing::info_span!("shopping", user_id = %user_id);
    let flow = async {
        system.cart.add_item(user_id, product_ids[0], 2).await?;
        system.cart.add_item(user_id, product_ids[1], 1).await?;
        let quote = system.cart.quote(user_id).await?;
        info!(subtotal = %quote.subtotal, shipping = %quote.shipping, total = %quote.total, "Cart ready");

        let first = system
            .orders
            .create_order(user_id, "12 Pine Street, Boulder", "credit_card")
            .await?;

        system.cart.add_item(user_id, product_ids[2], 1).await?;
        let second = system
            .orders
            .create_order(user_id, "12 Pine Street, Boulder", "cash_on_delivery")
            .await?;
        let report = system.orders.cancel(second).await?;
        info!(order_id = %first, cancelled = %report.order_id, "Orders processed");

        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await;

    if let Err(e) = flow {
        error!(error = %e, "Shopping flow failed");
    }

    let history = system.orders.orders_view(user_id).await?;
    println!("{}", serde_json::to_string_pretty(&history)?);

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
