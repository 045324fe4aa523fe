use crate::{
    abstract_trait::{
        BoxedCheckoutTransaction, CheckoutServiceTrait, DynCheckoutUnitOfWork,
        DynProductQueryRepository,
    },
    domain::{
        requests::{CartItem, CreateOrderItemRecordRequest, CreateOrderRecordRequest},
        responses::CheckoutResponse,
    },
    errors::{CheckoutError, ServiceError},
    model::{DEFAULT_ORDER_ADDRESS, MAX_AMOUNT, ORDER_STATUS_PENDING, Product as ProductModel},
    utils::{Method, ServiceTelemetry},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct CheckoutService {
    product_query: DynProductQueryRepository,
    unit_of_work: DynCheckoutUnitOfWork,
    telemetry: ServiceTelemetry,
}

pub struct CheckoutServiceDeps {
    pub product_query: DynProductQueryRepository,
    pub unit_of_work: DynCheckoutUnitOfWork,
    pub registry: Arc<Mutex<Registry>>,
}

impl CheckoutService {
    pub async fn new(deps: CheckoutServiceDeps) -> Self {
        let CheckoutServiceDeps {
            product_query,
            unit_of_work,
            registry,
        } = deps;

        let telemetry = ServiceTelemetry::new("checkout-service", &registry).await;

        Self {
            product_query,
            unit_of_work,
            telemetry,
        }
    }

    async fn place_order(
        &self,
        items: &[CartItem],
        user_id: i32,
    ) -> Result<CheckoutResponse, ServiceError> {
        let requested = requested_quantities(items)?;
        let ids: Vec<i32> = requested.keys().copied().collect();

        let products: HashMap<i32, ProductModel> = self
            .product_query
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let total = price_cart(items, &requested, &products)?;

        let mut tx = self.unit_of_work.begin().await?;
        let order_id = write_order(&mut tx, items, &requested, &products, user_id, total).await?;
        tx.commit().await?;

        Ok(CheckoutResponse {
            order_id,
            total_price: total,
        })
    }
}

/// Rejects empty carts and non-positive quantities, then sums the requested
/// quantity per product. Keys come out in ascending product id order.
fn requested_quantities(items: &[CartItem]) -> Result<BTreeMap<i32, i32>, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
        return Err(CheckoutError::InvalidQuantity(item.product_id));
    }

    let mut requested = BTreeMap::new();
    for item in items {
        let entry = requested.entry(item.product_id).or_insert(0_i32);
        // no stock level can satisfy a sum that overflows
        *entry = entry
            .checked_add(item.quantity)
            .ok_or(CheckoutError::OutOfStock(item.product_id))?;
    }

    Ok(requested)
}

fn price_cart(
    items: &[CartItem],
    requested: &BTreeMap<i32, i32>,
    products: &HashMap<i32, ProductModel>,
) -> Result<Decimal, CheckoutError> {
    if let Some(item) = items.iter().find(|i| !products.contains_key(&i.product_id)) {
        return Err(CheckoutError::ProductUnavailable(item.product_id));
    }

    for item in items {
        let wanted = requested.get(&item.product_id).copied().unwrap_or(item.quantity);
        let in_stock = products
            .get(&item.product_id)
            .map(|p| p.quantity)
            .unwrap_or_default();

        if in_stock < wanted {
            return Err(CheckoutError::OutOfStock(item.product_id));
        }
    }

    let total = items.iter().try_fold(Decimal::ZERO, |total, item| {
        products
            .get(&item.product_id)
            .and_then(|p| p.price.checked_mul(Decimal::from(item.quantity)))
            .and_then(|line| total.checked_add(line))
    });

    match total {
        Some(total) if total <= MAX_AMOUNT => Ok(total),
        _ => Err(CheckoutError::TotalTooLarge),
    }
}

async fn write_order(
    tx: &mut BoxedCheckoutTransaction,
    items: &[CartItem],
    requested: &BTreeMap<i32, i32>,
    products: &HashMap<i32, ProductModel>,
    user_id: i32,
    total: Decimal,
) -> Result<i32, ServiceError> {
    // ascending id order keeps row locks consistent across concurrent checkouts
    for (&product_id, &qty) in requested {
        if tx.decreasing_stock(product_id, qty).await?.is_none() {
            return Err(CheckoutError::OutOfStock(product_id).into());
        }
    }

    let order_id = tx
        .create_order(&CreateOrderRecordRequest {
            user_id,
            total,
            status: ORDER_STATUS_PENDING.to_string(),
            address: DEFAULT_ORDER_ADDRESS.to_string(),
        })
        .await?;

    for item in items {
        let price = products
            .get(&item.product_id)
            .map(|p| p.price)
            .ok_or(CheckoutError::ProductUnavailable(item.product_id))?;

        tx.create_order_item(&CreateOrderItemRecordRequest {
            order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price,
        })
        .await?;
    }

    Ok(order_id)
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn checkout(
        &self,
        items: &[CartItem],
        user_id: i32,
    ) -> Result<CheckoutResponse, ServiceError> {
        info!("🛒 Checking out {} cart lines for user {user_id}", items.len());

        let method = Method::Post;
        let tracing_ctx = self.telemetry.start_tracing(
            "Checkout",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("cart.lines", items.len().to_string()),
            ],
        );

        match self.place_order(items, user_id).await {
            Ok(response) => {
                info!(
                    "✅ Order {} placed for user {user_id}, total {}",
                    response.order_id, response.total_price
                );
                self.telemetry
                    .complete_tracing_success(&tracing_ctx, method, "Checkout completed");
                Ok(response)
            }
            Err(ServiceError::Checkout(err)) => {
                self.telemetry.complete_tracing_rejected(
                    &tracing_ctx,
                    method,
                    &format!("checkout for user {user_id}: {err}"),
                );
                Err(ServiceError::Checkout(err))
            }
            Err(err) => {
                error!("❌ Checkout failed for user {user_id}: {err}");
                self.telemetry
                    .complete_tracing_error(&tracing_ctx, method, "Storage error");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryStore, Repositories};

    async fn service(store: &InMemoryStore) -> CheckoutService {
        let repos = Repositories::in_memory(store);
        CheckoutService::new(CheckoutServiceDeps {
            product_query: repos.product.query,
            unit_of_work: repos.checkout,
            registry: Arc::new(Mutex::new(Registry::default())),
        })
        .await
    }

    fn item(product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            product_id,
            quantity,
        }
    }

    fn checkout_error(err: ServiceError) -> CheckoutError {
        match err {
            ServiceError::Checkout(err) => err,
            other => panic!("expected checkout error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let store = InMemoryStore::new();
        let service = service(&store).await;

        let err = service.checkout(&[], 7).await.unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::EmptyCart);
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() {
        let store = InMemoryStore::new();
        let mug = store.seed_product("mug", Decimal::new(500, 2), 10).await;
        let service = service(&store).await;

        let err = service.checkout(&[item(mug.id, 0)], 1).await.unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::InvalidQuantity(mug.id));

        let err = service.checkout(&[item(mug.id, -2)], 1).await.unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::InvalidQuantity(mug.id));
    }

    #[tokio::test]
    async fn unknown_product_is_unavailable() {
        let store = InMemoryStore::new();
        let mug = store.seed_product("mug", Decimal::new(500, 2), 10).await;
        let service = service(&store).await;

        let err = service
            .checkout(&[item(mug.id, 1), item(999, 1)], 1)
            .await
            .unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::ProductUnavailable(999));
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_leaves_inventory_untouched() {
        let store = InMemoryStore::new();
        let lamp = store.seed_product("lamp", Decimal::new(4200, 2), 3).await;
        let service = service(&store).await;

        let err = service.checkout(&[item(lamp.id, 5)], 1).await.unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::OutOfStock(lamp.id));

        assert_eq!(store.product(lamp.id).await.unwrap().quantity, 3);
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn stock_rejection_is_recorded_as_rejected_not_error() {
        use prometheus_client::encoding::text::encode;

        let store = InMemoryStore::new();
        let lamp = store.seed_product("lamp", Decimal::new(4200, 2), 1).await;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let repos = Repositories::in_memory(&store);
        let service = CheckoutService::new(CheckoutServiceDeps {
            product_query: repos.product.query,
            unit_of_work: repos.checkout,
            registry: registry.clone(),
        })
        .await;

        service.checkout(&[item(lamp.id, 2)], 1).await.unwrap_err();

        let mut buffer = String::new();
        encode(&mut buffer, &*registry.lock().await).unwrap();
        assert!(buffer.contains("status=\"Rejected\""));
        assert!(!buffer.contains("status=\"Error\""));
    }

    #[tokio::test]
    async fn total_beyond_the_money_column_is_rejected() {
        let store = InMemoryStore::new();
        let car = store.seed_product("car", Decimal::new(6_000_000_000, 2), 5).await;
        let service = service(&store).await;

        let err = service.checkout(&[item(car.id, 2)], 1).await.unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::TotalTooLarge);
        assert_eq!(store.product(car.id).await.unwrap().quantity, 5);
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn repeated_lines_are_checked_against_their_sum() {
        let store = InMemoryStore::new();
        let lamp = store.seed_product("lamp", Decimal::new(4200, 2), 3).await;
        let service = service(&store).await;

        let err = service
            .checkout(&[item(lamp.id, 2), item(lamp.id, 2)], 1)
            .await
            .unwrap_err();
        assert_eq!(checkout_error(err), CheckoutError::OutOfStock(lamp.id));
        assert_eq!(store.product(lamp.id).await.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn checkout_creates_pending_order_with_snapshotted_items() {
        let store = InMemoryStore::new();
        let p1 = store.seed_product("book", Decimal::new(1000, 2), 5).await;
        let p2 = store.seed_product("pen", Decimal::new(500, 2), 5).await;
        let service = service(&store).await;

        let response = service
            .checkout(&[item(p1.id, 2), item(p2.id, 1)], 42)
            .await
            .unwrap();

        assert_eq!(response.total_price, Decimal::new(2500, 2));

        let orders = store.orders().await;
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.id, response.order_id);
        assert_eq!(order.user_id, 42);
        assert_eq!(order.total, Decimal::new(2500, 2));
        assert_eq!(order.status, ORDER_STATUS_PENDING);
        assert_eq!(order.address, DEFAULT_ORDER_ADDRESS);

        let lines = store.order_items(order.id).await;
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].product_id, lines[0].quantity), (p1.id, 2));
        assert_eq!(lines[0].price, Decimal::new(1000, 2));
        assert_eq!((lines[1].product_id, lines[1].quantity), (p2.id, 1));
        assert_eq!(lines[1].price, Decimal::new(500, 2));

        let line_total: Decimal = lines
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(line_total, order.total);

        assert_eq!(store.product(p1.id).await.unwrap().quantity, 3);
        assert_eq!(store.product(p2.id).await.unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn identical_checkouts_create_distinct_orders() {
        let store = InMemoryStore::new();
        let pen = store.seed_product("pen", Decimal::new(150, 2), 10).await;
        let service = service(&store).await;

        let first = service.checkout(&[item(pen.id, 2)], 1).await.unwrap();
        let second = service.checkout(&[item(pen.id, 2)], 1).await.unwrap();

        assert_ne!(first.order_id, second.order_id);
        assert_eq!(store.orders().await.len(), 2);
        assert_eq!(store.product(pen.id).await.unwrap().quantity, 6);
    }

    #[tokio::test]
    async fn failed_item_write_rolls_back_everything() {
        let store = InMemoryStore::new();
        let pen = store.seed_product("pen", Decimal::new(150, 2), 10).await;
        let service = service(&store).await;

        store.fail_order_item_writes(true);
        let err = service.checkout(&[item(pen.id, 2)], 1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Repo(_)));
        assert_eq!(store.product(pen.id).await.unwrap().quantity, 10);
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn last_unit_is_sold_exactly_once() {
        let store = InMemoryStore::new();
        let vase = store.seed_product("vase", Decimal::new(9900, 2), 1).await;
        let service = Arc::new(service(&store).await);
        let vase_id = vase.id;

        let handles: Vec<_> = (0..8)
            .map(|user_id| {
                let service = service.clone();
                tokio::spawn(async move { service.checkout(&[item(vase_id, 1)], user_id).await })
            })
            .collect();

        let mut sold = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => sold += 1,
                Err(err) => assert_eq!(checkout_error(err), CheckoutError::OutOfStock(vase_id)),
            }
        }

        assert_eq!(sold, 1);
        assert_eq!(store.product(vase.id).await.unwrap().quantity, 0);
        assert_eq!(store.orders().await.len(), 1);
    }
}
