use crate::{
    domain::requests::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    model::{Order, OrderItem, Product, User},
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default, Clone)]
pub(crate) struct Tables {
    pub users: BTreeMap<i32, User>,
    pub products: BTreeMap<i32, Product>,
    pub orders: BTreeMap<i32, Order>,
    pub order_items: Vec<OrderItem>,
    next_user_id: i32,
    next_product_id: i32,
    next_order_id: i32,
    next_order_item_id: i32,
}

impl Tables {
    pub fn next_user_id(&mut self) -> i32 {
        self.next_user_id += 1;
        self.next_user_id
    }

    pub fn next_product_id(&mut self) -> i32 {
        self.next_product_id += 1;
        self.next_product_id
    }

    pub fn insert_order(&mut self, req: &CreateOrderRecordRequest) -> i32 {
        self.next_order_id += 1;
        let id = self.next_order_id;

        self.orders.insert(
            id,
            Order {
                id,
                user_id: req.user_id,
                total: req.total,
                status: req.status.clone(),
                address: req.address.clone(),
                created_at: Some(Utc::now().naive_utc()),
            },
        );
        id
    }

    pub fn insert_order_item(&mut self, req: &CreateOrderItemRecordRequest) {
        self.next_order_item_id += 1;

        self.order_items.push(OrderItem {
            id: self.next_order_item_id,
            order_id: req.order_id,
            product_id: req.product_id,
            quantity: req.quantity,
            price: req.price,
            created_at: Some(Utc::now().naive_utc()),
        });
    }
}

/// Process-local storage with the same contracts as the Postgres
/// repositories. Checkout transactions hold the table lock from `begin`
/// until commit or drop, and stage their writes on a copy of the tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_order_items: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn lock(&self) -> tokio::sync::MutexGuard<'_, Tables> {
        self.tables.lock().await
    }

    pub(crate) async fn lock_owned(&self) -> OwnedMutexGuard<Tables> {
        self.tables.clone().lock_owned().await
    }

    pub(crate) fn order_items_fail(&self) -> bool {
        self.fail_order_items.load(Ordering::SeqCst)
    }

    /// Makes every subsequent order-item write fail with a storage error.
    pub fn fail_order_item_writes(&self, fail: bool) {
        self.fail_order_items.store(fail, Ordering::SeqCst);
    }

    pub async fn seed_product(&self, name: &str, price: Decimal, quantity: i32) -> Product {
        let mut tables = self.lock().await;
        let id = tables.next_product_id();

        let product = Product {
            id,
            name: name.to_string(),
            description: String::new(),
            image: String::new(),
            price,
            quantity,
            created_at: Some(Utc::now().naive_utc()),
        };
        tables.products.insert(id, product.clone());
        product
    }

    pub async fn product(&self, id: i32) -> Option<Product> {
        self.lock().await.products.get(&id).cloned()
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.lock().await.orders.values().cloned().collect()
    }

    pub async fn order_items(&self, order_id: i32) -> Vec<OrderItem> {
        self.lock()
            .await
            .order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }
}
