use crate::{
    abstract_trait::{
        cart_client::{CartCaller, DynCartClient},
        checkout::CheckoutServiceTrait,
        order::DynOrderCommandRepository,
    },
    domain::{
        requests::{CheckoutRequest, CreateOrderItemRecordRequest, CreateOrderRecordRequest},
        response::{CartResponse, OrderResponse},
    },
    service::CheckoutLocks,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::{info, warn};
use validator::Validate;

/// Cart to order, in strict sequence: fetch cart, persist order, clear cart.
///
/// The persisted order is authoritative. A failed clear is logged and the
/// checkout still succeeds, leaving a stale cart behind.
#[derive(Clone)]
pub struct CheckoutService {
    cart: DynCartClient,
    orders: DynOrderCommandRepository,
    locks: Option<CheckoutLocks>,
    tracer: OperationTracer,
}

pub struct CheckoutServiceDeps {
    pub cart: DynCartClient,
    pub orders: DynOrderCommandRepository,
    /// `None` disables per-user serialization.
    pub locks: Option<CheckoutLocks>,
}

impl CheckoutService {
    pub fn new(deps: CheckoutServiceDeps, registry: &mut Registry) -> Self {
        let CheckoutServiceDeps {
            cart,
            orders,
            locks,
        } = deps;

        Self {
            cart,
            orders,
            locks,
            tracer: OperationTracer::new("checkout-service", registry),
        }
    }

    fn snapshot(
        user_id: &str,
        cart: CartResponse,
        request: &CheckoutRequest,
    ) -> CreateOrderRecordRequest {
        let items: Vec<CreateOrderItemRecordRequest> = cart
            .items
            .into_iter()
            .map(|line| CreateOrderItemRecordRequest {
                book_id: line.book.id,
                title: line.book.title,
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        let total_price = items.iter().map(|item| item.price).sum();

        CreateOrderRecordRequest {
            user_id: user_id.to_string(),
            items,
            total_price,
            name: request.name.clone(),
            shipping_address: request.shipping_address.clone(),
            order_note: request.order_note.clone(),
            payment: request.payment(),
        }
    }

    async fn checkout_inner(
        &self,
        caller: &CartCaller,
        request: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError> {
        if request.validate().is_err() {
            return Err(ServiceError::validation(CheckoutRequest::MISSING_FIELDS));
        }

        let user_id = caller.user_id();

        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(user_id).await),
            None => None,
        };

        let cart = self.cart.get_cart(caller).await?;
        if cart.items.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let record = Self::snapshot(user_id, cart, request);
        let order = self.orders.create_order(&record).await?;

        if let Err(e) = self.cart.clear_cart(user_id).await {
            warn!(
                "⚠️ Order {} created but cart of user {user_id} was not cleared: {e}",
                order.order.id
            );
        }

        Ok(OrderResponse::from(order))
    }
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn checkout(
        &self,
        caller: &CartCaller,
        request: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError> {
        info!("🧾 Checkout started for user {}", caller.user_id());

        let tracing_ctx = self.tracer.start_tracing(
            "checkout",
            vec![KeyValue::new("user_id", caller.user_id().to_string())],
        );

        let result = self.checkout_inner(caller, request).await;

        match &result {
            Ok(order) => self.tracer.complete_tracing_success(
                &tracing_ctx,
                Method::Post,
                &format!(
                    "Order {} created with {} item(s), total {}",
                    order.id,
                    order.items.len(),
                    order.total_price
                ),
            ),
            Err(e) => self.tracer.complete_tracing_error(
                &tracing_ctx,
                Method::Post,
                &format!("Checkout failed for user {}: {e}", caller.user_id()),
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            cart_client::{CartClientTrait, MockCartClientTrait},
            order::{MockOrderCommandRepositoryTrait, OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        },
        domain::response::{CartBookResponse, CartLineResponse},
        model::{Order, OrderItem, OrderRecord, OrderStatus},
    };
    use chrono::Utc;
    use shared::{domain::UserContext, errors::RepositoryError};
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use uuid::Uuid;

    /// In-memory cart-service: clear empties it unless told to fail.
    #[derive(Default)]
    struct FakeCart {
        lines: Mutex<Vec<CartLineResponse>>,
        fail_clear: bool,
        reads: AtomicUsize,
        clears: AtomicUsize,
    }

    impl FakeCart {
        fn with_lines(lines: Vec<CartLineResponse>) -> Self {
            Self {
                lines: Mutex::new(lines),
                ..Default::default()
            }
        }

        fn snapshot(&self) -> Vec<CartLineResponse> {
            self.lines.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CartClientTrait for FakeCart {
        async fn get_cart(&self, _caller: &CartCaller) -> Result<CartResponse, ServiceError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(CartResponse {
                cart_id: Some("c-1".into()),
                items: self.snapshot(),
            })
        }

        async fn clear_cart(&self, _user_id: &str) -> Result<(), ServiceError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            if self.fail_clear {
                return Err(ServiceError::Upstream {
                    status: Some(503),
                    message: "cart-service down".into(),
                });
            }
            self.lines.lock().unwrap().clear();
            Ok(())
        }
    }

    /// In-memory order store.
    #[derive(Default)]
    struct FakeOrders {
        records: Mutex<Vec<OrderRecord>>,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeOrders {
        async fn create_order(
            &self,
            req: &CreateOrderRecordRequest,
        ) -> Result<OrderRecord, RepositoryError> {
            let id = Uuid::new_v4();
            let record = OrderRecord {
                order: Order {
                    id,
                    user_id: req.user_id.clone(),
                    total_price: req.total_price,
                    name: req.name.clone(),
                    shipping_address: req.shipping_address.clone(),
                    order_note: req.order_note.clone(),
                    status: OrderStatus::Pending.to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
                items: req
                    .items
                    .iter()
                    .enumerate()
                    .map(|(position, item)| OrderItem {
                        id: Uuid::new_v4(),
                        order_id: id,
                        position: position as i32,
                        book_id: item.book_id.clone(),
                        title: item.title.clone(),
                        quantity: item.quantity,
                        price: item.price,
                    })
                    .collect(),
            };
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn update_status(
            &self,
            _order_id: Uuid,
            _status: OrderStatus,
        ) -> Result<Option<OrderRecord>, RepositoryError> {
            Ok(None)
        }
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for FakeOrders {
        async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|r| r.order.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn find_all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
            Ok(self.records.lock().unwrap().iter().rev().cloned().collect())
        }
    }

    fn line(book_id: &str, title: &str, quantity: i32, line_price: f64) -> CartLineResponse {
        CartLineResponse {
            id: Some(Uuid::new_v4().to_string()),
            quantity,
            price: line_price,
            book: CartBookResponse {
                id: book_id.into(),
                title: title.into(),
            },
        }
    }

    fn caller(user_id: &str) -> CartCaller {
        CartCaller::Forwarded(UserContext::new(user_id, None, None))
    }

    fn form() -> CheckoutRequest {
        CheckoutRequest {
            name: "Ada".into(),
            shipping_address: "1 Loop Rd".into(),
            card_number: "4111111111111111".into(),
            cvv: "123".into(),
            expired_date: "12/30".into(),
            order_note: Some("leave at door".into()),
        }
    }

    fn service(
        cart: Arc<dyn CartClientTrait + Send + Sync>,
        orders: Arc<dyn OrderCommandRepositoryTrait + Send + Sync>,
    ) -> CheckoutService {
        CheckoutService::new(
            CheckoutServiceDeps {
                cart,
                orders,
                locks: Some(CheckoutLocks::new()),
            },
            &mut Registry::default(),
        )
    }

    #[tokio::test]
    async fn snapshot_of_single_line_cart() {
        let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 2, 20.0)]));
        let orders = Arc::new(FakeOrders::default());

        let order = service(cart.clone(), orders.clone())
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap();

        assert_eq!(order.user_id, "u-1");
        assert_eq!(order.status, "pending");
        assert_eq!(order.total_price, 20.0);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].book_id, "B1");
        assert_eq!(order.items[0].title, "Dune");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].price, 20.0);
        assert_eq!(order.order_note.as_deref(), Some("leave at door"));

        assert!(cart.snapshot().is_empty());
        assert_eq!(orders.find_by_user("u-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn total_is_sum_of_line_prices() {
        let cart = Arc::new(FakeCart::with_lines(vec![
            line("B1", "Dune", 2, 20.0),
            line("B2", "Emma", 1, 7.5),
            line("B3", "Ulysses", 3, 36.0),
        ]));

        let order = service(cart, Arc::new(FakeOrders::default()))
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap();

        assert_eq!(order.items.len(), 3);
        assert_eq!(order.total_price, 63.5);
        assert_eq!(
            order.items.iter().map(|i| i.book_id.as_str()).collect::<Vec<_>>(),
            vec!["B1", "B2", "B3"]
        );
    }

    #[tokio::test]
    async fn failed_clear_keeps_order_and_stale_cart() {
        let cart = Arc::new(FakeCart {
            lines: Mutex::new(vec![line("B1", "Dune", 2, 20.0)]),
            fail_clear: true,
            ..Default::default()
        });
        let orders = Arc::new(FakeOrders::default());

        let order = service(cart.clone(), orders.clone())
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap();

        assert_eq!(cart.clears.load(Ordering::SeqCst), 1);
        assert_eq!(cart.snapshot().len(), 1);

        let listed = orders.find_by_user("u-1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order.id, order.id);
    }

    #[tokio::test]
    async fn missing_field_fails_before_cart_is_read() {
        let mut cart = MockCartClientTrait::new();
        cart.expect_get_cart().never();
        cart.expect_clear_cart().never();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders.expect_create_order().never();

        let svc = service(Arc::new(cart), Arc::new(orders));

        for strip in 0..5 {
            let mut req = form();
            match strip {
                0 => req.name.clear(),
                1 => req.shipping_address.clear(),
                2 => req.card_number.clear(),
                3 => req.cvv.clear(),
                _ => req.expired_date.clear(),
            }

            let err = svc.checkout(&caller("u-1"), &req).await.unwrap_err();
            assert!(
                matches!(err, ServiceError::Validation(ref m) if m[0] == "Missing required order fields")
            );
        }
    }

    #[tokio::test]
    async fn empty_cart_creates_no_order() {
        let cart = Arc::new(FakeCart::default());
        let orders = Arc::new(FakeOrders::default());

        let err = service(cart.clone(), orders.clone())
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
        assert!(orders.find_all().await.unwrap().is_empty());
        assert_eq!(cart.clears.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cart_read_failure_is_propagated_without_order() {
        let mut cart = MockCartClientTrait::new();
        cart.expect_get_cart().once().returning(|_| {
            Err(ServiceError::Upstream {
                status: Some(401),
                message: "Unauthorized".into(),
            })
        });
        cart.expect_clear_cart().never();

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders.expect_create_order().never();

        let err = service(Arc::new(cart), Arc::new(orders))
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Upstream { status: Some(401), .. }));
    }

    #[tokio::test]
    async fn persistence_failure_leaves_cart_untouched() {
        let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 1, 10.0)]));

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .once()
            .returning(|_| Err(RepositoryError::Custom("disk full".into())));

        let err = service(cart.clone(), Arc::new(orders))
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Repo(_)));
        assert_eq!(cart.clears.load(Ordering::SeqCst), 0);
        assert_eq!(cart.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn payment_is_written_with_the_order() {
        let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 1, 10.0)]));

        let mut orders = MockOrderCommandRepositoryTrait::new();
        orders
            .expect_create_order()
            .withf(|req| {
                req.user_id == "u-1"
                    && req.payment.card_number == "4111111111111111"
                    && req.payment.cvv == "123"
                    && req.payment.expired_date == "12/30"
            })
            .once()
            .returning(|req| {
                let id = Uuid::new_v4();
                Ok(OrderRecord {
                    order: Order {
                        id,
                        user_id: req.user_id.clone(),
                        total_price: req.total_price,
                        name: req.name.clone(),
                        shipping_address: req.shipping_address.clone(),
                        order_note: None,
                        status: "pending".into(),
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    },
                    items: vec![],
                })
            });

        service(cart, Arc::new(orders))
            .checkout(&caller("u-1"), &form())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn second_checkout_after_success_finds_empty_cart() {
        let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 1, 10.0)]));
        let orders = Arc::new(FakeOrders::default());
        let svc = service(cart.clone(), orders.clone());

        svc.checkout(&caller("u-1"), &form()).await.unwrap();
        let err = svc.checkout(&caller("u-1"), &form()).await.unwrap_err();

        assert!(matches!(err, ServiceError::EmptyCart));
        assert_eq!(orders.find_all().await.unwrap().len(), 1);
        assert_eq!(cart.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_checkouts_for_one_user_create_one_order() {
        let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 1, 10.0)]));
        let orders = Arc::new(FakeOrders::default());
        let svc = Arc::new(service(cart, orders.clone()));

        let a = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.checkout(&caller("u-1"), &form()).await })
        };
        let b = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.checkout(&caller("u-1"), &form()).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .any(|r| matches!(r, Err(ServiceError::EmptyCart)))
        );
        assert_eq!(orders.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn orders_are_isolated_per_user() {
        let orders = Arc::new(FakeOrders::default());

        for user in ["alice", "bob"] {
            let cart = Arc::new(FakeCart::with_lines(vec![line("B1", "Dune", 1, 10.0)]));
            service(cart, orders.clone())
                .checkout(&caller(user), &form())
                .await
                .unwrap();
        }

        let alice = orders.find_by_user("alice").await.unwrap();
        assert_eq!(alice.len(), 1);
        assert!(alice.iter().all(|r| r.order.user_id == "alice"));
    }
}
