use crate::{
    abstract_trait::cart::{CartQueryServiceTrait, DynCartQueryRepository},
    domain::response::CartResponse,
    service::CartResolver,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct CartQueryService {
    query: DynCartQueryRepository,
    resolver: CartResolver,
    tracer: OperationTracer,
}

impl CartQueryService {
    pub fn new(
        query: DynCartQueryRepository,
        resolver: CartResolver,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            resolver,
            tracer: OperationTracer::new("cart-query-service", registry),
        }
    }
}

#[async_trait]
impl CartQueryServiceTrait for CartQueryService {
    async fn get_cart(&self, user_id: &str) -> Result<CartResponse, ServiceError> {
        info!("🛒 Fetching cart for user {user_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "get_cart",
            vec![KeyValue::new("user_id", user_id.to_string())],
        );

        let result = match self.query.find_by_user(user_id).await {
            Ok(None) => Ok(CartResponse::empty()),
            Ok(Some(cart)) => self.resolver.resolve(cart.id).await.map_err(ServiceError::from),
            Err(e) => Err(ServiceError::from(e)),
        };

        match &result {
            Ok(cart) => self.tracer.complete_tracing_success(
                &tracing_ctx,
                Method::Get,
                &format!("Cart for user {user_id} has {} line(s)", cart.items.len()),
            ),
            Err(e) => self.tracer.complete_tracing_error(
                &tracing_ctx,
                Method::Get,
                &format!("Failed to fetch cart for user {user_id}: {e}"),
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{cart::MockCartQueryRepositoryTrait, catalog::MockCatalogClientTrait},
        domain::response::BookResponse,
        model::{Cart, CartItem},
    };
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;

    fn cart(user_id: &str) -> Cart {
        Cart {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(cart_id: Uuid, book_id: &str, quantity: i32) -> CartItem {
        CartItem {
            id: Uuid::new_v4(),
            cart_id,
            book_id: book_id.into(),
            quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(query: MockCartQueryRepositoryTrait, catalog: MockCatalogClientTrait) -> CartQueryService {
        let query = Arc::new(query);
        let resolver = CartResolver::new(query.clone(), Arc::new(catalog));
        CartQueryService::new(query, resolver, &mut Registry::default())
    }

    #[tokio::test]
    async fn no_cart_yields_empty_list() {
        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .once()
            .returning(|_| Ok(None));
        query.expect_find_items().never();

        let mut catalog = MockCatalogClientTrait::new();
        catalog.expect_find_book().never();

        let cart = service(query, catalog).get_cart("u-1").await.unwrap();

        assert!(cart.cart_id.is_none());
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn lines_are_priced_and_missing_books_kept() {
        let owned = cart("u-1");
        let cart_id = owned.id;
        let items = vec![item(cart_id, "b-1", 2), item(cart_id, "gone", 1)];

        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .withf(|user_id| user_id == "u-1")
            .return_once(move |_| Ok(Some(owned)));
        query
            .expect_find_items()
            .withf(move |id| *id == cart_id)
            .return_once(move |_| Ok(items));

        let mut catalog = MockCatalogClientTrait::new();
        catalog.expect_find_book().times(2).returning(|book_id| {
            (book_id == "b-1").then(|| {
                let mut book = BookResponse::missing("b-1");
                book.title = "Dune".into();
                book.price = Some(10.0);
                book
            })
        });

        let cart = service(query, catalog).get_cart("u-1").await.unwrap();

        assert_eq!(cart.cart_id, Some(cart_id));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].price, 20.0);
        assert_eq!(cart.items[1].price, 0.0);
        assert_eq!(cart.items[1].book.title, "Book not found");
    }
}
