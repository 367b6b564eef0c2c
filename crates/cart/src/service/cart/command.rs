use crate::{
    abstract_trait::{
        cart::{
            CartCommandServiceTrait, DecrementOutcome, DynCartCommandRepository,
            DynCartQueryRepository,
        },
        catalog::DynCatalogClient,
    },
    domain::response::CartResponse,
    service::CartResolver,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    config::ServiceToken,
    domain::MessageResponse,
    errors::ServiceError,
    utils::{Method, OperationTracer, TracingContext},
};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct CartCommandService {
    query: DynCartQueryRepository,
    command: DynCartCommandRepository,
    catalog: DynCatalogClient,
    resolver: CartResolver,
    service_token: ServiceToken,
    tracer: OperationTracer,
}

pub struct CartCommandServiceDeps {
    pub query: DynCartQueryRepository,
    pub command: DynCartCommandRepository,
    pub catalog: DynCatalogClient,
    pub resolver: CartResolver,
    pub service_token: ServiceToken,
}

impl CartCommandService {
    pub fn new(deps: CartCommandServiceDeps, registry: &mut Registry) -> Self {
        let CartCommandServiceDeps {
            query,
            command,
            catalog,
            resolver,
            service_token,
        } = deps;

        Self {
            query,
            command,
            catalog,
            resolver,
            service_token,
            tracer: OperationTracer::new("cart-command-service", registry),
        }
    }

    fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        success: impl FnOnce(&T) -> String,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(value) => {
                self.tracer
                    .complete_tracing_success(tracing_ctx, method, &success(value))
            }
            Err(e) => self
                .tracer
                .complete_tracing_error(tracing_ctx, method, &e.to_string()),
        }
        result
    }

    async fn add_one_inner(&self, user_id: &str, book_id: &str) -> Result<CartResponse, ServiceError> {
        if book_id.is_empty() {
            return Err(ServiceError::validation("Book ID is required"));
        }

        if self.catalog.find_book(book_id).await.is_none() {
            return Err(ServiceError::not_found("Book does not exist"));
        }

        let cart = self.command.get_or_create(user_id).await?;
        self.command.increment_item(cart.id, book_id).await?;

        Ok(self.resolver.resolve(cart.id).await?)
    }

    async fn remove_one_inner(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> Result<CartResponse, ServiceError> {
        let cart = self
            .query
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cart not found"))?;

        match self.command.decrement_item(cart.id, book_id).await? {
            DecrementOutcome::NotInCart => return Err(ServiceError::not_found("Item not in cart")),
            DecrementOutcome::Removed => info!("🗑️ Line for book {book_id} removed from cart {}", cart.id),
            DecrementOutcome::Decremented(item) => {
                info!("➖ Book {book_id} quantity now {}", item.quantity)
            }
        }

        Ok(self.resolver.resolve(cart.id).await?)
    }

    async fn remove_line_inner(&self, item_id: Uuid) -> Result<CartResponse, ServiceError> {
        let item = self
            .command
            .delete_item(item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item not found"))?;

        Ok(self.resolver.resolve(item.cart_id).await?)
    }

    async fn clear_all_inner(
        &self,
        user_id: &str,
        credential: Option<String>,
    ) -> Result<MessageResponse, ServiceError> {
        let authorized = credential
            .as_deref()
            .is_some_and(|candidate| self.service_token.matches(candidate));

        if !authorized {
            warn!("⛔ Rejected cart clear for user {user_id}: invalid service token");
            return Err(ServiceError::Forbidden(
                "Forbidden: invalid service token".into(),
            ));
        }

        if user_id.is_empty() {
            return Err(ServiceError::validation("userId is required to clear cart"));
        }

        let cart = self
            .query
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cart not found"))?;

        self.command.clear(cart.id).await?;

        Ok(MessageResponse::new("Cart cleared successfully"))
    }
}

#[async_trait]
impl CartCommandServiceTrait for CartCommandService {
    async fn add_one(&self, user_id: &str, book_id: &str) -> Result<CartResponse, ServiceError> {
        info!("➕ Adding book {book_id} to cart of user {user_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "add_one",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("book_id", book_id.to_string()),
            ],
        );

        let result = self.add_one_inner(user_id, book_id).await;
        self.finish(&tracing_ctx, Method::Post, result, |cart| {
            format!("Added book {book_id}; cart has {} line(s)", cart.items.len())
        })
    }

    async fn remove_one(&self, user_id: &str, book_id: &str) -> Result<CartResponse, ServiceError> {
        info!("➖ Removing one of book {book_id} from cart of user {user_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "remove_one",
            vec![
                KeyValue::new("user_id", user_id.to_string()),
                KeyValue::new("book_id", book_id.to_string()),
            ],
        );

        let result = self.remove_one_inner(user_id, book_id).await;
        self.finish(&tracing_ctx, Method::Post, result, |cart| {
            format!("Removed one of book {book_id}; cart has {} line(s)", cart.items.len())
        })
    }

    async fn remove_line(&self, item_id: Uuid) -> Result<CartResponse, ServiceError> {
        info!("🗑️ Deleting cart line {item_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "remove_line",
            vec![KeyValue::new("item_id", item_id.to_string())],
        );

        let result = self.remove_line_inner(item_id).await;
        self.finish(&tracing_ctx, Method::Delete, result, |_| {
            format!("Deleted cart line {item_id}")
        })
    }

    async fn clear_all(
        &self,
        user_id: &str,
        credential: Option<String>,
    ) -> Result<MessageResponse, ServiceError> {
        info!("🧹 Clearing cart of user {user_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "clear_all",
            vec![KeyValue::new("user_id", user_id.to_string())],
        );

        let result = self.clear_all_inner(user_id, credential).await;
        self.finish(&tracing_ctx, Method::Delete, result, |_| {
            format!("Cleared cart of user {user_id}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            cart::{MockCartCommandRepositoryTrait, MockCartQueryRepositoryTrait},
            catalog::MockCatalogClientTrait,
        },
        domain::response::BookResponse,
        model::{Cart, CartItem},
    };
    use chrono::Utc;
    use shared::errors::RepositoryError;
    use std::sync::Arc;

    const TOKEN: &str = "svc-secret";

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

    fn priced_book(id: &str, price: f64) -> BookResponse {
        let mut book = BookResponse::missing(id);
        book.title = format!("Title {id}");
        book.price = Some(price);
        book
    }

    fn service(
        query: MockCartQueryRepositoryTrait,
        command: MockCartCommandRepositoryTrait,
        catalog: MockCatalogClientTrait,
    ) -> CartCommandService {
        let query: DynCartQueryRepository = Arc::new(query);
        let catalog: DynCatalogClient = Arc::new(catalog);
        let resolver = CartResolver::new(query.clone(), catalog.clone());

        CartCommandService::new(
            CartCommandServiceDeps {
                query,
                command: Arc::new(command),
                catalog,
                resolver,
                service_token: ServiceToken::new(TOKEN),
            },
            &mut Registry::default(),
        )
    }

    #[tokio::test]
    async fn add_one_requires_book_id() {
        let mut catalog = MockCatalogClientTrait::new();
        catalog.expect_find_book().never();

        let err = service(
            MockCartQueryRepositoryTrait::new(),
            MockCartCommandRepositoryTrait::new(),
            catalog,
        )
        .add_one("u-1", "")
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(ref m) if m[0] == "Book ID is required"));
    }

    #[tokio::test]
    async fn add_one_looks_up_book_id_verbatim() {
        let mut catalog = MockCatalogClientTrait::new();
        catalog
            .expect_find_book()
            .withf(|id| id == " b-1 ")
            .once()
            .returning(|_| None);

        let mut command = MockCartCommandRepositoryTrait::new();
        command.expect_get_or_create().never();

        let err = service(MockCartQueryRepositoryTrait::new(), command, catalog)
            .add_one("u-1", " b-1 ")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Book does not exist"));
    }

    #[tokio::test]
    async fn add_one_rejects_unknown_book_without_touching_cart() {
        let mut catalog = MockCatalogClientTrait::new();
        catalog.expect_find_book().once().returning(|_| None);

        let mut command = MockCartCommandRepositoryTrait::new();
        command.expect_get_or_create().never();
        command.expect_increment_item().never();

        let err = service(MockCartQueryRepositoryTrait::new(), command, catalog)
            .add_one("u-1", "nope")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Book does not exist"));
    }

    #[tokio::test]
    async fn add_one_creates_cart_and_increments() {
        let owned = cart("u-1");
        let cart_id = owned.id;
        let line = item(cart_id, "b-1", 1);
        let listed = vec![line.clone()];

        let mut catalog = MockCatalogClientTrait::new();
        catalog
            .expect_find_book()
            .times(2)
            .returning(|id| Some(priced_book(id, 7.5)));

        let mut command = MockCartCommandRepositoryTrait::new();
        command
            .expect_get_or_create()
            .withf(|user_id| user_id == "u-1")
            .return_once(move |_| Ok(owned));
        command
            .expect_increment_item()
            .withf(move |id, book_id| *id == cart_id && book_id == "b-1")
            .return_once(move |_, _| Ok(line));

        let mut query = MockCartQueryRepositoryTrait::new();
        query.expect_find_items().return_once(move |_| Ok(listed));

        let cart = service(query, command, catalog)
            .add_one("u-1", "b-1")
            .await
            .unwrap();

        assert_eq!(cart.cart_id, Some(cart_id));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].price, 7.5);
    }

    #[tokio::test]
    async fn remove_one_without_cart_is_not_found() {
        let mut query = MockCartQueryRepositoryTrait::new();
        query.expect_find_by_user().return_once(|_| Ok(None));

        let err = service(
            query,
            MockCartCommandRepositoryTrait::new(),
            MockCatalogClientTrait::new(),
        )
        .remove_one("u-1", "b-1")
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Cart not found"));
    }

    #[tokio::test]
    async fn remove_one_of_absent_line_is_not_found() {
        let owned = cart("u-1");

        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .return_once(move |_| Ok(Some(owned)));

        let mut command = MockCartCommandRepositoryTrait::new();
        command
            .expect_decrement_item()
            .return_once(|_, _| Ok(DecrementOutcome::NotInCart));

        let err = service(query, command, MockCatalogClientTrait::new())
            .remove_one("u-1", "b-9")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Item not in cart"));
    }

    #[tokio::test]
    async fn remove_one_to_zero_drops_line() {
        let owned = cart("u-1");

        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .return_once(move |_| Ok(Some(owned)));
        query.expect_find_items().return_once(|_| Ok(vec![]));

        let mut command = MockCartCommandRepositoryTrait::new();
        command
            .expect_decrement_item()
            .return_once(|_, _| Ok(DecrementOutcome::Removed));

        let cart = service(query, command, MockCatalogClientTrait::new())
            .remove_one("u-1", "b-1")
            .await
            .unwrap();

        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn remove_line_returns_parent_cart() {
        let cart_id = Uuid::new_v4();
        let deleted = item(cart_id, "b-1", 3);
        let deleted_id = deleted.id;
        let remaining = vec![item(cart_id, "b-2", 1)];

        let mut command = MockCartCommandRepositoryTrait::new();
        command
            .expect_delete_item()
            .withf(move |id| *id == deleted_id)
            .return_once(move |_| Ok(Some(deleted)));

        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_items()
            .withf(move |id| *id == cart_id)
            .return_once(move |_| Ok(remaining));

        let mut catalog = MockCatalogClientTrait::new();
        catalog
            .expect_find_book()
            .returning(|id| Some(priced_book(id, 4.0)));

        let cart = service(query, command, catalog)
            .remove_line(deleted_id)
            .await
            .unwrap();

        assert_eq!(cart.cart_id, Some(cart_id));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].book.id, "b-2");
    }

    #[tokio::test]
    async fn remove_line_unknown_is_not_found() {
        let mut command = MockCartCommandRepositoryTrait::new();
        command.expect_delete_item().return_once(|_| Ok(None));

        let err = service(
            MockCartQueryRepositoryTrait::new(),
            command,
            MockCatalogClientTrait::new(),
        )
        .remove_line(Uuid::new_v4())
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Item not found"));
    }

    #[tokio::test]
    async fn clear_all_rejects_wrong_or_missing_token() {
        for credential in [None, Some("wrong".to_string()), Some(String::new())] {
            let mut query = MockCartQueryRepositoryTrait::new();
            query.expect_find_by_user().never();
            let mut command = MockCartCommandRepositoryTrait::new();
            command.expect_clear().never();

            let err = service(query, command, MockCatalogClientTrait::new())
                .clear_all("u-1", credential)
                .await
                .unwrap_err();

            assert!(matches!(err, ServiceError::Forbidden(_)));
        }
    }

    #[tokio::test]
    async fn clear_all_requires_user_id() {
        let err = service(
            MockCartQueryRepositoryTrait::new(),
            MockCartCommandRepositoryTrait::new(),
            MockCatalogClientTrait::new(),
        )
        .clear_all("", Some(TOKEN.into()))
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn clear_all_missing_cart_is_not_found() {
        let mut query = MockCartQueryRepositoryTrait::new();
        query.expect_find_by_user().return_once(|_| Ok(None));

        let err = service(
            query,
            MockCartCommandRepositoryTrait::new(),
            MockCatalogClientTrait::new(),
        )
        .clear_all("u-1", Some(TOKEN.into()))
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Cart not found"));
    }

    #[tokio::test]
    async fn clear_all_deletes_every_line() {
        let owned = cart("u-1");
        let cart_id = owned.id;

        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .withf(|user_id| user_id == "u-1")
            .return_once(move |_| Ok(Some(owned)));

        let mut command = MockCartCommandRepositoryTrait::new();
        command
            .expect_clear()
            .withf(move |id| *id == cart_id)
            .once()
            .return_once(|_| Ok(3));

        let message = service(query, command, MockCatalogClientTrait::new())
            .clear_all("u-1", Some(TOKEN.into()))
            .await
            .unwrap();

        assert_eq!(message.message, "Cart cleared successfully");
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_repository_error() {
        let mut query = MockCartQueryRepositoryTrait::new();
        query
            .expect_find_by_user()
            .return_once(|_| Err(RepositoryError::Custom("db down".into())));

        let err = service(
            query,
            MockCartCommandRepositoryTrait::new(),
            MockCatalogClientTrait::new(),
        )
        .remove_one("u-1", "b-1")
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::Repo(_)));
    }
}
