use crate::domain::response::CartResponse;
use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use mockall::automock;
use shared::{domain::UserContext, errors::ServiceError, identity::USER_ID_HEADER};
use std::{fmt, sync::Arc};

pub type DynCartClient = Arc<dyn CartClientTrait + Send + Sync>;

/// How the checkout caller is presented to the cart-service.
#[derive(Clone, PartialEq)]
pub enum CartCaller {
    /// Identity sent as `x-user-*` headers.
    Forwarded(UserContext),
    /// The caller's own `Authorization` header, passed through verbatim.
    Bearer {
        user_id: String,
        authorization: String,
    },
}

impl CartCaller {
    /// Forwarded headers win over the bearer header, matching the order
    /// in which the identity chain resolved the caller. A caller identified
    /// only by cookie is forwarded as a verified identity.
    pub fn from_request(user: &UserContext, headers: &HeaderMap) -> Self {
        if headers.contains_key(USER_ID_HEADER) {
            return CartCaller::Forwarded(user.clone());
        }

        match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(authorization) => CartCaller::Bearer {
                user_id: user.user_id.clone(),
                authorization: authorization.to_string(),
            },
            None => CartCaller::Forwarded(user.clone()),
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            CartCaller::Forwarded(user) => &user.user_id,
            CartCaller::Bearer { user_id, .. } => user_id,
        }
    }
}

impl fmt::Debug for CartCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartCaller::Forwarded(user) => f.debug_tuple("Forwarded").field(user).finish(),
            CartCaller::Bearer { user_id, .. } => f
                .debug_struct("Bearer")
                .field("user_id", user_id)
                .field("authorization", &"***")
                .finish(),
        }
    }
}

#[automock]
#[async_trait]
pub trait CartClientTrait {
    async fn get_cart(&self, caller: &CartCaller) -> Result<CartResponse, ServiceError>;
    /// Privileged clear, authenticated with the shared service token.
    async fn clear_cart(&self, user_id: &str) -> Result<(), ServiceError>;
}
