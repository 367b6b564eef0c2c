use crate::{
    abstract_trait::cart_client::{CartCaller, CartClientTrait},
    domain::response::CartResponse,
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{
    Client, Response, Url,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use serde_json::json;
use shared::{
    config::ServiceToken,
    errors::ServiceError,
    identity::{USER_EMAIL_HEADER, USER_ID_HEADER, USER_ROLE_HEADER},
    utils::inject_current_context,
};
use tracing::{info, warn};

pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";

#[derive(Debug, Default, Deserialize)]
struct UpstreamMessage {
    message: Option<String>,
}

/// Talks to the cart-service at `{base_url}/cart` and `{base_url}/cart/clear`.
#[derive(Debug, Clone)]
pub struct CartHttpClient {
    client: Client,
    cart_url: Url,
    clear_url: Url,
    service_token: ServiceToken,
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("CART_SERVICE_URL must be an http(s) URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn header_value(value: &str) -> Result<HeaderValue, ServiceError> {
    HeaderValue::from_str(value)
        .map_err(|_| ServiceError::Internal("identity is not a valid header value".into()))
}

async fn upstream_error(response: Response, fallback: &str) -> ServiceError {
    let status = response.status().as_u16();
    let message = response
        .json::<UpstreamMessage>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("{fallback} (status {status})"));

    ServiceError::Upstream {
        status: Some(status),
        message,
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    ServiceError::Upstream {
        status: None,
        message: err.to_string(),
    }
}

impl CartHttpClient {
    pub fn new(client: Client, base_url: &str, service_token: ServiceToken) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid CART_SERVICE_URL '{base_url}'"))?;

        Ok(Self {
            client,
            cart_url: join_segments(&base, &["cart"])?,
            clear_url: join_segments(&base, &["cart", "clear"])?,
            service_token,
        })
    }

    fn caller_headers(caller: &CartCaller) -> Result<HeaderMap, ServiceError> {
        let mut headers = HeaderMap::new();
        inject_current_context(&mut headers);

        match caller {
            CartCaller::Forwarded(user) => {
                headers.insert(USER_ID_HEADER, header_value(&user.user_id)?);
                headers.insert(USER_ROLE_HEADER, header_value(&user.role)?);
                headers.insert(USER_EMAIL_HEADER, header_value(&user.email)?);
            }
            CartCaller::Bearer { authorization, .. } => {
                let mut value = header_value(authorization)?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }
}

#[async_trait]
impl CartClientTrait for CartHttpClient {
    async fn get_cart(&self, caller: &CartCaller) -> Result<CartResponse, ServiceError> {
        let headers = Self::caller_headers(caller)?;

        info!("📡 GET {} for user {}", self.cart_url, caller.user_id());

        let response = self
            .client
            .get(self.cart_url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                warn!("⚠️ Cart-service unreachable: {e}");
                transport_error(e)
            })?;

        if !response.status().is_success() {
            let err = upstream_error(response, "Error fetching cart from Cart Service").await;
            warn!("⚠️ Cart-service rejected cart read: {err}");
            return Err(err);
        }

        response.json::<CartResponse>().await.map_err(|e| {
            warn!("⚠️ Unreadable cart payload: {e}");
            ServiceError::Upstream {
                status: None,
                message: format!("Invalid cart payload: {e}"),
            }
        })
    }

    async fn clear_cart(&self, user_id: &str) -> Result<(), ServiceError> {
        let mut headers = HeaderMap::new();
        inject_current_context(&mut headers);

        let mut token = HeaderValue::from_str(self.service_token.expose())
            .map_err(|_| ServiceError::Internal("service token is not a valid header value".into()))?;
        token.set_sensitive(true);
        headers.insert(SERVICE_TOKEN_HEADER, token);

        info!("📡 DELETE {} for user {user_id}", self.clear_url);

        let response = self
            .client
            .delete(self.clear_url.clone())
            .headers(headers)
            .json(&json!({ "userId": user_id }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Error clearing cart in Cart Service").await);
        }

        Ok(())
    }
}
