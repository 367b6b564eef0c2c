use anyhow::{Context, Result};
use shared::config::{CommonConfig, env_bool, env_or};

#[derive(Debug, Clone)]
pub struct Config {
    pub common: CommonConfig,
    /// Base of the cart-service API, e.g. `http://cart-service:3001/api`.
    pub cart_service_url: String,
    pub checkout_user_lock: bool,
    /// Gate `/api/orders/all` and status updates behind the `admin` role.
    pub admin_require_role: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let common = CommonConfig::init().context("Failed to load common configuration")?;

        let cart_service_url =
            env_or("CART_SERVICE_URL", "http://localhost:3001/api".to_string())?;
        let checkout_user_lock = env_bool("CHECKOUT_USER_LOCK", true)?;
        let admin_require_role = env_bool("ADMIN_REQUIRE_ROLE", false)?;

        Ok(Self {
            common,
            cart_service_url,
            checkout_user_lock,
            admin_require_role,
        })
    }
}
