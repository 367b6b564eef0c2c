mod database;
mod http_client;
mod jwt;
mod myconfig;
mod service_token;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::http_client::HttpClientConfig;
pub use self::jwt::{Claims, JwtConfig};
pub use self::myconfig::{CommonConfig, env_bool, env_or, env_required, parse_bool_flag};
pub use self::service_token::ServiceToken;
