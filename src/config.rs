// Runtime settings
// Read from the environment (after `dotenv`), falling back to defaults

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::auth::mock::DEFAULT_DELAY;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEV_JWT_SECRET: &str = "dev-secret-key";

/// Application settings
///
/// The server binary reads the storage, token and bind settings. The auth
/// provider settings are read by [`provider_from_settings`], which client
/// code uses to pick between the in-process mock and the remote API.
///
/// | Variable             | Default                     | Read by              |
/// |----------------------|-----------------------------|----------------------|
/// | `DASHBOARD_DATA_DIR` | `./data`                    | server               |
/// | `JWT_SECRET`         | development secret (warns)  | server, mock client  |
/// | `USE_MOCK_API`       | `true`                      | server, client       |
/// | `API_BASE_URL`       | `http://localhost:3000/api` | remote client        |
/// | `AUTH_DELAY_MS`      | `800`                       | mock client          |
/// | `BIND_ADDR`          | `0.0.0.0:3000`              | server               |
/// | `BCRYPT_COST`        | bcrypt default cost         | server, mock client  |
///
/// `USE_MOCK_API` makes the server seed the demo accounts.
///
/// [`provider_from_settings`]: crate::auth::provider_from_settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub use_mock_api: bool,
    pub api_base_url: String,
    pub auth_delay: Duration,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            use_mock_api: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_delay: DEFAULT_DELAY,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; unset or invalid values use defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            defaults.jwt_secret.clone()
        });

        Self {
            data_dir: lookup("DASHBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            jwt_secret,
            use_mock_api: parsed(&lookup, "USE_MOCK_API", defaults.use_mock_api),
            api_base_url: lookup("API_BASE_URL").unwrap_or(defaults.api_base_url),
            auth_delay: Duration::from_millis(parsed(
                &lookup,
                "AUTH_DELAY_MS",
                defaults.auth_delay.as_millis() as u64,
            )),
            bind_addr: parsed(&lookup, "BIND_ADDR", defaults.bind_addr),
            bcrypt_cost: parsed(&lookup, "BCRYPT_COST", defaults.bcrypt_cost),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid setting, using default");
            default
        }),
    }
}
