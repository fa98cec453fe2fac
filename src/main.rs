use std::sync::Arc;

use storefront_dashboard::api::{self, AppState};
use storefront_dashboard::auth::{TokenSigner, UserDirectory};
use storefront_dashboard::config::Settings;
use storefront_dashboard::infrastructure::storage::FileStore;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let settings = Settings::from_env();

    // Open the data directory
    tracing::info!(data_dir = %settings.data_dir.display(), "Opening store...");
    let store = FileStore::open(&settings.data_dir).expect("Failed to open data directory");

    // Accounts are held in memory; demo mode seeds the two demo users
    let users = if settings.use_mock_api {
        tracing::warn!("Demo mode enabled: seeding demo accounts");
        UserDirectory::with_demo_users(settings.bcrypt_cost).expect("Failed to seed demo users")
    } else {
        UserDirectory::new(settings.bcrypt_cost)
    };

    let state = AppState::new(
        Arc::new(store),
        Arc::new(users),
        TokenSigner::new(&settings.jwt_secret),
    )
    .expect("Failed to initialize collections");

    let app = api::router(state);

    // Start server
    tracing::info!("Server listening on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
