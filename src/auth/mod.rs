// Authentication: sessions, accounts, tokens and auth providers

pub mod directory;
pub mod errors;
pub mod jwt;
pub mod mock;
pub mod password;
pub mod provider;
pub mod remote;
pub mod session;

pub use directory::UserDirectory;
pub use errors::{AuthError, AuthResult, ErrorKind};
pub use jwt::TokenSigner;
pub use mock::MockAuthProvider;
pub use provider::{provider_from_settings, AuthProvider, AuthResponse};
pub use remote::HttpAuthProvider;
pub use session::SessionStore;
