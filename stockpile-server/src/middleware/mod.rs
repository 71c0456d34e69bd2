mod auth;

pub use auth::{authenticate, Claims, TokenSigner};
