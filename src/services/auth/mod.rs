pub mod context;
pub mod identity;
pub mod token;

pub use context::IdentityContext;
pub use identity::Identity;
pub use token::{TokenAuthenticator, TokenError};
