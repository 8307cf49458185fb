pub mod factory;
pub mod identity;
pub mod session;
pub mod session_jwt;

pub use factory::build_session_service;
pub use identity::{IdentityResolver, ResolveError, UserProfile};
pub use session::SessionService;
pub use session_jwt::{SessionVerifier, TokenError};
