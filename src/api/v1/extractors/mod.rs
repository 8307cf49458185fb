pub mod credentials;

pub use credentials::{BearerToken, SessionCookie};
