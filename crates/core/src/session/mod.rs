//! Signed-in session state
//!
//! [`SessionContext`] is the single owner of "who is signed in". It is
//! passed explicitly to whatever needs a token instead of being read from
//! ambient storage.

pub mod context;
pub mod memory;
pub mod ports;

pub use context::SessionContext;
pub use memory::InMemorySessionStore;
pub use ports::{AccessTokenProvider, AuthGateway, SessionStore};
