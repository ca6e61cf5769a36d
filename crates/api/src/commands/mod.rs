//! Command handlers behind the `carbonwise` CLI

mod calculator;
mod session;

pub use calculator::*;
pub use session::*;
