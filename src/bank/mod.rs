//! Banking module for a single account, the commands that drive it, and the session that owns it.
mod account;
mod command;
mod session;
mod types;

pub use account::*;
pub use command::*;
pub use session::*;
pub use types::*;
