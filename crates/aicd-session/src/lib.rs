//! AICD Session Management
//!
//! The detection service correlates history with an opaque session token.
//! - The token is minted by the server and echoed back as `session_id`
//! - It is written to every storage scope so it survives whichever one the
//!   environment keeps around
//! - It is read back from the first scope that still has it
//! - It is erased everywhere once the server no longer recognises it

mod error;
mod store;
mod token;

pub use error::SessionError;
pub use store::{SessionStore, SESSION_STORAGE_KEY};
pub use token::SessionToken;

pub type Result<T> = std::result::Result<T, SessionError>;
