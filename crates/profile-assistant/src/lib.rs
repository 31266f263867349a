mod config;
mod conversation;
mod dialog;
mod dispatch;
mod error;
mod events;
mod fields;
mod intent;
mod runtime;
mod session;
mod store;
mod transcript;
mod types;
mod voice;

pub mod actors;
pub mod validate;

pub use actors::ConversationHandle;
pub use config::*;
pub use conversation::*;
pub use dialog::*;
pub use dispatch::*;
pub use error::*;
pub use events::*;
pub use fields::*;
pub use intent::*;
pub use runtime::*;
pub use session::*;
pub use store::*;
pub use transcript::*;
pub use types::*;
pub use voice::*;
