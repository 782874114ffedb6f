pub mod chat_box;
pub mod repl;
pub mod request;
pub mod scroll;
pub mod session;

pub use crate::domain::model::{AuthReply, ChatMessage, Credentials, Role};
pub use crate::domain::ports::{ChatBackend, ConfigProvider, ElementRegistry, Scrollable};
pub use crate::utils::error::Result;
