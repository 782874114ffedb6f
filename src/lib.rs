pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ChatConfig;
pub use self::core::{
    request::{api_request, RequestHelper},
    scroll::{scroll_chat_box, scroll_to_bottom, CHAT_BOX_ID},
    session::ChatSession,
};
pub use utils::error::{ChatError, Result};
