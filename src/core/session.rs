use crate::core::request::RequestHelper;
use crate::domain::model::{AuthReply, ChatReply, ChatRequest, Credentials};
use crate::domain::ports::{ChatBackend, ConfigProvider};
use crate::utils::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const CHAT_PATH: &str = "/api/chat";

/// Conversation with the chat server, carrying its session cookie between calls.
#[derive(Debug, Clone)]
pub struct ChatSession {
    requests: RequestHelper,
    username: Option<String>,
}

impl ChatSession {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        let requests = RequestHelper::with_client(client).with_base_url(base_url)?;

        Ok(Self {
            requests,
            username: None,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub async fn login(&mut self, credentials: &Credentials) -> Result<AuthReply> {
        tracing::info!("Logging in as {}", credentials.username);
        self.authenticate(LOGIN_PATH, credentials).await
    }

    pub async fn signup(&mut self, credentials: &Credentials) -> Result<AuthReply> {
        tracing::info!("Creating account {}", credentials.username);
        self.authenticate(SIGNUP_PATH, credentials).await
    }

    async fn authenticate(&mut self, path: &str, credentials: &Credentials) -> Result<AuthReply> {
        let reply: AuthReply = self.requests.api_request(path, credentials).await?;

        if !reply.success {
            let message = reply
                .message
                .unwrap_or_else(|| "Invalid credentials".to_string());
            tracing::warn!("{} rejected: {}", path, message);
            return Err(ChatError::AuthenticationError { message });
        }

        self.username = Some(credentials.username.clone());
        Ok(reply)
    }

    /// Sends one chat message and returns the assistant's reply text.
    ///
    /// Model failures arrive inside the reply as `"Error: ..."` and are returned unchanged.
    pub async fn send_message(&self, text: &str) -> Result<String> {
        let reply: ChatReply = self
            .requests
            .api_request(CHAT_PATH, &ChatRequest { message: text })
            .await?;
        Ok(reply.response)
    }
}

#[async_trait]
impl ChatBackend for ChatSession {
    async fn send_message(&self, text: &str) -> Result<String> {
        ChatSession::send_message(self, text).await
    }
}
