use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk client settings. Every section is optional; command line flags win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerSection>,
    pub account: Option<AccountSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSection {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    pub viewport_rows: Option<usize>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.server.as_ref()?.base_url.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.account.as_ref()?.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.account.as_ref()?.password.as_deref()
    }

    pub fn viewport_rows(&self) -> Option<usize> {
        self.display.as_ref()?.viewport_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ChatError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_file() {
        let config = FileConfig::from_str(
            r#"
[server]
base_url = "http://chat.local:8080"

[account]
username = "alice"
password = "s3cret"

[display]
viewport_rows = 12
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), Some("http://chat.local:8080"));
        assert_eq!(config.username(), Some("alice"));
        assert_eq!(config.password(), Some("s3cret"));
        assert_eq!(config.viewport_rows(), Some(12));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = FileConfig::from_str("[account]\nusername = \"bob\"\n").unwrap();
        assert_eq!(config.username(), Some("bob"));
        assert_eq!(config.password(), None);
        assert_eq!(config.base_url(), None);
        assert_eq!(config.viewport_rows(), None);

        assert_eq!(FileConfig::from_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbase_url = \"http://localhost:5000\"").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url(), Some("http://localhost:5000"));
    }

    #[test]
    fn test_malformed_and_missing_files() {
        assert!(matches!(
            FileConfig::from_str("[server\nbase_url = 1"),
            Err(ChatError::TomlError(_))
        ));
        assert!(matches!(
            FileConfig::from_file("/definitely/not/here.toml"),
            Err(ChatError::IoError(_))
        ));
    }
}
