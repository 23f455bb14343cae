use std::fs::read_to_string;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use toml::from_str;
use url::Url;

/// Operator settings for the relay.
///
/// Every field has a default, so a partial file only overrides what it names and the relay also runs without any file at all.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Send endpoint of the email provider.
    pub endpoint: Url,
    /// Mailbox used as `from`, e.g. `Site Contact <contact@example.com>`.
    pub sender: String,
    /// Inbox receiving every submission.
    pub recipient: String,
    /// Name shown in the email header and footer.
    pub brand: String,
    pub site_url: Url,
}

impl Config {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let val = from_str(&read_to_string(path)?)?;

        Ok(val)
    }

    pub fn site_host(&self) -> &str {
        self.site_url.host_str().unwrap_or_else(|| self.site_url.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("https://api.resend.com/emails").unwrap(),
            sender: "MELIOZ Contact <contact@agencemelioz.com>".to_owned(),
            recipient: "contact@agencemelioz.com".to_owned(),
            brand: "MELIOZ".to_owned(),
            site_url: Url::parse("https://agencemelioz.com").unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = from_str::<Config>(
            r#"
            recipient = "inbox@example.org"
            site_url = "https://www.example.org/contact"
            "#,
        )
        .unwrap();

        assert_eq!(config.recipient, "inbox@example.org");
        assert_eq!(config.site_host(), "www.example.org");

        assert_eq!(config.endpoint.as_str(), "https://api.resend.com/emails");
        assert_eq!(config.sender, "MELIOZ Contact <contact@agencemelioz.com>");
        assert_eq!(config.brand, "MELIOZ");
    }

    #[test]
    fn reject_unknown_keys_and_invalid_urls() {
        from_str::<Config>(r#"recipients = ["a@example.org"]"#).unwrap_err();

        from_str::<Config>(r#"endpoint = "not a url""#).unwrap_err();
    }
}
