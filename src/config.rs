use std::env;

use crate::utils::email::EmailConfig;

/// Process-wide settings, read once at startup after `.env` is loaded.
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// `None` when no SMTP credentials are configured; mail is then logged instead of sent.
    pub email: Option<EmailConfig>,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| "PORT must be a valid number")?,
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "my_blog".to_string()),
            email: match env::var("SMTP_USERNAME") {
                Ok(_) => Some(EmailConfig::from_env()?),
                Err(_) => None,
            },
        })
    }
}

/// Name reported in every response envelope.
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| "my-blog".to_string())
}
