use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub credentials: Credentials,
    pub form_id: Option<u64>,
    pub connect_timeout: Duration,
    pub log_level: String,
}

/// The service uses two different credentials: an administrative token for
/// creating forms, and a per-form key for reading its submissions.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub admin_token: Option<String>,
    pub form_key: Option<String>,
}

impl Credentials {
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn form_key(&self) -> Option<&str> {
        self.form_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_base = env_or("FORMS_API_BASE", DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let credentials = Credentials {
            admin_token: lookup("FORMS_ADMIN_TOKEN"),
            form_key: lookup("FORMS_API_KEY"),
        };

        let form_id = match lookup("FORMS_FORM_ID").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|e| format!("Invalid FORMS_FORM_ID: {e}"))?,
            ),
            None => None,
        };

        let connect_timeout: u64 = env_or("FORMS_CONNECT_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid FORMS_CONNECT_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("FORMS_LOG_LEVEL", "info");

        Ok(Config {
            api_base,
            credentials,
            form_id,
            connect_timeout: Duration::from_secs(connect_timeout),
            log_level,
        })
    }
}
