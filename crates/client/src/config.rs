/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the item service (default: `http://localhost:3001`).
    pub base_url: String,
}

impl ClientConfig {
    /// Read `ITEMS_API_URL`, falling back to the local development server.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("ITEMS_API_URL")
            .unwrap_or_else(|| "http://localhost:3001".into())
            .trim_end_matches('/')
            .to_string();
        Self { base_url }
    }
}
