use serde::Deserialize;

/// Main configuration structure for Release-Check
///
/// Every table is optional; a missing table takes the python.org defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// The release site under test
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Root URL of the site hosting the release pages
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Host the changelog link must point at
    #[serde(rename = "docs-host", default = "default_docs_host")]
    pub docs_host: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            docs_host: default_docs_host(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Version sent in the User-Agent header
    #[serde(default = "default_agent_version")]
    pub version: String,

    /// URL with information about the checker
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
            contact_url: default_contact_url(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds; the client default (none) when absent
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://www.python.org".to_string()
}

fn default_docs_host() -> String {
    "docs.python.org".to_string()
}

fn default_agent_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/python/pythondotorg".to_string()
}
