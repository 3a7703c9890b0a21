// ── Runtime connection configuration ──
//
// Describes *how* to reach a dashboard and where to keep local state.
// The CLI resolves profiles into a `DashboardConfig` and hands it in;
// core never reads config files.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-hosted dashboards with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for one dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API base URL (e.g. `https://nav.example.com/api`).
    pub api_base: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Where persisted store state lives. `None` keeps state in memory only.
    pub state_dir: Option<PathBuf>,
}

impl DashboardConfig {
    pub fn new(api_base: Url) -> Self {
        Self {
            api_base,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            state_dir: None,
        }
    }
}
