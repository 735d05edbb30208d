//! Backend Config

use std::path::PathBuf;

use brewdesk_app::backend::RestConfig;
use clap::Args;

/// Backend settings.
#[derive(Debug, Args)]
pub(crate) struct BackendConfig {
    /// Backend project URL
    #[arg(long, env = "BREWDESK_BACKEND_URL")]
    pub backend_url: String,

    /// Backend public API key
    #[arg(long, env = "BREWDESK_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Directory the cart is kept in between runs
    #[arg(long, env = "BREWDESK_DATA_DIR", default_value = ".brewdesk")]
    pub data_dir: PathBuf,
}

impl BackendConfig {
    pub(crate) fn rest_config(&self) -> RestConfig {
        RestConfig {
            base_url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}
