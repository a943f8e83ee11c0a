use std::sync::{Arc, Mutex};

use crate::models::FeatureFlags;
use crate::services::LinodeApiBackend;
use crate::wizard::CreateForm;

#[derive(Clone)]
pub struct AppState {
    pub api_base_url: String,
    pub api_token: String,
    pub client: reqwest::Client,
    pub flags: FeatureFlags,
    /// The create form served to the browser; `None` until the wizard is opened.
    pub form: Arc<Mutex<Option<CreateForm>>>,
}

impl AppState {
    pub fn new(api_base_url: String, api_token: String, flags: FeatureFlags) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!("lcm/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        AppState {
            api_base_url,
            api_token,
            client,
            flags,
            form: Arc::new(Mutex::new(None)),
        }
    }

    pub fn backend(&self) -> LinodeApiBackend {
        LinodeApiBackend {
            client: self.client.clone(),
            api_base_url: self.api_base_url.clone(),
            api_token: self.api_token.clone(),
        }
    }
}
