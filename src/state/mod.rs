pub(crate) mod optimistic;
pub(crate) mod request_guard;

use crate::api::ApiClient;
use crate::auth::{Credentials, Subscription};
use crate::config::EnvConfig;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: StoredValue<ApiClient>,

    /// Mirrors the stored token so views can react to it changing.
    pub token: RwSignal<Option<String>>,

    _token_subscription: StoredValue<Subscription>,
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        let credentials = Credentials::browser();
        let token = RwSignal::new(credentials.token());

        let subscription =
            credentials.subscribe(move |t| token.set(t.map(str::to_string)));

        Self {
            api_client: StoredValue::new(ApiClient::new(config.api_url.clone(), credentials)),
            token,
            _token_subscription: StoredValue::new(subscription),
        }
    }

    pub fn credentials(&self) -> Credentials {
        self.api_client.with_value(|c| c.credentials().clone())
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
