use crate::storage::{load_string, remove_key, save_string, TOKEN_KEY};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Where the bearer token lives between page loads.
pub(crate) trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` under [`TOKEN_KEY`].
pub(crate) struct LocalStorageCredentials;

impl CredentialStore for LocalStorageCredentials {
    fn load(&self) -> Option<String> {
        load_string(TOKEN_KEY)
    }

    fn save(&self, token: &str) {
        save_string(TOKEN_KEY, token);
    }

    fn clear(&self) {
        remove_key(TOKEN_KEY);
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryCredentials {
    /// Simulates another tab writing the token behind our back.
    pub fn set_external(&self, token: Option<&str>) {
        if let Ok(mut t) = self.token.lock() {
            *t = token.map(str::to_string);
        }
    }
}

#[cfg(test)]
impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        self.set_external(Some(token));
    }

    fn clear(&self) {
        self.set_external(None);
    }
}

type Listener = Arc<dyn Fn(Option<&str>) + Send + Sync>;
type Listeners = Mutex<Vec<(u64, Listener)>>;

/// Token provider shared by the transport client and the shell.
///
/// Reads go straight to the store on every call, so a token written by another
/// tab is picked up by the next request even before anyone calls [`refresh`].
///
/// [`refresh`]: Credentials::refresh
#[derive(Clone)]
pub(crate) struct Credentials {
    store: Arc<dyn CredentialStore>,
    listeners: Arc<Listeners>,
    next_listener_id: Arc<AtomicU64>,
}

impl Credentials {
    pub fn new(store: impl CredentialStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn browser() -> Self {
        Self::new(LocalStorageCredentials)
    }

    /// Current token; blank values count as no token.
    pub fn token(&self) -> Option<String> {
        self.store
            .load()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn save(&self, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            self.clear();
            return;
        }
        self.store.save(token);
        log::info!("api token saved");
        self.notify(Some(token));
    }

    pub fn clear(&self) {
        self.store.clear();
        log::info!("api token cleared");
        self.notify(None);
    }

    /// Re-announce the stored token after it changed outside this context.
    pub fn refresh(&self) {
        let token = self.token();
        self.notify(token.as_deref());
    }

    /// Registers `f` for token changes until the returned handle is dropped.
    pub fn subscribe(&self, f: impl Fn(Option<&str>) + Send + Sync + 'static) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener = Arc::new(f);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, listener));
        }
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    fn notify(&self, token: Option<&str>) {
        // Call outside the lock so a listener may subscribe or unsubscribe.
        let listeners: Vec<Listener> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(token);
        }
    }
}

pub(crate) struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<Option<String>>>>, impl Fn(Option<&str>) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let f = move |t: Option<&str>| sink.lock().unwrap().push(t.map(str::to_string));
        (seen, f)
    }

    #[test]
    fn test_token_absent_by_default() {
        let creds = Credentials::new(MemoryCredentials::default());
        assert!(creds.token().is_none());
    }

    #[test]
    fn test_save_trims_and_clear_removes() {
        let creds = Credentials::new(MemoryCredentials::default());
        creds.save("  xyz \n");
        assert_eq!(creds.token().as_deref(), Some("xyz"));

        creds.clear();
        assert!(creds.token().is_none());
    }

    #[test]
    fn test_saving_blank_token_clears() {
        let creds = Credentials::new(MemoryCredentials::default());
        creds.save("abc");
        creds.save("   ");
        assert!(creds.token().is_none());
    }

    #[test]
    fn test_subscribers_see_save_and_clear() {
        let creds = Credentials::new(MemoryCredentials::default());
        let (seen, f) = recorder();
        let _sub = creds.subscribe(f);

        creds.save("t1");
        creds.clear();

        assert_eq!(*seen.lock().unwrap(), vec![Some("t1".to_string()), None]);
    }

    #[test]
    fn test_dropping_subscription_stops_notifications() {
        let creds = Credentials::new(MemoryCredentials::default());
        let (seen, f) = recorder();
        let sub = creds.subscribe(f);

        creds.save("t1");
        drop(sub);
        creds.save("t2");

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_clones_share_listeners() {
        let creds = Credentials::new(MemoryCredentials::default());
        let (seen, f) = recorder();
        let _sub = creds.subscribe(f);

        creds.clone().save("from-clone");

        assert_eq!(*seen.lock().unwrap(), vec![Some("from-clone".to_string())]);
    }

    #[test]
    fn test_refresh_announces_external_write() {
        let store = Arc::new(MemoryCredentials::default());
        let creds = Credentials {
            store: store.clone(),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: Arc::new(AtomicU64::new(1)),
        };
        let (seen, f) = recorder();
        let _sub = creds.subscribe(f);

        store.set_external(Some("other-tab"));
        assert_eq!(creds.token().as_deref(), Some("other-tab"));

        creds.refresh();
        assert_eq!(*seen.lock().unwrap(), vec![Some("other-tab".to_string())]);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_token_roundtrip() {
        let creds = Credentials::browser();
        creds.clear();
        assert!(creds.token().is_none());

        creds.save("t1");
        assert_eq!(load_string(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(Credentials::browser().token().as_deref(), Some("t1"));

        creds.clear();
        assert!(load_string(TOKEN_KEY).is_none());
    }
}
