pub(crate) const TOKEN_KEY: &str = "token";

pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub(crate) fn save_string(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("failed to write `{key}` to localStorage");
        }
    }
}

pub(crate) fn remove_key(key: &str) {
    if let Some(storage) = local_storage() {
        if storage.remove_item(key).is_err() {
            log::warn!("failed to remove `{key}` from localStorage");
        }
    }
}
