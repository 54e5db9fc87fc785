use crate::app::routes::HOME;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::state::AppContext;
use crate::storage::TOKEN_KEY;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::{set_timeout_with_handle, window_event_listener, TimeoutHandle};
use leptos_router::hooks::use_navigate;
use std::time::Duration;

const NOTICE_TTL: Duration = Duration::from_secs(3);

// Visible, so the field shows exactly what is stored.
const TOKEN_FIELD_TYPE: &str = "text";

/// Navbar box for pasting the bearer token used on every request.
#[component]
pub fn TokenBox() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let credentials = StoredValue::new(app_state.0.credentials());
    let token = app_state.0.token;
    let navigate = StoredValue::new(use_navigate());

    let draft: RwSignal<String> = RwSignal::new(token.get_untracked().unwrap_or_default());
    let notice: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let notice_timer: StoredValue<NoticeTimer<TimeoutHandle>> = StoredValue::new(NoticeTimer::default());

    // Follow the stored token when it changes elsewhere.
    Effect::new(move |_| {
        draft.set(token.get().unwrap_or_default());
    });

    // Another tab wrote localStorage. A `None` key means the whole store was cleared.
    let storage_handle = window_event_listener(ev::storage, move |e: web_sys::StorageEvent| {
        if e.key().map_or(true, |k| k == TOKEN_KEY) {
            credentials.with_value(|c| c.refresh());
        }
    });
    on_cleanup(move || storage_handle.remove());

    let flash = move |msg: &'static str| {
        notice.set(Some(msg));
        let hide = set_timeout_with_handle(move || notice.set(None), NOTICE_TTL).ok();
        notice_timer.update_value(|t| t.rearm(hide, |old| old.clear()));
    };
    on_cleanup(move || notice_timer.update_value(|t| t.cancel(|old| old.clear())));

    let on_save = move |_| {
        credentials.with_value(|c| c.save(&draft.get_untracked()));
        flash("Token saved.");
        navigate.with_value(|nav| nav(HOME, Default::default()));
    };

    let on_clear = move |_| {
        credentials.with_value(|c| c.clear());
        draft.set(String::new());
        flash("Token cleared.");
        navigate.with_value(|nav| nav(HOME, Default::default()));
    };

    view! {
        <div class="flex items-center gap-2">
            <Input
                class="h-8 w-56 text-xs"
                r#type=TOKEN_FIELD_TYPE
                placeholder="Paste bearer token"
                bind_value=draft
            />
            <Button size=ButtonSize::Sm on:click=on_save>"Save"</Button>
            <Button size=ButtonSize::Sm variant=ButtonVariant::Outline on:click=on_clear>
                "Clear"
            </Button>
            {move || notice.get().map(|msg| view! {
                <span class="text-xs text-muted-foreground" role="status">{msg}</span>
            })}
        </div>
    }
}

/// Pending "hide notice" timer. A newer notice cancels the older timer.
#[derive(Debug)]
struct NoticeTimer<H> {
    pending: Option<H>,
}

impl<H> Default for NoticeTimer<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> NoticeTimer<H> {
    fn rearm(&mut self, next: Option<H>, clear: impl FnOnce(H)) {
        self.cancel(clear);
        self.pending = next;
    }

    fn cancel(&mut self, clear: impl FnOnce(H)) {
        if let Some(old) = self.pending.take() {
            clear(old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_field_is_visible_text() {
        assert_eq!(TOKEN_FIELD_TYPE, "text");
    }

    #[test]
    fn test_new_notice_cancels_previous_timer() {
        let mut timer = NoticeTimer::default();
        let mut cleared = Vec::new();

        timer.rearm(Some(1), |h| cleared.push(h));
        assert!(cleared.is_empty());

        timer.rearm(Some(2), |h| cleared.push(h));
        assert_eq!(cleared, [1]);

        timer.cancel(|h| cleared.push(h));
        assert_eq!(cleared, [1, 2]);

        timer.cancel(|h| cleared.push(h));
        assert_eq!(cleared, [1, 2]);
    }
}
