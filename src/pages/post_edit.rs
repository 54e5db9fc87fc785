use super::go_back;
use crate::actions::{load_post, submit_update, LoadError};
use crate::app::routes::{PostRouteParams, HOME};
use crate::components::post_form::PostForm;
use crate::components::ui::{Alert, AlertTone, Button, ButtonVariant, DismissibleAlert, LoadingRow};
use crate::models::{FieldErrors, Post, PostPayload};
use crate::state::request_guard::use_request_guard;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;

const UPDATED: &str = "Post updated successfully.";

#[component]
pub fn PostEditPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<PostRouteParams>();

    let post: RwSignal<Option<Post>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let field_errors: RwSignal<FieldErrors> = RwSignal::new(FieldErrors::default());

    let load_guard = use_request_guard();
    let save_guard = use_request_guard();
    let stale_saves = save_guard.clone();

    Effect::new(move |_| {
        let raw_id = params.get().ok().and_then(|p| p.id).unwrap_or_default();
        let ticket = load_guard.begin();
        // A save still in flight belongs to the previous post.
        stale_saves.invalidate();
        let api = app_state.0.api_client.get_value();

        post.set(None);
        error.set(None);
        success.set(None);
        field_errors.set(FieldErrors::default());
        loading.set(true);

        spawn_local(async move {
            let result = load_post(&api, &raw_id).await;
            if !ticket.is_current() {
                return;
            }

            let (loaded, failure) = split_load(result);
            post.set(loaded);
            error.set(failure);
            loading.set(false);
        });
    });

    let on_submit = move |payload: PostPayload| {
        let id = post.with_untracked(|p| p.as_ref().map(|p| p.id));
        error.set(None);
        success.set(None);
        field_errors.set(FieldErrors::default());

        let ticket = save_guard.begin();
        let api = app_state.0.api_client.get_value();
        async move {
            let Some(id) = id else {
                return;
            };

            let result = submit_update(&api, id, &payload).await;
            if !ticket.is_current() {
                return;
            }

            match result {
                Ok(updated) => {
                    post.set(Some(updated));
                    success.set(Some(UPDATED));
                }
                Err(e) => {
                    log::warn!("update of post {id} rejected: {}", e.message);
                    error.set(Some(e.message));
                    field_errors.set(e.fields);
                }
            }
        }
    };

    // Stored so the form can be rebuilt each time the mode flips back to editing.
    let on_submit = StoredValue::new(on_submit);
    let mode = Memo::new(move |_| EditMode::of(loading.get(), post.with(Option::is_some)));

    view! {
        <div class="mx-auto max-w-2xl space-y-4">
            {move || match mode.get() {
                EditMode::Loading => view! { <LoadingRow /> }.into_any(),
                EditMode::Unavailable => view! {
                    <Alert tone=AlertTone::Danger>
                        {move || error.get().unwrap_or_default()}
                    </Alert>
                    <Button variant=ButtonVariant::Outline on:click=move |_| go_back()>
                        "Go back"
                    </Button>
                }
                .into_any(),
                EditMode::Editing => view! {
                    <div class="flex items-center justify-between">
                        <h1 class="text-xl font-semibold">"Edit Post"</h1>
                        <Button variant=ButtonVariant::Outline href=HOME>"Back to list"</Button>
                    </div>

                    {move || {
                        success.get().map(|msg| view! {
                            <DismissibleAlert tone=AlertTone::Success on_dismiss=move |_| success.set(None)>
                                {msg}
                            </DismissibleAlert>
                        })
                    }}
                    {move || {
                        error.get().map(|e| view! {
                            <DismissibleAlert tone=AlertTone::Danger on_dismiss=move |_| error.set(None)>
                                {e}
                            </DismissibleAlert>
                        })
                    }}

                    <PostForm
                        on_submit=on_submit.get_value()
                        initial=Signal::derive(move || post.get())
                        errors=Signal::derive(move || Some(field_errors.get()))
                        submit_label="Save changes"
                        on_cancel=Callback::new(move |_| go_back())
                    />
                }
                .into_any(),
            }}
        </div>
    }
}

/// What the edit page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EditMode {
    Loading,
    /// Load failed and there is no post to edit: error and "Go back", no form.
    Unavailable,
    Editing,
}

impl EditMode {
    fn of(loading: bool, has_post: bool) -> Self {
        match (loading, has_post) {
            (true, _) => Self::Loading,
            (false, false) => Self::Unavailable,
            (false, true) => Self::Editing,
        }
    }
}

/// Post to hold and error to show after a load.
fn split_load(result: Result<Post, LoadError>) -> (Option<Post>, Option<String>) {
    match result {
        Ok(p) => (Some(p), None),
        Err(e) => (None, Some(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::fake::FakeBackend;

    #[test]
    fn test_mode_while_loading() {
        assert_eq!(EditMode::of(true, false), EditMode::Loading);
        assert_eq!(EditMode::of(true, true), EditMode::Loading);
    }

    #[tokio::test]
    async fn test_not_found_shows_no_form() {
        let backend = FakeBackend::with_posts(&[(1, "Other", "x")]);

        let (held, failure) = split_load(load_post(&backend, "7").await);

        assert!(held.is_none());
        assert_eq!(failure.as_deref(), Some("Post not found."));
        assert_eq!(EditMode::of(false, held.is_some()), EditMode::Unavailable);
    }

    #[tokio::test]
    async fn test_invalid_id_shows_no_form() {
        let backend = FakeBackend::default();

        let (held, failure) = split_load(load_post(&backend, "abc").await);

        assert_eq!(backend.calls.get(), 0);
        assert_eq!(failure.as_deref(), Some("Invalid post id."));
        assert_eq!(EditMode::of(false, held.is_some()), EditMode::Unavailable);
    }

    #[tokio::test]
    async fn test_loaded_post_shows_form() {
        let backend = FakeBackend::with_posts(&[(7, "Hello", "world")]);

        let (held, failure) = split_load(load_post(&backend, "7").await);

        assert!(failure.is_none());
        assert_eq!(held.as_ref().map(|p| p.title.as_str()), Some("Hello"));
        assert_eq!(EditMode::of(false, held.is_some()), EditMode::Editing);
    }
}
