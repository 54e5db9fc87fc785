use super::go_back;
use crate::actions::submit_create;
use crate::components::post_form::PostForm;
use crate::components::ui::{AlertTone, DismissibleAlert};
use crate::models::{FieldErrors, PostPayload};
use crate::state::request_guard::use_request_guard;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn PostCreatePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let field_errors: RwSignal<FieldErrors> = RwSignal::new(FieldErrors::default());
    let guard = use_request_guard();

    let on_submit = move |payload: PostPayload| {
        error.set(None);
        field_errors.set(FieldErrors::default());

        let ticket = guard.begin();
        let api = app_state.0.api_client.get_value();
        async move {
            let result = submit_create(&api, &payload).await;
            if !ticket.is_current() {
                return;
            }

            match result {
                Ok(dest) => navigate.with_value(|nav| nav(&dest, Default::default())),
                Err(e) => {
                    log::warn!("create rejected: {}", e.message);
                    error.set(Some(e.message));
                    field_errors.set(e.fields);
                }
            }
        }
    };

    view! {
        <div class="mx-auto max-w-2xl space-y-4">
            <h1 class="text-xl font-semibold">"Create Post"</h1>

            {move || {
                error.get().map(|e| view! {
                    <DismissibleAlert tone=AlertTone::Danger on_dismiss=move |_| error.set(None)>
                        {e}
                    </DismissibleAlert>
                })
            }}

            <PostForm
                on_submit=on_submit
                errors=Signal::derive(move || Some(field_errors.get()))
                submit_label="Create"
                pending_label="Creating…"
                on_cancel=Callback::new(move |_| go_back())
            />
        </div>
    }
}
