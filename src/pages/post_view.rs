use crate::actions::{load_post, LoadError};
use crate::app::routes::{edit_path, PostRouteParams, HOME};
use crate::components::ui::{Alert, AlertTone, Button, ButtonVariant, LoadingRow};
use crate::models::Post;
use crate::state::request_guard::use_request_guard;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;

#[component]
pub fn PostViewPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<PostRouteParams>();

    // None while loading.
    let state: RwSignal<Option<Result<Post, LoadError>>> = RwSignal::new(None);
    let guard = use_request_guard();

    Effect::new(move |_| {
        let raw_id = params.get().ok().and_then(|p| p.id).unwrap_or_default();
        let ticket = guard.begin();
        let api = app_state.0.api_client.get_value();
        state.set(None);

        spawn_local(async move {
            let result = load_post(&api, &raw_id).await;
            if ticket.is_current() {
                state.set(Some(result));
            }
        });
    });

    move || match state.get() {
        None => view! { <LoadingRow /> }.into_any(),
        Some(Err(e)) => view! {
            <div class="space-y-4">
                <Alert tone=AlertTone::Danger>{e.to_string()}</Alert>
                <Button variant=ButtonVariant::Outline href=HOME>"Back to list"</Button>
            </div>
        }
        .into_any(),
        Some(Ok(post)) => view! { <PostDetail post=post /> }.into_any(),
    }
}

#[component]
fn PostDetail(post: Post) -> impl IntoView {
    let created = post.created_at.clone();
    let updated = post.updated_at.clone();

    view! {
        <article class="space-y-4">
            <div class="flex items-start justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold">{post.title}</h1>
                    <p class="text-xs text-muted-foreground">
                        {format!("#{}", post.id)}
                        {created.map(|c| format!(" · created {c}"))}
                        {updated.map(|u| format!(" · updated {u}"))}
                    </p>
                </div>
                <div class="flex gap-2">
                    <Button variant=ButtonVariant::Warning href=edit_path(post.id)>"Edit"</Button>
                    <Button variant=ButtonVariant::Outline href=HOME>"Back to list"</Button>
                </div>
            </div>
            <div class="whitespace-pre-wrap rounded-md border border-border bg-card p-4 text-sm leading-relaxed">
                {post.content}
            </div>
        </article>
    }
}
