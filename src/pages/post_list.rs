use crate::actions::{delete_post, load_posts};
use crate::app::routes::{edit_path, post_path, CREATE};
use crate::components::ui::{
    Alert, AlertTone, Button, ButtonSize, ButtonVariant, DismissibleAlert, LoadingRow, Table,
    TableBody, TableCell, TableHead, TableHeader, TableRow, TableWrapper,
};
use crate::models::{Post, PostId};
use crate::state::optimistic::{remove_post, Optimistic};
use crate::state::request_guard::{use_request_guard, RequestGuard};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::collections::BTreeSet;

#[component]
pub fn PostListPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let posts: RwSignal<Vec<Post>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    // Rows with a delete in flight. Deletes are not serialized, so this is a set.
    let deleting: RwSignal<BTreeSet<PostId>> = RwSignal::new(BTreeSet::new());
    let delete_error: RwSignal<Option<String>> = RwSignal::new(None);

    let load_guard = use_request_guard();
    let delete_guard = use_request_guard();

    // Bumped whenever a load replaces the list, so a failed delete does not
    // roll a fresh server list back to its older snapshot.
    let list_epoch = RequestGuard::new();
    let list_replaced = list_epoch.clone();

    let load = Callback::new(move |()| {
        let ticket = load_guard.begin();
        let replaced = list_replaced.clone();
        let api = app_state.0.api_client.get_value();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = load_posts(&api).await;

            // Ignore stale responses.
            if !ticket.is_current() {
                return;
            }

            match result {
                Ok(list) => {
                    replaced.invalidate();
                    posts.set(list);
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    });

    // Refetch on mount and whenever the saved token changes.
    Effect::new(move |_| {
        app_state.0.token.track();
        load.run(());
    });

    let on_delete = Callback::new(move |id: PostId| {
        delete_error.set(None);

        let confirmed = window()
            .confirm_with_message("Delete this post?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let Some(change) = posts.try_update(|ps| Optimistic::apply(ps, |ps| remove_post(ps, id)))
        else {
            return;
        };
        deleting.update(|d| {
            d.insert(id);
        });

        let ticket = delete_guard.join();
        let epoch = list_epoch.join();
        let api = app_state.0.api_client.get_value();
        spawn_local(async move {
            let outcome = delete_post(&api, id).await;
            if !ticket.is_current() {
                return;
            }

            let replaced = !epoch.is_current();
            posts.update(|ps| change.settle_unless_replaced(ps, &outcome, replaced));
            if let Err(msg) = outcome {
                delete_error.set(Some(msg));
            }
            deleting.update(|d| {
                d.remove(&id);
            });
        });
    });

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-xl font-semibold">"Posts"</h1>
                <Button href=CREATE>"+ New Post"</Button>
            </div>

            {move || {
                delete_error.get().map(|e| view! {
                    <DismissibleAlert tone=AlertTone::Warning on_dismiss=move |_| delete_error.set(None)>
                        {e}
                    </DismissibleAlert>
                })
            }}

            <Show when=move || !loading.get() fallback=|| view! { <LoadingRow /> }>
                <Show
                    when=move || error.get().is_none()
                    fallback=move || view! {
                        <Alert tone=AlertTone::Danger class="items-center">
                            <div class="flex-1">{move || error.get().unwrap_or_default()}</div>
                            <Button
                                size=ButtonSize::Sm
                                variant=ButtonVariant::Outline
                                on:click=move |_| load.run(())
                            >
                                "Retry"
                            </Button>
                        </Alert>
                    }
                >
                    <Show
                        when=move || !posts.with(|ps| ps.is_empty())
                        fallback=|| view! { <Alert>"No posts yet. Create your first one!"</Alert> }
                    >
                        <TableWrapper>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHead class="w-[70px]">"ID"</TableHead>
                                        <TableHead>"Title"</TableHead>
                                        <TableHead>"Excerpt"</TableHead>
                                        <TableHead class="w-[260px]">"Actions"</TableHead>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || posts.get()
                                        key=|p| p.id
                                        children=move |post: Post| {
                                            let id = post.id;
                                            view! {
                                                <PostRow
                                                    post=post
                                                    busy=Signal::derive(move || deleting.with(|d| d.contains(&id)))
                                                    on_delete=on_delete
                                                />
                                            }
                                        }
                                    />
                                </TableBody>
                            </Table>
                        </TableWrapper>
                    </Show>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn PostRow(post: Post, busy: Signal<bool>, on_delete: Callback<PostId>) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());
    let id = post.id;
    let view_href = post_path(id);
    let edit_href = edit_path(id);
    let excerpt_title = (!post.content.is_empty()).then(|| post.content.clone());

    view! {
        <TableRow>
            <TableCell>{id}</TableCell>
            <TableCell class="font-medium">{post.title}</TableCell>
            <TableCell class="max-w-[420px] truncate text-muted-foreground" attr:title=excerpt_title>
                {post.content}
            </TableCell>
            <TableCell>
                <div class="flex gap-2">
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Secondary
                        attr:disabled=move || busy.get()
                        on:click=move |_| navigate.with_value(|nav| nav(&view_href, Default::default()))
                    >
                        "View"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Warning
                        attr:disabled=move || busy.get()
                        on:click=move |_| navigate.with_value(|nav| nav(&edit_href, Default::default()))
                    >
                        "Edit"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Destructive
                        attr:disabled=move || busy.get()
                        on:click=move |_| on_delete.run(id)
                    >
                        {move || if busy.get() { "Deleting…" } else { "Delete" }}
                    </Button>
                </div>
            </TableCell>
        </TableRow>
    }
}
