pub(crate) mod routes;

use crate::components::token_box::TokenBox;
use crate::config::EnvConfig;
use crate::pages::{PostCreatePage, PostEditPage, PostListPage, PostViewPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use routes::{CREATE, HOME};

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new(&EnvConfig::new())));

    // Router hooks (params, navigate) need the <Router> context, including the token box.
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                    <Route path=path!("") view=PostListPage />
                    <Route path=path!("post/create") view=PostCreatePage />
                    <Route path=path!("post/edit/:id") view=PostEditPage />
                    <Route path=path!("post/:id") view=PostViewPage />
                </Routes>
            </Shell>
        </Router>
    }
}

#[component]
fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background text-foreground">
            <header class="border-b border-border bg-card">
                <nav class="mx-auto flex max-w-5xl flex-wrap items-center justify-between gap-3 px-4 py-3">
                    <div class="flex items-center gap-4 text-sm">
                        <a href=HOME class="font-semibold">"Blog"</a>
                        <a href=HOME class="text-muted-foreground hover:text-foreground">"Posts"</a>
                        <a href=CREATE class="text-muted-foreground hover:text-foreground">"Create"</a>
                    </div>
                    <TokenBox />
                </nav>
            </header>
            <main class="mx-auto max-w-5xl px-4 py-6">{children()}</main>
        </div>
    }
}
