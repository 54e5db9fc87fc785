use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Full-width "Loading…" row shown while a page fetches.
#[component]
pub fn LoadingRow(#[prop(into, default = "Loading…".to_string())] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 py-4 text-sm text-muted-foreground">
            <Spinner />
            <span>{label}</span>
        </div>
    }
}
