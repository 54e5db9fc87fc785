use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!("flex items-center gap-2 text-sm leading-none font-medium select-none", class);

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}

/// Inline validation messages rendered under a field, one line each.
#[component]
pub fn FieldFeedback(#[prop(into)] messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || !messages.get().is_empty() fallback=|| ().into_view()>
            <div data-name="FieldFeedback" class="flex flex-col gap-1">
                {move || {
                    messages
                        .get()
                        .into_iter()
                        .map(|m| view! { <p class="text-xs text-destructive">{m}</p> })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}
