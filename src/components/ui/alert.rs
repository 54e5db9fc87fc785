use icons::X;
use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Alert(
    #[prop(optional)] tone: AlertTone,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let merged_class = AlertClass { tone }.with_class(class);

    view! {
        <div data-name="Alert" role="alert" class=merged_class>
            {children()}
        </div>
    }
}

/// Alert with a close button. The parent owns visibility; `on_dismiss` asks it to hide.
#[component]
pub fn DismissibleAlert(
    #[prop(optional)] tone: AlertTone,
    #[prop(into, optional)] class: String,
    #[prop(into)] on_dismiss: Callback<()>,
    children: Children,
) -> impl IntoView {
    let merged_class = AlertClass { tone }.with_class(class);

    view! {
        <div data-name="DismissibleAlert" role="alert" class=merged_class>
            <div class="flex-1">{children()}</div>
            <button
                type="button"
                aria-label="Close"
                class="rounded-sm opacity-70 transition-opacity hover:opacity-100 hover:cursor-pointer"
                on:click=move |_| on_dismiss.run(())
            >
                <X class="size-4" />
            </button>
        </div>
    }
}

/* ========================================================== */
/*                       🧬 STRUCT 🧬                         */
/* ========================================================== */

#[derive(TwClass, Default)]
#[tw(class = "relative flex w-full items-start justify-between gap-3 rounded-lg border px-4 py-3 text-sm")]
pub struct AlertClass {
    tone: AlertTone,
}

#[derive(TwVariant)]
pub enum AlertTone {
    #[tw(default, class = "bg-background text-foreground")]
    Info,
    #[tw(class = "border-destructive/30 bg-destructive/5 text-destructive")]
    Danger,
    #[tw(class = "border-amber-300 bg-amber-50 text-amber-900")]
    Warning,
    #[tw(class = "border-emerald-300 bg-emerald-50 text-emerald-900")]
    Success,
}
