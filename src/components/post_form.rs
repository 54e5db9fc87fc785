use crate::components::ui::{Button, ButtonVariant, FieldFeedback, Input, Label, Textarea};
use crate::models::{FieldErrors, Post, PostPayload};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Controlled title/content form.
///
/// Holds no network logic: `on_submit` gets the payload and the form stays
/// disabled until the returned future resolves. Fields are reset from
/// `initial` every time it changes, so a parent that swaps in the server's copy
/// after saving sees the form follow.
#[component]
pub(crate) fn PostForm<F, Fut>(
    on_submit: F,
    #[prop(into, optional)] initial: MaybeProp<Post>,
    #[prop(into, optional)] errors: MaybeProp<FieldErrors>,
    #[prop(into, default = "Save".to_string())] submit_label: String,
    #[prop(into, default = "Saving…".to_string())] pending_label: String,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView
where
    F: Fn(PostPayload) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let latch: RwSignal<SubmitLatch> = RwSignal::new(SubmitLatch::default());

    Effect::new(move |_| {
        if let Some(post) = initial.get() {
            let fields = FormFields::from_post(&post);
            title.set(fields.title);
            content.set(fields.content);
        }
    });

    let title_errors = move || field_messages(errors.get().as_ref(), FormField::Title);
    let content_errors = move || field_messages(errors.get().as_ref(), FormField::Content);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !latch.try_update(SubmitLatch::try_begin).unwrap_or(false) {
            return;
        }

        let fields = FormFields {
            title: title.get_untracked(),
            content: content.get_untracked(),
        };
        let pending = on_submit(fields.payload());
        spawn_local(async move {
            pending.await;
            latch.update(SubmitLatch::finish);
        });
    };

    let is_submitting = Signal::derive(move || latch.get().is_pending());

    view! {
        <form class="flex flex-col gap-4" novalidate=true on:submit=handle_submit>
            <div class="flex flex-col gap-2">
                <Label html_for="post-title">"Title"</Label>
                <Input
                    id="post-title"
                    placeholder="Post title"
                    bind_value=title
                    required=true
                    disabled=is_submitting
                    invalid=Signal::derive(move || !title_errors().is_empty())
                />
                <FieldFeedback messages=Signal::derive(title_errors) />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="post-content">"Content"</Label>
                <Textarea
                    id="post-content"
                    placeholder="Write something…"
                    rows=6
                    bind_value=content
                    required=true
                    disabled=is_submitting
                    invalid=Signal::derive(move || !content_errors().is_empty())
                />
                <FieldFeedback messages=Signal::derive(content_errors) />
            </div>

            <div class="flex items-center gap-2">
                <Button attr:r#type="submit" attr:disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { pending_label.clone() } else { submit_label.clone() }}
                </Button>
                {on_cancel.map(|cancel| view! {
                    <Button
                        variant=ButtonVariant::Outline
                        attr:r#type="button"
                        attr:disabled=move || is_submitting.get()
                        on:click=move |_| cancel.run(())
                    >
                        "Cancel"
                    </Button>
                })}
            </div>
        </form>
    }
}

/// Title and content as the form holds them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormFields {
    pub title: String,
    pub content: String,
}

impl FormFields {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }

    pub fn payload(&self) -> PostPayload {
        PostPayload::new(self.title.clone(), self.content.clone())
    }
}

/// At most one submission in flight per form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SubmitLatch {
    pending: bool,
}

impl SubmitLatch {
    /// `false` when a submission is already pending.
    pub fn try_begin(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Content,
}

/// Messages shown under a field. Content also shows `body` errors.
pub(crate) fn field_messages(errors: Option<&FieldErrors>, field: FormField) -> Vec<String> {
    match (errors, field) {
        (None, _) => Vec::new(),
        (Some(e), FormField::Title) => e.title(),
        (Some(e), FormField::Content) => e.content(),
    }
}
