mod post_create;
mod post_edit;
mod post_list;
mod post_view;

pub use post_create::PostCreatePage;
pub use post_edit::PostEditPage;
pub use post_list::PostListPage;
pub use post_view::PostViewPage;

use leptos::prelude::window;

/// Browser "back", used by Cancel / Go back buttons.
pub(crate) fn go_back() {
    if let Ok(history) = window().history() {
        let _ = history.back();
    }
}
