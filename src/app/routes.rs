use crate::models::PostId;
use leptos::prelude::*;
use leptos_router::params::Params;

pub(crate) const HOME: &str = "/";
pub(crate) const CREATE: &str = "/post/create";

pub(crate) fn post_path(id: PostId) -> String {
    format!("/post/{id}")
}

pub(crate) fn edit_path(id: PostId) -> String {
    format!("/post/edit/{id}")
}

/// `:id` segment shared by `/post/:id` and `/post/edit/:id`.
#[derive(Params, PartialEq, Clone, Debug)]
pub struct PostRouteParams {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(post_path(5), "/post/5");
        assert_eq!(edit_path(7), "/post/edit/7");
    }
}
