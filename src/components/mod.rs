pub mod post_form;
pub mod token_box;
pub mod ui;
