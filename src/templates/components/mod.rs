use maud::{html, Markup};

pub mod contact_form;
pub mod error;
pub mod listing_card;
pub mod search_form;

pub use contact_form::{contact_form, contact_submitted, ContactFormVm};
pub use error::html_error_response;
pub use listing_card::{listing_card, listing_row};
pub use search_form::{search_form, SearchTarget, ViewMode};

pub fn stat(number: impl maud::Render, label: &str) -> Markup {
    html! {
        div class="stat" {
            div class="number" { (number) }
            div class="label" { (label) }
        }
    }
}

pub fn error_notice(message: &str) -> Markup {
    html! {
        div class="notice notice-error" role="alert" { (message) }
    }
}
