// templates/components/contact_form.rs
//
// Both the contact page and the listing inquiry panel use this form. It is
// swapped in place by htmx: the form posts itself, the acknowledgment
// replaces it, and the acknowledgment fetches a blank form after a delay.

use crate::domain::contact::{ContactForm, FormKind, SUBJECTS};
use maud::{html, Markup};

pub struct ContactFormVm<'a> {
    pub kind: FormKind,
    /// Where the form posts.
    pub action: &'a str,
    pub form: &'a ContactForm,
    pub error: Option<&'a str>,
}

pub fn contact_form(vm: &ContactFormVm) -> Markup {
    let subject_required = vm.kind == FormKind::General;

    html! {
        div class="contact-slot" {
            @if let Some(err) = vm.error {
                div class="notice notice-error" role="alert" { (err) }
            }
            form method="post" action=(vm.action)
                hx-post=(vm.action)
                hx-target="closest .contact-slot"
                hx-swap="outerHTML"
                hx-disabled-elt="find button[type='submit']"
            {
                div class="form-group" {
                    label for="name" { "Full Name *" }
                    input id="name" type="text" name="name" required value=(vm.form.name);
                }
                div class="form-group" {
                    label for="email" { "Email *" }
                    input id="email" type="email" name="email" required value=(vm.form.email);
                }
                div class="form-group" {
                    label for="phone" { "Phone" }
                    input id="phone" type="tel" name="phone" value=(vm.form.phone);
                }
                @if subject_required {
                    div class="form-group" {
                        label for="subject" { "Subject *" }
                        select id="subject" name="subject" required {
                            option value="" selected[vm.form.subject.is_empty()] { "Select a subject" }
                            @for (value, label) in SUBJECTS {
                                option value=(value) selected[vm.form.subject == *value] { (label) }
                            }
                        }
                    }
                }
                div class="form-group" {
                    label for="message" { "Message *" }
                    textarea id="message" name="message" rows="5" required { (vm.form.message) }
                }
                button class="btn" type="submit" {
                    span class="btn-text" {
                        @if subject_required { "Send Message" } @else { "Send Inquiry" }
                    }
                    span class="htmx-indicator" { "Sending…" }
                }
            }
        }
    }
}

/// Acknowledgment that swaps itself back to a blank form from `reset_url`.
pub fn contact_submitted(reset_url: &str, reset_secs: u64) -> Markup {
    html! {
        div class="contact-slot"
            hx-get=(reset_url)
            hx-trigger=(format!("load delay:{reset_secs}s"))
            hx-swap="outerHTML"
        {
            div class="notice notice-success" role="status" {
                strong { "Message Sent!" }
                p { "Thank you for reaching out. We'll get back to you within 24 hours." }
            }
            noscript { a href=(reset_url) { "Send another message" } }
        }
    }
}
