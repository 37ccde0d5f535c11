use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

const CONTACT_INFO: &[(&str, &str)] = &[
    ("Phone", "(555) 123-4567"),
    ("Email", "info@mpr-realestate.example"),
    ("Office", "123 Main Street, Suite 100"),
];

const HOURS: &[(&str, &str)] = &[
    ("Monday - Friday", "9:00 AM - 6:00 PM"),
    ("Saturday", "10:00 AM - 4:00 PM"),
    ("Sunday", "By Appointment"),
];

const FAQ: &[(&str, &str)] = &[
    ("How quickly do you respond to inquiries?", "We respond to every inquiry within 24 hours, usually much sooner."),
    ("Do you offer virtual property tours?", "Yes. Ask about a virtual tour for any listing when you get in touch."),
    ("What areas do you specialize in?", "We cover the city center and its surrounding neighborhoods."),
    ("How do I schedule a property viewing?", "Send us a message with the property you're interested in and a time that suits you."),
];

/// `form_slot` is either the blank form, a form with errors, or the acknowledgment.
pub fn contact_page(ctx: &PageCtx, form_slot: Markup) -> Markup {
    desktop_layout(
        "Contact",
        ctx,
        html! {
            section class="hero" style="padding:3rem 1.5rem" {
                h1 { "Get In Touch" }
                p { "Ready to find your dream property? We're here to help every step of the way." }
            }

            main class="container" {
                div class="detail" {
                    div class="panel" {
                        h2 style="margin-bottom:1rem" { "Send Us a Message" }
                        (form_slot)
                    }

                    aside {
                        div class="panel" {
                            h3 { "Contact Information" }
                            dl {
                                @for (label, value) in CONTACT_INFO {
                                    dt style="color:#6b7280;margin-top:.5rem" { (label) }
                                    dd { (value) }
                                }
                            }
                        }
                        div class="panel" {
                            h3 { "Office Hours" }
                            @for (days, hours) in HOURS {
                                p { span style="color:#6b7280" { (days) ": " } (hours) }
                            }
                        }
                    }
                }

                h2 style="text-align:center;margin:2rem 0 1rem" { "Frequently Asked Questions" }
                div class="grid" {
                    @for (q, a) in FAQ {
                        div class="panel" { h3 { (q) } p { (a) } }
                    }
                }
            }
        },
    )
}
