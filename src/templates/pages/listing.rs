use crate::domain::contact::FormKind;
use crate::domain::Listing;
use crate::templates::components::{contact_form, listing_card, ContactFormVm};
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct ListingVm<'a> {
    pub listing: &'a Listing,
    pub related: &'a [Listing],
    /// The inquiry panel, already rendered for the current form state.
    pub inquiry: Markup,
}

pub fn listing_page(ctx: &PageCtx, vm: &ListingVm) -> Markup {
    let l = vm.listing;

    desktop_layout(
        &l.title,
        ctx,
        html! {
            main class="container" {
                nav style="margin-bottom:1rem;color:#6b7280" {
                    a href="/" { "Home" } " / " a href="/properties" { "Properties" } " / " (l.title)
                }

                div class="detail" {
                    div {
                        img class="hero-img" src=(l.image_or_default()) alt=(l.title);

                        div class="panel" style="margin-top:1.5rem" {
                            h1 { (l.title) }
                            p style="color:#6b7280" { (l.location) }
                            p style="font-size:1.75rem;font-weight:700;color:#1e3a8a" {
                                "$" (l.display_price())
                            }
                        }

                        div class="panel" {
                            h3 { "Description" }
                            p { (l.description) }
                        }

                        div class="panel" {
                            h3 { "Property Details" }
                            dl class="facts" {
                                div { dt { "Location" } dd { (l.location) } }
                                div { dt { "Price" } dd { "$" (l.display_price()) } }
                                div { dt { "Listed" } dd { (l.created_at.format("%B %-d, %Y").to_string()) } }
                                div { dt { "Reference" } dd { (l.id) } }
                            }
                        }
                    }

                    aside {
                        div class="panel" {
                            h3 { "Interested in this property?" }
                            (vm.inquiry)
                        }
                    }
                }

                @if !vm.related.is_empty() {
                    h2 style="text-align:center;margin:2.5rem 0 1.5rem" { "Similar Properties" }
                    div class="grid" {
                        @for other in vm.related {
                            (listing_card(other))
                        }
                    }
                }
            }
        },
    )
}

/// Blank inquiry form for a listing.
pub fn inquiry_form_url(listing_id: &str) -> String {
    format!("/listing/{listing_id}/inquiry")
}

pub fn blank_inquiry_form(listing_id: &str) -> Markup {
    let action = inquiry_form_url(listing_id);
    contact_form(&ContactFormVm {
        kind: FormKind::ListingInquiry,
        action: &action,
        form: &Default::default(),
        error: None,
    })
}

pub fn not_found_page(ctx: &PageCtx) -> Markup {
    desktop_layout(
        "Property Not Found",
        ctx,
        html! {
            main class="container narrow" style="text-align:center;padding:4rem 1rem" {
                h1 { "Property Not Found" }
                p { "The property you're looking for doesn't exist or has been removed." }
                p style="margin-top:1.5rem" {
                    a class="btn" href="/properties" { "Back to Properties" }
                }
            }
        },
    )
}
