use crate::domain::Listing;
use maud::{html, Markup};

/// Grid view tile.
pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        article class="card" {
            div class="media" {
                img src=(listing.image_or_default()) alt=(listing.title) loading="lazy";
                span class="badge-price" { "$" (listing.display_price()) }
                span class="badge-location" { (listing.location) }
            }
            div class="card-body" {
                h3 { (listing.title) }
                p { (excerpt(&listing.description, 120)) }
                a class="btn" href=(detail_href(listing)) { "View Details" }
            }
        }
    }
}

/// List view row.
pub fn listing_row(listing: &Listing) -> Markup {
    html! {
        article class="row" {
            img src=(listing.image_or_default()) alt=(listing.title) loading="lazy";
            div {
                h3 { (listing.title) }
                p style="color:#6b7280" { (listing.location) }
                p { (excerpt(&listing.description, 220)) }
                div style="display:flex;gap:1rem;align-items:center;margin-top:.5rem" {
                    strong { "$" (listing.display_price()) }
                    a class="btn" href=(detail_href(listing)) { "View Details" }
                }
            }
        }
    }
}

pub fn detail_href(listing: &Listing) -> String {
    format!("/listing/{}", listing.id)
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
