use crate::domain::{Listing, ListingCatalog, ListingQuery};
use crate::templates::components::{
    error_notice, listing_card, search_form, stat, SearchTarget, ViewMode,
};
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct HomeVm<'a> {
    pub catalog: &'a ListingCatalog,
    pub query: &'a ListingQuery,
    pub featured: &'a [&'a Listing],
}

pub fn home_page(ctx: &PageCtx, vm: &HomeVm) -> Markup {
    let locations = vm.catalog.distinct_locations();

    desktop_layout(
        "Home",
        ctx,
        html! {
            section class="hero" {
                h1 { "Find Your Dream Property" }
                p {
                    "Discover exceptional properties in the most desirable locations. "
                    "Your perfect home is waiting for you."
                }
                div class="container" style="max-width:900px;padding:0" {
                    (search_form(SearchTarget::Home, vm.query, &locations, ViewMode::Grid))
                }
            }

            main class="container" {
                div class="stats" {
                    (stat(format!("{}+", vm.catalog.len()), "Properties Available"))
                    (stat(locations.len(), "Locations"))
                    (stat("24/7", "Support"))
                }

                @if let Some(err) = vm.catalog.last_error() {
                    (error_notice(&format!("Listings could not be loaded: {err}")))
                }

                h2 style="text-align:center;margin-bottom:1.5rem" { "Featured Properties" }

                @if vm.featured.is_empty() {
                    div class="empty" {
                        h3 { "No properties found" }
                        p { "Try adjusting your search criteria" }
                    }
                } @else {
                    div class="grid" {
                        @for listing in vm.featured {
                            (listing_card(listing))
                        }
                    }
                }
            }

            section class="hero" style="padding:3rem 1.5rem" {
                h2 { "Ready to Find Your Dream Home?" }
                p { "Join thousands of satisfied customers who found their perfect property with us" }
                a class="btn" href="/properties" { "Browse Properties" }
                " "
                a class="btn btn-outline" style="color:#fff;border-color:#fff" href="/contact" { "Contact Us" }
            }
        },
    )
}
