use crate::domain::{Listing, ListingCatalog, ListingQuery};
use crate::templates::components::{
    error_notice, listing_card, listing_row, search_form, SearchTarget, ViewMode,
};
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct PropertiesVm<'a> {
    pub catalog: &'a ListingCatalog,
    pub query: &'a ListingQuery,
    pub results: &'a [&'a Listing],
    pub view: ViewMode,
}

pub fn properties_page(ctx: &PageCtx, vm: &PropertiesVm) -> Markup {
    let locations = vm.catalog.distinct_locations();

    desktop_layout(
        "Properties",
        ctx,
        html! {
            section class="hero" style="padding:3rem 1.5rem" {
                h1 { "All Properties" }
                p { "Browse our complete collection of premium properties" }
            }

            main class="container" {
                (search_form(SearchTarget::Properties, vm.query, &locations, vm.view))

                @if let Some(err) = vm.catalog.last_error() {
                    (error_notice(&format!("Listings could not be loaded: {err}")))
                }

                div class="controls" {
                    span {
                        "Showing " strong { (vm.results.len()) } " of "
                        strong { (vm.catalog.len()) } " properties"
                    }
                    div class="view-toggle" {
                        a class=[active(vm.view == ViewMode::Grid)]
                            href=(view_href(vm.query, ViewMode::Grid)) { "Grid" }
                        a class=[active(vm.view == ViewMode::List)]
                            href=(view_href(vm.query, ViewMode::List)) { "List" }
                    }
                }

                @if vm.results.is_empty() {
                    div class="empty" {
                        h3 { "No properties found" }
                        @if vm.catalog.is_empty() {
                            p { "No properties are listed yet. Check back soon." }
                        } @else {
                            p { "Try adjusting your search criteria or filters" }
                        }
                    }
                } @else if vm.view == ViewMode::List {
                    div {
                        @for listing in vm.results {
                            (listing_row(listing))
                        }
                    }
                } @else {
                    div class="grid" {
                        @for listing in vm.results {
                            (listing_card(listing))
                        }
                    }
                }
            }
        },
    )
}

fn active(on: bool) -> Option<&'static str> {
    on.then_some("active")
}

/// Same filters, other view.
fn view_href(query: &ListingQuery, view: ViewMode) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    if !query.search.is_empty() {
        qs.append_pair("q", &query.search);
    }
    if !query.location.is_empty() {
        qs.append_pair("location", &query.location);
    }
    if let Some(min) = query.min_price {
        qs.append_pair("min_price", &min.to_string());
    }
    if let Some(max) = query.max_price {
        qs.append_pair("max_price", &max.to_string());
    }
    qs.append_pair("sort", query.sort.as_str());
    qs.append_pair("view", view.as_str());
    format!("/properties?{}", qs.finish())
}
