use crate::domain::{Listing, ListingForm};
use crate::templates::components::{error_notice, stat};
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

pub struct AdminVm<'a> {
    pub total: usize,
    pub locations: usize,
    /// Listings that carry their own image.
    pub with_images: usize,
    pub inquiries: i64,
    pub search: &'a str,
    /// Already narrowed by `search`.
    pub listings: &'a [&'a Listing],
    pub form: &'a ListingForm,
    /// Failed create/delete or a store outage.
    pub error: Option<&'a str>,
}

pub fn admin_page(ctx: &PageCtx, vm: &AdminVm) -> Markup {
    // Keep the add form open when it has something to show.
    let form_open = vm.error.is_some() && *vm.form != ListingForm::default();

    desktop_layout(
        "Admin Dashboard",
        ctx,
        html! {
            main class="container" {
                h1 { "Admin Dashboard" }
                @if let Some(user) = ctx.user {
                    p style="color:#6b7280" { "Signed in as " (user.email) }
                }

                div class="stats" {
                    (stat(vm.total, "Total Properties"))
                    (stat(vm.locations, "Locations"))
                    (stat(vm.with_images, "With Images"))
                    (stat(vm.inquiries, "Inquiries"))
                }

                @if let Some(err) = vm.error {
                    (error_notice(err))
                }

                details class="add-listing" open[form_open] {
                    summary { "Add New Property" }
                    form method="post" action="/admin/listings" style="margin-top:1rem" {
                        div class="form-group" {
                            label for="title" { "Title" }
                            input id="title" type="text" name="title" required value=(vm.form.title);
                        }
                        div class="form-group" {
                            label for="description" { "Description" }
                            textarea id="description" name="description" rows="4" required { (vm.form.description) }
                        }
                        div class="form-group" {
                            label for="location" { "Location" }
                            input id="location" type="text" name="location" required value=(vm.form.location);
                        }
                        div class="form-group" {
                            label for="price" { "Price" }
                            input id="price" type="number" name="price" min="0" step="any" required
                                value=(vm.form.price);
                        }
                        div class="form-group" {
                            label for="image_url" { "Image URL (optional)" }
                            input id="image_url" type="url" name="image_url" value=(vm.form.image_url);
                        }
                        button class="btn" type="submit" { "Add Property" }
                    }
                }

                form class="search-bar" method="get" action="/admin" {
                    input type="search" name="q" placeholder="Search by title or location" value=(vm.search);
                    button class="btn" type="submit" { "Search" }
                }

                div class="panel" style="overflow-x:auto" {
                    @if vm.listings.is_empty() {
                        p class="empty" { "No properties found" }
                    } @else {
                        table {
                            thead {
                                tr {
                                    th { "Property" }
                                    th { "Location" }
                                    th { "Price" }
                                    th { "Listed" }
                                    th { "Actions" }
                                }
                            }
                            tbody {
                                @for l in vm.listings {
                                    tr {
                                        td { a href=(format!("/listing/{}", l.id)) { (l.title) } }
                                        td { (l.location) }
                                        td { "$" (l.display_price()) }
                                        td style="color:#6b7280" { (l.created_at.format("%Y-%m-%d").to_string()) }
                                        td {
                                            form action=(format!("/admin/listings/{}/delete", l.id)) method="post"
                                                onsubmit="return confirm('Are you sure you want to delete this listing?');"
                                                style="margin:0"
                                            {
                                                button type="submit" class="btn-danger" { "Delete" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
