use crate::auth::SessionUser;
use maud::{html, Markup, DOCTYPE};

/// Per-request chrome: who is signed in and what the site is called.
#[derive(Debug, Clone, Copy)]
pub struct PageCtx<'a> {
    pub site_name: &'a str,
    pub user: Option<&'a SessionUser>,
}

impl<'a> PageCtx<'a> {
    pub fn new(site_name: &'a str, user: Option<&'a SessionUser>) -> Self {
        Self { site_name, user }
    }
}

pub fn desktop_layout(title: &str, ctx: &PageCtx, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | " (ctx.site_name) }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header class="site-header" {
                    a class="brand" href="/" {
                        svg
                            xmlns="http://www.w3.org/2000/svg"
                            width="24"
                            height="24"
                            viewBox="0 0 24 24"
                            fill="none"
                            stroke="#2563eb"
                            stroke-width="2"
                            stroke-linecap="round"
                            stroke-linejoin="round"
                        {
                            path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                            path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                            path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                            path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                        }
                        (ctx.site_name)
                    }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/properties" { "Properties" } }
                            li { a href="/about" { "About" } }
                            li { a href="/contact" { "Contact" } }
                            li { a href="/admin" { "Admin" } }
                        }
                    }
                    @match ctx.user {
                        Some(user) => {
                            form action="/logout" method="post" style="margin:0" {
                                span style="margin-right:.75rem;color:#6b7280" { (user.email) }
                                button class="btn btn-outline" type="submit" { "Sign out" }
                            }
                        }
                        None => {
                            a href="/login" class="btn btn-outline" { "Sign in" }
                        }
                    }
                }

                (content)

                footer class="site-footer" {
                    div class="cols" {
                        div {
                            h4 { (ctx.site_name) }
                            p { "Helping families find their next home since 2008." }
                        }
                        div {
                            h4 { "Explore" }
                            ul {
                                li { a href="/properties" { "All properties" } }
                                li { a href="/about" { "About us" } }
                                li { a href="/contact" { "Contact" } }
                            }
                        }
                        div {
                            h4 { "Office" }
                            p { "123 Main Street, Suite 100" }
                            p { "info@mpr-realestate.example" }
                        }
                    }
                }
            }
        }
    }
}
