use crate::templates::components::error_notice;
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

/// `email` is echoed back after a failed attempt.
pub fn login_page(ctx: &PageCtx, email: &str, error: Option<&str>) -> Markup {
    desktop_layout(
        "Sign in",
        ctx,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                p class="lead" { "Admin access for managing property listings." }

                @if let Some(err) = error {
                    (error_notice(err))
                }

                form class="panel" method="post" action="/login" {
                    div class="form-group" {
                        label for="email" { "Email" }
                        input id="email" type="email" name="email" required autocomplete="username"
                            value=(email);
                    }
                    div class="form-group" {
                        label for="password" { "Password" }
                        input id="password" type="password" name="password" required
                            autocomplete="current-password";
                    }
                    button class="btn" type="submit" { "Sign in" }
                }
            }
        },
    )
}
