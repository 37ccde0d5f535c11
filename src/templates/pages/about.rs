use crate::templates::components::stat;
use crate::templates::layouts::{desktop_layout, PageCtx};
use maud::{html, Markup};

const STATS: &[(&str, &str)] = &[
    ("500+", "Happy Families"),
    ("15+", "Years Experience"),
    ("1000+", "Properties Sold"),
    ("98%", "Client Satisfaction"),
];

const VALUES: &[(&str, &str)] = &[
    ("Trust & Integrity", "We build lasting relationships based on honesty, transparency, and ethical business practices."),
    ("Client Focus", "Your success is our success. We're committed to exceeding your expectations every time."),
    ("Excellence", "We strive for excellence in everything we do, from property selection to customer service."),
    ("Community", "We're proud to be part of the communities we serve and invest in their growth."),
];

const SERVICES: &[(&str, &str)] = &[
    ("Residential Sales", "Expert guidance through every step of buying or selling your home."),
    ("Commercial Properties", "Strategic commercial real estate solutions for businesses of all sizes."),
    ("Property Management", "Comprehensive property management services for landlords and investors."),
    ("Investment Advisory", "Strategic investment advice to help you build wealth through real estate."),
];

const TEAM: &[(&str, &str, &str)] = &[
    ("Sarah Johnson", "Founder & CEO", "20+ years in real estate with a passion for helping families find their dream homes."),
    ("Michael Chen", "Head of Sales", "Expert negotiator with a track record of securing the best deals for our clients."),
    ("Emily Rodriguez", "Property Specialist", "Local market expert with deep knowledge of neighborhood trends and property values."),
    ("David Thompson", "Investment Advisor", "Specializes in investment properties and helping clients build wealth through real estate."),
];

pub fn about_page(ctx: &PageCtx) -> Markup {
    desktop_layout(
        "About",
        ctx,
        html! {
            section class="hero" {
                h1 { "About " (ctx.site_name) }
                p { "Your trusted partner in real estate for over 15 years." }
            }

            main class="container" {
                div class="stats" {
                    @for (number, label) in STATS {
                        (stat(*number, label))
                    }
                }

                h2 { "Our Values" }
                div class="grid" style="margin:1rem 0 2.5rem" {
                    @for (title, text) in VALUES {
                        div class="panel" { h3 { (title) } p { (text) } }
                    }
                }

                h2 { "What We Do" }
                div class="grid" style="margin:1rem 0 2.5rem" {
                    @for (title, text) in SERVICES {
                        div class="panel" { h3 { (title) } p { (text) } }
                    }
                }

                h2 { "Meet Our Team" }
                div class="grid" style="margin-top:1rem" {
                    @for (name, role, bio) in TEAM {
                        div class="panel" {
                            h3 { (name) }
                            p style="color:#2563eb;font-weight:600" { (role) }
                            p { (bio) }
                        }
                    }
                }
            }
        },
    )
}
