use crate::domain::{ListingQuery, SortKey};
use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    /// Hero search on `/`: text and location only.
    Home,
    /// Full filter bar on `/properties`.
    Properties,
}

impl SearchTarget {
    fn action(self) -> &'static str {
        match self {
            SearchTarget::Home => "/",
            SearchTarget::Properties => "/properties",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Anything but `list` is the grid.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("list") => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

pub fn search_form(
    target: SearchTarget,
    query: &ListingQuery,
    locations: &[&str],
    view: ViewMode,
) -> Markup {
    let full = target == SearchTarget::Properties;

    html! {
        form class="search-bar" method="get" action=(target.action()) {
            input type="search" name="q" placeholder="Search by title or description"
                value=(query.search);

            select name="location" {
                option value="" selected[query.location.is_empty()] { "All Locations" }
                @for loc in locations {
                    option value=(loc) selected[loc.eq_ignore_ascii_case(&query.location)] { (loc) }
                }
            }

            @if full {
                input class="price" type="number" name="min_price" min="0" step="any"
                    placeholder="Min price" value=(price_value(query.min_price));
                input class="price" type="number" name="max_price" min="0" step="any"
                    placeholder="Max price" value=(price_value(query.max_price));

                select name="sort" {
                    @for key in SortKey::ALL {
                        option value=(key.as_str()) selected[key == query.sort] { (key.label()) }
                    }
                }
                input type="hidden" name="view" value=(view.as_str());
            }

            button class="btn" type="submit" { "Search" }
        }
    }
}

fn price_value(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}
