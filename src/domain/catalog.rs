// src/domain/catalog.rs
//
// In-memory view over the listing set fetched for one page load.
// Every query below runs against the local copy; only `load_all` talks to the store.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use tracing::{debug, error};

use crate::domain::listing::Listing;
use crate::store::ListingStore;

#[derive(Debug, Default)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
    last_error: Option<String>,
}

impl ListingCatalog {
    #[cfg(test)]
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            last_error: None,
        }
    }

    /// Fresh catalog populated from the store (empty if the store fails).
    pub fn load(store: &dyn ListingStore) -> Self {
        let mut catalog = Self::default();
        catalog.load_all(store);
        catalog
    }

    /// Replace the local set with every row in the store.
    ///
    /// On failure the previous set is kept and the error is recorded; callers
    /// render whatever is left, usually the empty state.
    pub fn load_all(&mut self, store: &dyn ListingStore) {
        match store.list() {
            Ok(rows) => {
                debug!(count = rows.len(), "loaded listings");
                self.listings = rows;
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, "error fetching listings");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Term in title or description, and location (if any) in location.
    /// Both comparisons ignore case; an empty term matches everything.
    pub fn filter(&self, search: &str, location: &str) -> Vec<&Listing> {
        let term = search.to_lowercase();
        let location = location.to_lowercase();
        self.listings
            .iter()
            .filter(|l| matches_search(l, &term) && matches_location(l, &location))
            .collect()
    }

    pub fn filter_by_price_range(&self, min: f64, max: f64) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| in_price_range(l, min, max))
            .collect()
    }

    /// Admin table search: title or location.
    pub fn admin_search(&self, term: &str) -> Vec<&Listing> {
        let term = term.to_lowercase();
        self.listings
            .iter()
            .filter(|l| {
                l.title.to_lowercase().contains(&term) || l.location.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Full set ordered by `key`.
    pub fn sorted(&self, key: SortKey) -> Vec<&Listing> {
        let mut out: Vec<&Listing> = self.listings.iter().collect();
        key.sort(&mut out);
        out
    }

    /// Unique locations in first-seen order.
    pub fn distinct_locations(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.listings
            .iter()
            .map(|l| l.location.as_str())
            .filter(|loc| seen.insert(*loc))
            .collect()
    }
}

// `term` and `location` arrive lowercased.
fn matches_search(listing: &Listing, term: &str) -> bool {
    term.is_empty()
        || listing.title.to_lowercase().contains(term)
        || listing.description.to_lowercase().contains(term)
}

fn matches_location(listing: &Listing, location: &str) -> bool {
    location.is_empty() || listing.location.to_lowercase().contains(location)
}

fn in_price_range(listing: &Listing, min: f64, max: f64) -> bool {
    listing.price >= min && listing.price <= max
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    #[default]
    Newest,
    Oldest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Newest => "Newest First",
            SortKey::Oldest => "Oldest First",
        }
    }

    /// Stable: equal keys keep their incoming order.
    pub fn sort(self, listings: &mut [&Listing]) {
        match self {
            SortKey::PriceLow => listings.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortKey::PriceHigh => listings.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortKey::Newest => listings.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Oldest => listings.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Everything the properties page lets a visitor narrow the set by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub search: String,
    pub location: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortKey,
}

impl ListingQuery {
    /// Reads `q`, `location`, `min_price`, `max_price`, `sort`.
    /// Unparseable numbers count as unset; unknown sort keys fall back to newest.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let text = |k: &str| params.get(k).map(|v| v.trim().to_string()).unwrap_or_default();
        let number = |k: &str| {
            params
                .get(k)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        Self {
            search: text("q"),
            location: text("location"),
            min_price: number("min_price"),
            max_price: number("max_price"),
            sort: params
                .get("sort")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn has_price_range(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Text filter AND price range, in `sort` order.
    pub fn apply<'a>(&self, catalog: &'a ListingCatalog) -> Vec<&'a Listing> {
        let matched = identities(catalog.filter(&self.search, &self.location));
        let in_range = self.has_price_range().then(|| {
            identities(catalog.filter_by_price_range(
                self.min_price.unwrap_or(f64::NEG_INFINITY),
                self.max_price.unwrap_or(f64::INFINITY),
            ))
        });

        catalog
            .sorted(self.sort)
            .into_iter()
            .filter(|l| {
                let id: *const Listing = *l;
                matched.contains(&id) && in_range.as_ref().map_or(true, |r| r.contains(&id))
            })
            .collect()
    }
}

// Rows are borrowed from one catalog, so the address identifies a row.
fn identities(rows: Vec<&Listing>) -> HashSet<*const Listing> {
    rows.into_iter().map(|l| l as *const Listing).collect()
}
