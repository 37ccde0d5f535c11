pub mod catalog;
pub mod contact;
pub mod listing;

pub use catalog::{ListingCatalog, ListingQuery, SortKey};
pub use listing::{Listing, ListingForm, NewListing};
