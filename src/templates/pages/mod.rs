pub mod about;
pub mod admin;
pub mod contact;
pub mod home;
pub mod listing;
pub mod login;
pub mod properties;

pub use about::about_page;
pub use admin::{admin_page, AdminVm};
pub use contact::contact_page;
pub use home::{home_page, HomeVm};
pub use listing::{blank_inquiry_form, inquiry_form_url, listing_page, not_found_page, ListingVm};
pub use login::login_page;
pub use properties::{properties_page, PropertiesVm};
