use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Shown whenever a listing has no image of its own.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?ixlib=rb-4.0.3&auto=format&fit=crop&w=1000&q=80";

/// One property record as held by the record store.
///
/// `id` and `created_at` are assigned by the store on insert and never
/// change afterwards; nothing in this crate constructs them for a new row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    fn own_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Image to render, falling back to the stock photo for absent or blank urls.
    pub fn image_or_default(&self) -> &str {
        self.own_image().unwrap_or(DEFAULT_IMAGE_URL)
    }

    pub fn has_image(&self) -> bool {
        self.own_image().is_some()
    }

    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Hosted stores may hand out integer keys; the rest of the crate treats ids as opaque strings.
fn id_from_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(d)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Insert payload: every field the client may supply, nothing the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("price must be a non-negative number")]
    InvalidPrice,
}

/// Raw admin form input, kept verbatim so a failed submission can be
/// re-rendered with everything the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: String,
    pub image_url: String,
}

impl ListingForm {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key {
                "title" => form.title = value.to_string(),
                "description" => form.description = value.to_string(),
                "location" => form.location = value.to_string(),
                "price" => form.price = value.to_string(),
                "image_url" => form.image_url = value.to_string(),
                _ => {}
            }
        }
        form
    }

    pub fn validate(&self) -> Result<NewListing, ValidationError> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let location = required(&self.location, "location")?;
        let price = parse_price(&self.price)?;

        let image_url = self.image_url.trim();
        let image_url = (!image_url.is_empty()).then(|| image_url.to_string());

        Ok(NewListing {
            title,
            description,
            location,
            price,
            image_url,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(v.to_string())
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("price"));
    }
    match raw.parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(ValidationError::InvalidPrice),
    }
}

/// `1250000.0` -> `"1,250,000"`, `99.5` -> `"99.50"`.
pub fn format_price(price: f64) -> String {
    // Formatted from the float itself so large values do not saturate an integer cast.
    let fixed = format!("{:.2}", price.abs());
    let (digits, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    if price < 0.0 && fixed != "0.00" {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if frac != "00" {
        out.push('.');
        out.push_str(frac);
    }
    out
}
