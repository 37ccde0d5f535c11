// src/domain/contact.rs
use serde::Serialize;
use thiserror::Error;

/// Subjects offered on the contact page. The listing inquiry form has none.
pub const SUBJECTS: &[(&str, &str)] = &[
    ("general", "General Inquiry"),
    ("property-viewing", "Property Viewing"),
    ("valuation", "Property Valuation"),
    ("investment", "Investment Advice"),
    ("other", "Other"),
];

/// Lifecycle of one contact form: idle -> submitting -> submitted -> idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: ContactState,
    },
}

impl ContactState {
    /// Only an idle form with valid fields may start submitting.
    pub fn begin(self, form: &ContactForm, kind: FormKind) -> Result<Self, ContactError> {
        if self != ContactState::Idle {
            return Err(ContactError::InvalidTransition {
                action: "submit",
                state: self,
            });
        }
        form.validate(kind)?;
        Ok(ContactState::Submitting)
    }

    pub fn complete(self) -> Result<Self, ContactError> {
        match self {
            ContactState::Submitting => Ok(ContactState::Submitted),
            state => Err(ContactError::InvalidTransition {
                action: "complete",
                state,
            }),
        }
    }

    /// The acknowledgment reverts to a blank form after the reset delay.
    /// In the browser this is the delayed htmx swap back to the blank form.
    #[cfg(test)]
    pub fn reset(self) -> Result<Self, ContactError> {
        match self {
            ContactState::Submitted => Ok(ContactState::Idle),
            state => Err(ContactError::InvalidTransition {
                action: "reset",
                state,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Contact page: subject is required.
    General,
    /// Inquiry sent from a listing detail page.
    ListingInquiry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                "subject" => &mut form.subject,
                "message" => &mut form.message,
                _ => continue,
            };
            *slot = value.trim().to_string();
        }
        form
    }

    pub fn validate(&self, kind: FormKind) -> Result<(), ContactError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if kind == FormKind::General && self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        let subject = self.subject.trim();
        if !subject.is_empty() && !SUBJECTS.iter().any(|(code, _)| *code == subject) {
            return Err(ContactError::UnknownSubject(subject.to_string()));
        }
        Ok(())
    }
}
