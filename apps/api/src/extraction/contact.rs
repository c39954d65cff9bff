use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::NOT_FOUND;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{10}\b").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// First email-looking token and first 10-digit run. Later matches are ignored.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let first = |re: &Regex| {
        re.find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    };

    ContactInfo {
        email: first(&EMAIL_REGEX),
        phone: first(&PHONE_REGEX),
    }
}
