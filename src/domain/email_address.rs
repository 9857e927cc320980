use std::fmt;
use std::str::FromStr;

use regex::Regex;

use serde::{Serialize, Serializer};

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// A user supplied email-address
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EmailAddress(String);

impl FromStr for EmailAddress {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            // Unicode letters and digits are allowed on both sides of the @-sign
            static ref LOCAL_REGEX: Regex =
                Regex::new(r"^[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{M}\p{N}!#$%&'*+/=?^_`{|}~-]+)*$").unwrap();
            static ref DOMAIN_REGEX: Regex =
                Regex::new(r"^([\p{L}\p{N}]([\p{L}\p{M}\p{N}-]*[\p{L}\p{M}\p{N}])?\.)+[\p{L}\p{N}]([\p{L}\p{M}\p{N}-]*[\p{L}\p{M}\p{N}])?$").unwrap();
        }

        if value.trim().is_empty() {
            return Err("Email address cannot be empty".into());
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err("Email address too long".into());
        }

        let (local, domain) = value
            .rsplit_once('@')
            .ok_or_else(|| String::from("Email address must contain an @-sign"))?;

        if local.chars().count() > MAX_LOCAL_LEN {
            return Err("Email address local part too long".into());
        }
        if !LOCAL_REGEX.is_match(local) || !DOMAIN_REGEX.is_match(domain) {
            return Err("Email address of incorrect format".into());
        }

        // Normalize the domain only, mailboxes may be case sensitive
        Ok(Self(format!("{}@{}", local, domain.to_lowercase())))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for EmailAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmailAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
