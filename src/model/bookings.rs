use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use super::Record;
use crate::domain::{timestamp, EmailAddress};
use crate::store::Collection;

/// New booking inquiry request
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub event_type: String,
    /// Free-form, as entered by the client
    pub event_date: String,
    pub booth_type: String,
    pub package_type: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

/// Stored booking inquiry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub event_type: String,
    pub event_date: String,
    pub booth_type: String,
    pub package_type: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl From<NewBooking> for Booking {
    fn from(new: NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            event_type: new.event_type,
            event_date: new.event_date,
            booth_type: new.booth_type,
            package_type: new.package_type,
            location: new.location,
            message: new.message,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for Booking {
    const COLLECTION: Collection = Collection::Bookings;
}
