use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use super::Record;
use crate::domain::{timestamp, EmailAddress};
use crate::store::Collection;

/// New contact message request
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub message: String,
}

/// Stored contact message record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub message: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl From<NewContact> for Contact {
    fn from(new: NewContact) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            message: new.message,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for Contact {
    const COLLECTION: Collection = Collection::Contacts;
}
