use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use super::Record;
use crate::domain::{timestamp, EmailAddress};
use crate::store::Collection;

/// New newsletter subscription request
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub email: EmailAddress,
}

/// Stored newsletter subscription record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub email: EmailAddress,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl From<NewSubscription> for Subscription {
    fn from(new: NewSubscription) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: new.email,
            timestamp: timestamp::now(),
        }
    }
}

impl Record for Subscription {
    const COLLECTION: Collection = Collection::Newsletter;
}
