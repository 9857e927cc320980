use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::Collection;

mod bookings;
mod contacts;
mod newsletter;

pub use bookings::{Booking, NewBooking};
pub use contacts::{Contact, NewContact};
pub use newsletter::{NewSubscription, Subscription};

/// A stored record kind living in its own document collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// The collection records of this kind are persisted in
    const COLLECTION: Collection;
}
