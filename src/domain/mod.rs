mod email_address;
pub mod timestamp;

pub use email_address::EmailAddress;
