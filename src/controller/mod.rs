use actix_web::{web, HttpResponse, Responder};

use serde::Serialize;

pub mod bookings;
pub mod contacts;
mod form;
pub mod newsletter;

/// Maximum number of records returned by list endpoints
#[derive(Debug, Clone, Copy)]
pub struct ListLimit(pub usize);

/// Payload of the API root
#[derive(Debug, Clone, Serialize)]
pub struct Greeting {
    message: String,
}

impl Greeting {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fixed greeting at the API root
#[tracing::instrument(name = "API root", skip(greeting))]
pub async fn root(greeting: web::Data<Greeting>) -> impl Responder {
    HttpResponse::Ok().json(greeting.get_ref())
}
