use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::Value;

use crate::controller::form::{self, present, FormParser};
use crate::controller::ListLimit;
use crate::error::{RestError, RestResult};
use crate::model::{Booking, NewBooking};
use crate::repo::RecordRepo;
use crate::store::{Document, DocumentStore};

/// JSON body of a booking inquiry, unknown fields are discarded
#[derive(Debug, Deserialize)]
pub struct NewBookingBody {
    #[serde(default, deserialize_with = "present")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    phone: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    event_type: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    event_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    booth_type: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    package_type: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    location: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    message: Option<Value>,
}

impl TryFrom<NewBookingBody> for NewBooking {
    type Error = RestError;

    fn try_from(body: NewBookingBody) -> RestResult<Self> {
        let mut form = FormParser::new();

        let name = form.required("name", body.name);
        let email = form.email("email", body.email);
        let phone = form.required("phone", body.phone);
        let event_type = form.required("event_type", body.event_type);
        let event_date = form.required("event_date", body.event_date);
        let booth_type = form.required("booth_type", body.booth_type);
        let package_type = form.optional("package_type", body.package_type);
        let location = form.optional("location", body.location);
        let message = form.optional("message", body.message);

        form.finish(|| {
            Some(NewBooking {
                name: name?,
                email: email?,
                phone: phone?,
                event_type: event_type?,
                event_date: event_date?,
                booth_type: booth_type?,
                package_type,
                location,
                message,
            })
        })
    }
}

#[tracing::instrument(name = "Create a booking inquiry", skip(store, body))]
#[post("")]
async fn create(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Document>,
) -> RestResult<impl Responder> {
    let new_booking: NewBooking =
        form::from_object::<NewBookingBody>(body.into_inner())?.try_into()?;
    let booking = Booking::from(new_booking);

    RecordRepo::insert(store.get_ref(), &booking).await?;

    tracing::info!(booking.id = %booking.id, "Stored booking inquiry");
    Ok(HttpResponse::Ok().json(booking))
}

#[tracing::instrument(name = "List booking inquiries", skip(store, limit))]
#[get("")]
async fn list(
    store: web::Data<dyn DocumentStore>,
    limit: web::Data<ListLimit>,
) -> RestResult<impl Responder> {
    let bookings: Vec<Booking> = RecordRepo::fetch_all(store.get_ref(), limit.0).await?;

    Ok(HttpResponse::Ok().json(bookings))
}

/// Booking API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/bookings").service(create).service(list)
}
