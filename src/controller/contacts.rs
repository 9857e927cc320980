use actix_web::dev::HttpServiceFactory;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::Value;

use crate::controller::form::{self, present, FormParser};
use crate::controller::ListLimit;
use crate::error::{RestError, RestResult};
use crate::model::{Contact, NewContact};
use crate::repo::RecordRepo;
use crate::store::{Document, DocumentStore};

#[derive(Debug, Deserialize)]
pub struct NewContactBody {
    #[serde(default, deserialize_with = "present")]
    name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    phone: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    message: Option<Value>,
}

impl TryFrom<NewContactBody> for NewContact {
    type Error = RestError;

    fn try_from(body: NewContactBody) -> RestResult<Self> {
        let mut form = FormParser::new();

        let name = form.required("name", body.name);
        let email = form.email("email", body.email);
        let phone = form.optional("phone", body.phone);
        let message = form.required("message", body.message);

        form.finish(|| {
            Some(NewContact {
                name: name?,
                email: email?,
                phone,
                message: message?,
            })
        })
    }
}

#[tracing::instrument(name = "Create a contact message", skip(store, body))]
#[post("")]
async fn create(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Document>,
) -> RestResult<impl Responder> {
    let new_contact: NewContact =
        form::from_object::<NewContactBody>(body.into_inner())?.try_into()?;
    let contact = Contact::from(new_contact);

    RecordRepo::insert(store.get_ref(), &contact).await?;

    tracing::info!(contact.id = %contact.id, "Stored contact message");
    Ok(HttpResponse::Ok().json(contact))
}

#[tracing::instrument(name = "List contact messages", skip(store, limit))]
#[get("")]
async fn list(
    store: web::Data<dyn DocumentStore>,
    limit: web::Data<ListLimit>,
) -> RestResult<impl Responder> {
    let contacts: Vec<Contact> = RecordRepo::fetch_all(store.get_ref(), limit.0).await?;

    Ok(HttpResponse::Ok().json(contacts))
}

/// Contact API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/contact").service(create).service(list)
}
