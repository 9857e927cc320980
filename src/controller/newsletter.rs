use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;
use serde_json::Value;

use crate::controller::form::{self, present, FormParser};
use crate::error::{RestError, RestResult};
use crate::model::{NewSubscription, Subscription};
use crate::repo::{RecordRepo, SubscriptionRepo};
use crate::store::{Document, DocumentStore};

#[derive(Debug, Deserialize)]
pub struct NewSubscriptionBody {
    #[serde(default, deserialize_with = "present")]
    email: Option<Value>,
}

impl TryFrom<NewSubscriptionBody> for NewSubscription {
    type Error = RestError;

    fn try_from(body: NewSubscriptionBody) -> RestResult<Self> {
        let mut form = FormParser::new();
        let email = form.email("email", body.email);

        form.finish(|| Some(NewSubscription { email: email? }))
    }
}

/// Subscribe an email address to the newsletter.
///
/// The existence check is followed by the insert without a transaction,
/// the store's unique index catches a concurrent duplicate.
#[tracing::instrument(name = "Subscribe to the newsletter", skip(store, body))]
#[post("")]
async fn subscribe(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<Document>,
) -> RestResult<impl Responder> {
    let store = store.get_ref();
    let new_subscription: NewSubscription =
        form::from_object::<NewSubscriptionBody>(body.into_inner())?.try_into()?;

    if SubscriptionRepo::fetch_by_email(store, &new_subscription.email)
        .await?
        .is_some()
    {
        return Err(RestError::Conflict("Email already subscribed".into()));
    }

    let subscription = Subscription::from(new_subscription);
    RecordRepo::insert(store, &subscription).await?;

    tracing::info!(subscription.id = %subscription.id, "Stored newsletter subscription");
    Ok(HttpResponse::Ok().json(subscription))
}

/// Newsletter API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/newsletter").service(subscribe)
}
