use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Set by the authentication gateway in front of this service; trusted as-is.
pub const BUYER_ID_HEADER: &str = "X-Buyer-Id";

#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedBuyer {
    pub id: Uuid,
}

impl FromRequest for AuthenticatedBuyer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(BUYER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok());

        ready(match id {
            Some(id) => Ok(AuthenticatedBuyer { id }),
            None => {
                log::warn!("Rejected {} {}: missing or invalid {BUYER_ID_HEADER}", req.method(), req.path());
                Err(AppError::Unauthorized)
            }
        })
    }
}
