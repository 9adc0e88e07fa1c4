use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Missing or invalid buyer identity")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            e if e.is_validation() => match e {
                DomainError::ProductNotFound(_) => AppError::NotFound(e.to_string()),
                _ => AppError::BadRequest(e.to_string()),
            },
            DomainError::OrderNotFound => AppError::NotFound(e.to_string()),
            DomainError::OrderPlacementFailed(ref f) if f.is_concurrency_conflict() => {
                AppError::Conflict(format!("{e}; please retry"))
            }
            e => AppError::Internal(e.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(detail) => {
                log::error!("Request failed: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PlacementFailure;
    use actix_web::ResponseError;
    use uuid::Uuid;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        for e in [
            DomainError::EmptyOrder,
            DomainError::AddressInvalid(Uuid::new_v4()),
            DomainError::InsufficientStock {
                product_id: Uuid::new_v4(),
                name: "Rice".to_string(),
                available: 1,
                requested: 2,
            },
        ] {
            let app_err: AppError = e.into();
            assert!(matches!(app_err, AppError::BadRequest(_)), "{app_err:?}");
        }
    }

    #[test]
    fn missing_product_and_order_map_to_not_found() {
        let app_err: AppError = DomainError::ProductNotFound(Uuid::new_v4()).into();
        assert!(matches!(app_err, AppError::NotFound(_)));
        let app_err: AppError = DomainError::OrderNotFound.into();
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn stock_race_maps_to_conflict() {
        let app_err: AppError = DomainError::from(PlacementFailure::StockRace {
            product_id: Uuid::new_v4(),
            requested: 1,
        })
        .into();
        assert!(matches!(app_err, AppError::Conflict(_)));
        assert_eq!(app_err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn lock_contention_maps_to_conflict() {
        let app_err: AppError = DomainError::from(PlacementFailure::Contention {
            step: "decrement stock",
            message: "deadlock detected".to_string(),
        })
        .into();
        assert!(matches!(app_err, AppError::Conflict(_)));
        assert_eq!(app_err.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn catalog_and_storage_failures_stay_generic() {
        let app_err: AppError = DomainError::CatalogInconsistent {
            product_id: Uuid::new_v4(),
            missing: "store",
        }
        .into();
        assert!(matches!(app_err, AppError::Internal(_)));

        let app_err: AppError =
            DomainError::from(PlacementFailure::storage("insert order header", "boom")).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
