use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, delete, put};
use serde_json::json;
use crate::controller::AppState;
use crate::models::reservation::ReservationRequest;
use crate::repositories::postgres_repo::PostgresReservationRepo;
use crate::services::reservation_service::{PaymentOutcome, ReservationService};

pub fn router(app_state: AppState) -> Router {
    let reservation_service = Arc::new(ReservationService::new(Arc::new(
        PostgresReservationRepo::new(app_state.postgres_connection),
    )));

    router_with_service(reservation_service)
}

pub fn router_with_service(reservation_service: Arc<ReservationService>) -> Router {
    Router::new()
        .route("/", post(save_reservation))
        .route("/", get(get_all_reservations))
        .route("/provider/:provider_id", get(get_provider_reservations))
        .route("/post/:post_id", get(get_post_reservations))
        .route("/client/:client_id", get(get_client_reservations))
        .route("/:reservation_id", get(get_reservation_by_id))
        .route("/:reservation_id", delete(reject_reservation))
        .route("/:reservation_id", put(update_reservation))
        .route("/accept/:reservation_id", put(answer_reservation))
        .route("/pay/:reservation_id", put(pay_reservation))
        .route_layer(Extension(reservation_service))
}

pub async fn save_reservation(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Json(body): Json<ReservationRequest>,
) -> impl IntoResponse {
    let saved_reservation_res = reservation_service
        .save(body)
        .await;

    return match saved_reservation_res {
        Ok(reservation) => {
            (StatusCode::CREATED, json!(&reservation).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn get_reservation_by_id(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    let reservation_res = reservation_service
        .get_by_id(reservation_id)
        .await;

    // Absence is a normal outcome on this read path, not an error.
    return match reservation_res {
        Ok(Some(reservation)) => {
            (StatusCode::OK, json!(&reservation).to_string()).into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    };
}

pub async fn get_all_reservations(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
) -> impl IntoResponse {
    let reservations_res = reservation_service
        .get_all()
        .await;

    return match reservations_res {
        Ok(reservations) => {
            (StatusCode::OK, json!(reservations).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn get_provider_reservations(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(provider_id): Path<String>,
) -> impl IntoResponse {
    let reservations_res = reservation_service
        .get_all_by_provider_id(&provider_id)
        .await;

    return match reservations_res {
        Ok(reservations) => {
            (StatusCode::OK, json!(reservations).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn get_post_reservations(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(post_id): Path<String>,
) -> impl IntoResponse {
    let reservations_res = reservation_service
        .get_all_by_post_id(&post_id)
        .await;

    return match reservations_res {
        Ok(reservations) => {
            (StatusCode::OK, json!(reservations).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn get_client_reservations(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(client_id): Path<String>,
) -> impl IntoResponse {
    let reservations_res = reservation_service
        .get_all_by_client_id(&client_id)
        .await;

    return match reservations_res {
        Ok(reservations) => {
            (StatusCode::OK, json!(reservations).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn reject_reservation(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    let rejected_reservation_res = reservation_service
        .reject_reservation(reservation_id)
        .await;

    // The body echoes the record as it stood right before removal.
    return match rejected_reservation_res {
        Ok(reservation) => {
            (StatusCode::ACCEPTED, json!(&reservation).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn update_reservation(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(reservation_id): Path<i64>,
    Json(body): Json<ReservationRequest>,
) -> impl IntoResponse {
    let updated_reservation_res = reservation_service
        .update_reservation(reservation_id, body)
        .await;

    return match updated_reservation_res {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    };
}

pub async fn answer_reservation(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    let answered_reservation_res = reservation_service
        .mark_reservation_as_answered(reservation_id)
        .await;

    return match answered_reservation_res {
        Ok(reservation) => {
            (StatusCode::ACCEPTED, json!(&reservation).to_string()).into_response()
        }
        Err(e) => e.into_response(),
    };
}

pub async fn pay_reservation(
    Extension(reservation_service): Extension<Arc<ReservationService>>,
    Path(reservation_id): Path<i64>,
) -> impl IntoResponse {
    let payment_res = reservation_service
        .pay_reservation(reservation_id)
        .await;

    // 304 must not carry a body.
    return match payment_res {
        Ok(PaymentOutcome::Paid(reservation)) => {
            (StatusCode::ACCEPTED, json!(&reservation).to_string()).into_response()
        }
        Ok(PaymentOutcome::Unchanged(_)) => StatusCode::NOT_MODIFIED.into_response(),
        Err(e) => e.into_response(),
    };
}
