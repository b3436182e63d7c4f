use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use reservation_backend::controller::reservation_controller;
use reservation_backend::models::reservation::{Reservation, ReservationRequest};
use reservation_backend::repositories::ReservationStore;
use reservation_backend::services::reservation_service::ReservationService;

/// Store backed by a plain map, so the API tests can drive the real router
/// without a database.
pub struct InMemoryReservationStore {
    reservations: Mutex<HashMap<i64, Reservation>>,
    next_id: AtomicI64,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn insert(&self, request: &ReservationRequest) -> anyhow::Result<Reservation> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let reservation = Reservation::from_request(id, request);
        self.reservations
            .lock()
            .unwrap()
            .insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, reservation_id: i64) -> anyhow::Result<Option<Reservation>> {
        Ok(self
            .reservations
            .lock()
            .unwrap()
            .get(&reservation_id)
            .cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        reservations.sort_by_key(|reservation| reservation.id);
        Ok(reservations)
    }

    async fn find_all_by_provider_id(&self, provider_id: &str) -> anyhow::Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|reservation| reservation.provider_id == provider_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|reservation| reservation.id);
        Ok(reservations)
    }

    async fn find_all_by_post_id(&self, post_id: &str) -> anyhow::Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|reservation| reservation.post_id == post_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|reservation| reservation.id);
        Ok(reservations)
    }

    async fn find_all_by_client_id(&self, client_id: &str) -> anyhow::Result<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .lock()
            .unwrap()
            .values()
            .filter(|reservation| reservation.client_id == client_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|reservation| reservation.id);
        Ok(reservations)
    }

    async fn update(&self, reservation: &Reservation) -> anyhow::Result<()> {
        let mut reservations = self.reservations.lock().unwrap();
        match reservations.get_mut(&reservation.id) {
            Some(stored) => {
                *stored = reservation.clone();
                Ok(())
            }
            None => Err(anyhow!("no reservation row with id {}", reservation.id)),
        }
    }

    async fn delete(&self, reservation_id: i64) -> anyhow::Result<()> {
        self.reservations.lock().unwrap().remove(&reservation_id);
        Ok(())
    }
}

/// Store whose every call fails, for exercising the dependency-failure path.
pub struct FailingReservationStore;

#[async_trait]
impl ReservationStore for FailingReservationStore {
    async fn insert(&self, _request: &ReservationRequest) -> anyhow::Result<Reservation> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn find_by_id(&self, _reservation_id: i64) -> anyhow::Result<Option<Reservation>> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reservation>> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn find_all_by_provider_id(&self, _provider_id: &str) -> anyhow::Result<Vec<Reservation>> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn find_all_by_post_id(&self, _post_id: &str) -> anyhow::Result<Vec<Reservation>> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn find_all_by_client_id(&self, _client_id: &str) -> anyhow::Result<Vec<Reservation>> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn update(&self, _reservation: &Reservation) -> anyhow::Result<()> {
        Err(anyhow!("connection pool exhausted"))
    }

    async fn delete(&self, _reservation_id: i64) -> anyhow::Result<()> {
        Err(anyhow!("connection pool exhausted"))
    }
}

/// Mirrors the reservation mount in `controller::router_endpoints`, with the
/// Postgres store swapped for the in-memory one.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(InMemoryReservationStore::new()))
}

pub fn build_failing_app() -> Router {
    build_app_with_store(Arc::new(FailingReservationStore))
}

fn build_app_with_store(store: Arc<dyn ReservationStore>) -> Router {
    let reservation_service = Arc::new(ReservationService::new(store));
    Router::new().nest(
        "/reservation",
        reservation_controller::router_with_service(reservation_service),
    )
}

pub async fn send_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, hyper::body::Bytes) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, bytes)
}

pub async fn create_reservation(
    app: &Router,
    provider_id: &str,
    post_id: &str,
    client_id: &str,
) -> Reservation {
    let (status, body) = send_request(
        app,
        "POST",
        "/reservation",
        Some(json!({
            "provider_id": provider_id,
            "post_id": post_id,
            "client_id": client_id,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}
