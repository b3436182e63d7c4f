use async_trait::async_trait;

use crate::models::reservation::{Reservation, ReservationRequest};

pub mod postgres_repo;

/// Persistence seam for reservations. The service layer only ever talks to
/// this trait, so tests can swap the Postgres store for an in-memory one.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, request: &ReservationRequest) -> anyhow::Result<Reservation>;

    async fn find_by_id(&self, reservation_id: i64) -> anyhow::Result<Option<Reservation>>;

    async fn find_all(&self) -> anyhow::Result<Vec<Reservation>>;

    async fn find_all_by_provider_id(&self, provider_id: &str) -> anyhow::Result<Vec<Reservation>>;

    async fn find_all_by_post_id(&self, post_id: &str) -> anyhow::Result<Vec<Reservation>>;

    async fn find_all_by_client_id(&self, client_id: &str) -> anyhow::Result<Vec<Reservation>>;

    async fn update(&self, reservation: &Reservation) -> anyhow::Result<()>;

    async fn delete(&self, reservation_id: i64) -> anyhow::Result<()>;
}
