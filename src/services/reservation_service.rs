use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::models::reservation::{Reservation, ReservationRequest};
use crate::repositories::ReservationStore;

/// What a payment attempt did to the reservation. Callers pick their status
/// code off the variant instead of re-reading the paid flag afterwards.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    Paid(Reservation),
    Unchanged(Reservation),
}

pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, request: ReservationRequest) -> ServiceResult<Reservation> {
        validate_request(&request)?;

        let reservation = self.store.insert(&request).await?;
        Ok(reservation)
    }

    pub async fn get_by_id(&self, reservation_id: i64) -> ServiceResult<Option<Reservation>> {
        let reservation = self.store.find_by_id(reservation_id).await?;
        Ok(reservation)
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Reservation>> {
        let reservations = self.store.find_all().await?;
        Ok(reservations)
    }

    pub async fn get_all_by_provider_id(&self, provider_id: &str) -> ServiceResult<Vec<Reservation>> {
        let reservations = self.store.find_all_by_provider_id(provider_id).await?;
        Ok(reservations)
    }

    pub async fn get_all_by_post_id(&self, post_id: &str) -> ServiceResult<Vec<Reservation>> {
        let reservations = self.store.find_all_by_post_id(post_id).await?;
        Ok(reservations)
    }

    pub async fn get_all_by_client_id(&self, client_id: &str) -> ServiceResult<Vec<Reservation>> {
        let reservations = self.store.find_all_by_client_id(client_id).await?;
        Ok(reservations)
    }

    pub async fn update_reservation(
        &self,
        reservation_id: i64,
        request: ReservationRequest,
    ) -> ServiceResult<Reservation> {
        validate_request(&request)?;

        let mut reservation = self.require(reservation_id).await?;
        reservation.apply(request);
        self.store.update(&reservation).await?;
        Ok(reservation)
    }

    /// Removes the reservation and hands back its last persisted state.
    /// The record must exist before the delete is ever issued.
    pub async fn reject_reservation(&self, reservation_id: i64) -> ServiceResult<Reservation> {
        let reservation = self.require(reservation_id).await?;
        self.store.delete(reservation_id).await?;
        Ok(reservation)
    }

    pub async fn mark_reservation_as_answered(
        &self,
        reservation_id: i64,
    ) -> ServiceResult<Reservation> {
        let mut reservation = self.require(reservation_id).await?;
        reservation.answered = true;
        self.store.update(&reservation).await?;
        Ok(reservation)
    }

    /// Paying an already-paid reservation is a no-op, not an error.
    pub async fn pay_reservation(&self, reservation_id: i64) -> ServiceResult<PaymentOutcome> {
        let mut reservation = self.require(reservation_id).await?;
        if reservation.paid {
            return Ok(PaymentOutcome::Unchanged(reservation));
        }

        reservation.paid = true;
        self.store.update(&reservation).await?;
        Ok(PaymentOutcome::Paid(reservation))
    }

    async fn require(&self, reservation_id: i64) -> ServiceResult<Reservation> {
        self.store
            .find_by_id(reservation_id)
            .await?
            .ok_or(ServiceError::NotFound(reservation_id))
    }
}

fn validate_request(request: &ReservationRequest) -> ServiceResult<()> {
    for (field, value) in [
        ("provider_id", &request.provider_id),
        ("post_id", &request.post_id),
        ("client_id", &request.client_id),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!(
                "{} must not be blank",
                field
            )));
        }
    }
    Ok(())
}
