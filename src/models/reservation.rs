use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub id: i64,
    pub provider_id: String,
    pub post_id: String,
    pub client_id: String,
    pub answered: bool,
    pub paid: bool,
}

/// Payload for creating or updating a reservation. Identity and the two
/// status flags are owned by the service, never by the caller.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReservationRequest {
    pub provider_id: String,
    pub post_id: String,
    pub client_id: String,
}

impl Reservation {
    pub fn from_request(id: i64, request: &ReservationRequest) -> Self {
        Self {
            id,
            provider_id: request.provider_id.clone(),
            post_id: request.post_id.clone(),
            client_id: request.client_id.clone(),
            answered: false,
            paid: false,
        }
    }

    /// Applies an update payload onto the stored record. `id`, `answered`
    /// and `paid` survive the update untouched.
    pub fn apply(&mut self, request: ReservationRequest) {
        self.provider_id = request.provider_id;
        self.post_id = request.post_id;
        self.client_id = request.client_id;
    }
}
