use anyhow::anyhow;
use async_trait::async_trait;
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::tokio_postgres::{NoTls, Row};
use bb8_postgres::PostgresConnectionManager;
use tracing::warn;

use crate::models::reservation::{Reservation, ReservationRequest};
use crate::repositories::ReservationStore;

pub const RETRY_LIMIT: usize = 5;

pub struct PostgresReservationRepo {
    postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresReservationRepo {
    pub fn new(
        postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> anyhow::Result<PooledConnection<PostgresConnectionManager<NoTls>>> {
        for _ in 0..RETRY_LIMIT {
            match self.postgres_connection.get().await {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    warn!("Failed to retrieve postgres connection due to: {}, retrying in 3s", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;
                    continue;
                }
            }
        }

        return Err(anyhow!("Failed to retrieve a valid connection from postgres pool, BAILING"));
    }

    async fn find_all_by_column(
        &self,
        column: &str,
        value: &str,
    ) -> anyhow::Result<Vec<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        let stmt = format!("SELECT * FROM reservations where {} = $1;", column);

        let rows = conn
            .query(&stmt, &[&value])
            .await?;

        let mut reservations: Vec<Reservation> = Vec::new();
        for row in rows {
            let reservation = parse_row_into_reservation(row);
            reservations.push(reservation);
        }
        Ok(reservations)
    }
}

#[async_trait]
impl ReservationStore for PostgresReservationRepo {
    async fn insert(&self, request: &ReservationRequest) -> anyhow::Result<Reservation> {
        let conn = self.get_postgres_connection().await?;
        let stmt = "INSERT INTO reservations (provider_id, post_id, client_id, answered, paid) \
            VALUES ($1, $2, $3, false, false) RETURNING id;";

        let row = conn
            .query_one(stmt, &[&request.provider_id, &request.post_id, &request.client_id])
            .await?;

        Ok(Reservation::from_request(row.get("id"), request))
    }

    async fn find_by_id(&self, reservation_id: i64) -> anyhow::Result<Option<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        let stmt = "SELECT * FROM reservations where id = $1 limit 1;";

        let rows = conn
            .query(stmt, &[&reservation_id])
            .await?;

        for row in rows {
            let reservation = parse_row_into_reservation(row);
            return Ok(Some(reservation));
        }
        Ok(None)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reservation>> {
        let conn = self.get_postgres_connection().await?;
        let stmt = "SELECT * FROM reservations;";

        let rows = conn
            .query(stmt, &[])
            .await?;

        let mut reservations: Vec<Reservation> = Vec::new();
        for row in rows {
            let reservation = parse_row_into_reservation(row);
            reservations.push(reservation);
        }
        Ok(reservations)
    }

    async fn find_all_by_provider_id(&self, provider_id: &str) -> anyhow::Result<Vec<Reservation>> {
        self.find_all_by_column("provider_id", provider_id).await
    }

    async fn find_all_by_post_id(&self, post_id: &str) -> anyhow::Result<Vec<Reservation>> {
        self.find_all_by_column("post_id", post_id).await
    }

    async fn find_all_by_client_id(&self, client_id: &str) -> anyhow::Result<Vec<Reservation>> {
        self.find_all_by_column("client_id", client_id).await
    }

    async fn update(&self, reservation: &Reservation) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        let stmt = "UPDATE reservations \
            SET provider_id = $1, post_id = $2, client_id = $3, answered = $4, paid = $5 \
            where id = $6;";

        conn.execute(
            stmt,
            &[
                &reservation.provider_id,
                &reservation.post_id,
                &reservation.client_id,
                &reservation.answered,
                &reservation.paid,
                &reservation.id,
            ],
        )
        .await?;

        Ok(())
    }

    async fn delete(&self, reservation_id: i64) -> anyhow::Result<()> {
        let conn = self.get_postgres_connection().await?;
        let stmt = "DELETE FROM reservations where id = $1;";

        conn.execute(stmt, &[&reservation_id])
            .await?;

        Ok(())
    }
}

fn parse_row_into_reservation(
    row: Row,
) -> Reservation {
    Reservation {
        id: row.get("id"),
        provider_id: row.get("provider_id"),
        post_id: row.get("post_id"),
        client_id: row.get("client_id"),
        answered: row.get("answered"),
        paid: row.get("paid"),
    }
}
