//! Order service
//!
//! Read access and the single mutation (completion) offered to the
//! volunteer-facing collaborators.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{Order, SeatSummary},
};

/// Order service for business logic
pub struct OrderService;

impl OrderService {
    /// Mark an order delivered on behalf of `volunteer_id`.
    ///
    /// Only the assigned volunteer may close an order; closing it again is a no-op.
    pub async fn complete(store: &dyn Store, order_id: &Uuid, volunteer_id: &Uuid) -> AppResult<Order> {
        let order = store
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.volunteer_id != *volunteer_id {
            return Err(AppError::Forbidden(
                "Order is assigned to another volunteer".to_string(),
            ));
        }

        if order.done {
            return Ok(order);
        }

        let order = store.mark_order_done(order_id).await?;
        tracing::info!(order = %order.id, volunteer = %volunteer_id, "Order delivered");
        Ok(order)
    }

    /// Orders assigned to a volunteer
    pub async fn orders_for_volunteer(store: &dyn Store, volunteer_id: &Uuid) -> AppResult<Vec<Order>> {
        store.orders_for_volunteer(volunteer_id).await
    }

    /// Orders grouped by (room, place) with delivered and pending colors
    pub async fn seat_board(store: &dyn Store) -> AppResult<Vec<SeatSummary>> {
        let mut seats: BTreeMap<(String, String), SeatSummary> = BTreeMap::new();

        for order in store.list_orders().await? {
            let seat = seats
                .entry((order.room.clone(), order.place.clone()))
                .or_insert_with(|| SeatSummary {
                    room: order.room.clone(),
                    place: order.place.clone(),
                    author_name: order.author_name.clone(),
                    delivered: Vec::new(),
                    pending: Vec::new(),
                });

            if order.done {
                seat.delivered.push(order.balloon_color);
            } else {
                seat.pending.push(order.balloon_color);
            }
        }

        Ok(seats.into_values().collect())
    }
}
