//! Order assignment
//!
//! Turns an accepted submission into a balloon order. The problem's color
//! and the author's seat come from the contest layouts; the order goes to
//! the volunteer servicing that room with the fewest open orders. Missing
//! layout data or an unstaffed room routes the order to the contest admin.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    db::Store,
    error::AppResult,
    layout::{ColorLayout, LayoutError, TeamLayout},
    models::{Contest, NewOrder, Order, Submission, VolunteerLoad},
};

/// Per-room locks serializing the count-then-assign step
#[derive(Debug, Clone, Default)]
pub struct RoomLocks {
    rooms: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room`
    pub async fn lock(&self, room: &str) -> OwnedMutexGuard<()> {
        let room_lock = {
            let mut rooms = self.rooms.lock().await;
            rooms.entry(room.to_string()).or_default().clone()
        };
        room_lock.lock_owned().await
    }
}

/// Order assignment service
pub struct OrderAssignmentService;

impl OrderAssignmentService {
    /// Create the order for an accepted submission.
    ///
    /// Callers check beforehand that the (author, problem) pair has no order yet.
    pub async fn assign(
        store: &dyn Store,
        locks: &RoomLocks,
        contest: &Contest,
        submission: &Submission,
    ) -> AppResult<Order> {
        let colors = Self::stored_layout(contest, ColorLayout::parse_lenient(&contest.colors_layout));
        let teams = Self::stored_layout(contest, TeamLayout::parse_lenient(&contest.teams_layout));

        let color = colors.color_for(&submission.problem_index);
        let seat = teams.seat_for(&submission.author);

        let mut order = NewOrder {
            submission_id: submission.id,
            volunteer_id: contest.admin_id,
            ..NewOrder::default()
        };
        if let Some(color) = color {
            order.balloon_color = color.to_string();
        }
        if let Some(seat) = seat {
            order.room = seat.room.clone();
            order.place = seat.place.clone();
            order.author_name = seat.display_name.clone();
        }

        let created = match (color, seat) {
            (Some(_), Some(seat)) => {
                let _guard = locks.lock(&seat.room).await;
                let loads = store.volunteer_loads().await?;

                match Self::least_loaded(&loads, &seat.room) {
                    Some(volunteer_id) => order.volunteer_id = volunteer_id,
                    None => tracing::warn!(
                        contest = %contest.id,
                        room = %seat.room,
                        "No volunteer services room, assigning to contest admin"
                    ),
                }
                store.create_order(&order).await?
            }
            _ => {
                tracing::warn!(
                    contest = %contest.id,
                    author = %submission.author,
                    problem = %submission.problem_index,
                    color_found = color.is_some(),
                    seat_found = seat.is_some(),
                    "Layout data missing, assigning to contest admin"
                );
                store.create_order(&order).await?
            }
        };

        tracing::info!(
            contest = %contest.id,
            order = %created.id,
            submission = submission.external_id,
            volunteer = %created.volunteer_id,
            room = %created.room,
            color = %created.balloon_color,
            "Order created"
        );

        Ok(created)
    }

    /// Volunteer servicing `room` with the fewest open orders; ties go to
    /// the earliest registered volunteer
    pub fn least_loaded(loads: &[VolunteerLoad], room: &str) -> Option<Uuid> {
        loads
            .iter()
            .filter(|load| load.volunteer.services_room(room))
            .min_by(|a, b| {
                a.open_orders
                    .cmp(&b.open_orders)
                    .then(a.volunteer.created_at.cmp(&b.volunteer.created_at))
                    .then(a.volunteer.id.cmp(&b.volunteer.id))
            })
            .map(|load| load.volunteer.id)
    }

    // Malformed stored lines are skipped; the rest of the layout still resolves.
    fn stored_layout<T>(contest: &Contest, (layout, skipped): (T, Vec<LayoutError>)) -> T {
        for err in &skipped {
            tracing::error!(contest = %contest.id, error = %err, "Skipping malformed stored layout line");
        }
        layout
    }
}
