use chrono::NaiveDate;
use serde::Serialize;

use crate::models::reservation::{ReservationRecord, TimeSlot};

/// Customer bookings must land at least this many days out. Admin flows
/// pass `None` and may book any future date.
pub const MIN_LEAD_DAYS: i64 = 7;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SlotBooking {
    pub morning_booked: bool,
    pub afternoon_booked: bool,
}

/// Calendar classification for one date. `Past` and `TooSoon` win over the
/// slot-booking state; a past date is never shown as bookable even with
/// both slots free.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateAvailability {
    Past,
    TooSoon,
    Unavailable,
    Partial,
    Available,
}

pub struct AvailabilityService;

impl AvailabilityService {
    /// Which of the two slots are held on `date`. Dates are compared at day
    /// granularity and only pending/confirmed reservations count; a
    /// cancelled or completed party never blocks a slot.
    pub fn slots_booked_for_date(
        date: NaiveDate,
        reservations: &[ReservationRecord],
    ) -> SlotBooking {
        let mut booking = SlotBooking {
            morning_booked: false,
            afternoon_booked: false,
        };

        for reservation in reservations {
            if reservation.date != date || !reservation.status.blocks_slot() {
                continue;
            }
            match TimeSlot::from_start_time(reservation.start_time) {
                Some(TimeSlot::Morning) => booking.morning_booked = true,
                Some(TimeSlot::Afternoon) => booking.afternoon_booked = true,
                None => {}
            }
        }

        booking
    }

    pub fn date_availability(
        date: NaiveDate,
        reservations: &[ReservationRecord],
        today: NaiveDate,
        min_lead_days: Option<i64>,
    ) -> DateAvailability {
        if date < today {
            return DateAvailability::Past;
        }
        if let Some(lead) = min_lead_days {
            if (date - today).num_days() < lead {
                return DateAvailability::TooSoon;
            }
        }

        let booking = Self::slots_booked_for_date(date, reservations);
        match (booking.morning_booked, booking.afternoon_booked) {
            (true, true) => DateAvailability::Unavailable,
            (false, false) => DateAvailability::Available,
            _ => DateAvailability::Partial,
        }
    }

    /// Slots still open for selection on `date`. No date selected means no
    /// options at all; the form treats that as "selection required", not as
    /// a free day.
    pub fn available_slot_options(
        date: Option<NaiveDate>,
        reservations: &[ReservationRecord],
    ) -> Vec<TimeSlot> {
        let Some(date) = date else {
            return Vec::new();
        };

        let booking = Self::slots_booked_for_date(date, reservations);
        TimeSlot::ALL
            .into_iter()
            .filter(|slot| match slot {
                TimeSlot::Morning => !booking.morning_booked,
                TimeSlot::Afternoon => !booking.afternoon_booked,
            })
            .collect()
    }
}
