use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::{Client, Collection};

use crate::db::mongo::RESERVATIONS_DB;
use crate::models::catalog::CatalogSnapshot;
use crate::models::reservation::{ReservationDraft, ReservationRecord, ReservationStatus};
use crate::services::availability_service::{AvailabilityService, DateAvailability};
use crate::services::reservation_adapter::ReservationAdapter;

#[derive(Debug)]
pub enum ReservationError {
    MissingDate,
    MissingSlot,
    InvalidMonth,
    SlotTaken,
    DateUnavailable(DateAvailability),
    InvalidStatusChange {
        from: ReservationStatus,
        to: ReservationStatus,
    },
    NotFound,
    Database(mongodb::error::Error),
}

impl std::fmt::Display for ReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationError::MissingDate => write!(f, "A reservation date is required"),
            ReservationError::MissingSlot => write!(f, "A time slot is required"),
            ReservationError::InvalidMonth => write!(f, "Invalid month"),
            ReservationError::SlotTaken => {
                write!(f, "The selected time slot is already reserved for that date")
            }
            ReservationError::DateUnavailable(class) => {
                write!(f, "The selected date is not bookable ({:?})", class)
            }
            ReservationError::InvalidStatusChange { from, to } => write!(
                f,
                "A {} reservation cannot change to {}",
                from.as_str(),
                to.as_str()
            ),
            ReservationError::NotFound => write!(f, "Reservation not found"),
            ReservationError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for ReservationError {}

impl From<mongodb::error::Error> for ReservationError {
    fn from(err: mongodb::error::Error) -> Self {
        ReservationError::Database(err)
    }
}

pub struct ReservationService;

impl ReservationService {
    pub fn collection(client: &Client) -> Collection<ReservationRecord> {
        client.database(RESERVATIONS_DB).collection("Reservations")
    }

    /// All reservations still holding a slot on `date`. Dates are persisted
    /// as day-only ISO strings, so equality needs no time normalization.
    pub async fn active_on_date(
        client: &Client,
        date: NaiveDate,
    ) -> Result<Vec<ReservationRecord>, ReservationError> {
        let cursor = Self::collection(client)
            .find(doc! {
                "date": date.to_string(),
                "status": { "$in": ["pending", "confirmed"] },
            })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Every reservation of one calendar month, any status. ISO day strings
    /// order lexicographically, so a string range covers the month.
    pub async fn in_month(
        client: &Client,
        year: i32,
        month: u32,
    ) -> Result<Vec<ReservationRecord>, ReservationError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ReservationError::InvalidMonth)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(ReservationError::InvalidMonth)?;

        let cursor = Self::collection(client)
            .find(doc! {
                "date": {
                    "$gte": first.to_string(),
                    "$lt": next_month.to_string(),
                },
            })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Validate and persist a new reservation. The slot is re-checked here
    /// against current data; a booking that landed between the form's
    /// availability render and this call surfaces as `SlotTaken`.
    pub async fn create(
        client: &Client,
        draft: &ReservationDraft,
        catalog: &CatalogSnapshot,
        today: NaiveDate,
        min_lead_days: Option<i64>,
    ) -> Result<ReservationRecord, ReservationError> {
        let mut record = ReservationAdapter::to_record(draft, catalog)?;

        let existing = Self::active_on_date(client, record.date).await?;
        Self::check_bookable(&record, &existing, today, min_lead_days)?;

        let insert_result = Self::collection(client).insert_one(&record).await?;
        record.id = insert_result.inserted_id.as_object_id();
        Ok(record)
    }

    /// Re-normalize an edited draft and replace the stored record, keeping
    /// id, status and creation stamp. The slot re-check ignores the record
    /// being edited so an unchanged slot never conflicts with itself.
    pub async fn update(
        client: &Client,
        id: ObjectId,
        draft: &ReservationDraft,
        catalog: &CatalogSnapshot,
        today: NaiveDate,
        min_lead_days: Option<i64>,
    ) -> Result<ReservationRecord, ReservationError> {
        let collection = Self::collection(client);
        let current = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(ReservationError::NotFound)?;

        let mut record = ReservationAdapter::to_record(draft, catalog)?;
        record.id = Some(id);
        record.status = current.status;
        record.created_at = current.created_at;
        record.updated_at = Some(DateTime::now());

        let mut existing = Self::active_on_date(client, record.date).await?;
        existing.retain(|r| r.id != Some(id));
        Self::check_bookable(&record, &existing, today, min_lead_days)?;

        collection.replace_one(doc! { "_id": id }, &record).await?;
        Ok(record)
    }

    pub async fn change_status(
        client: &Client,
        id: ObjectId,
        next: ReservationStatus,
    ) -> Result<ReservationRecord, ReservationError> {
        let collection = Self::collection(client);
        let current = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(ReservationError::NotFound)?;

        if !current.status.can_transition_to(next) {
            return Err(ReservationError::InvalidStatusChange {
                from: current.status,
                to: next,
            });
        }

        collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "status": next.as_str(),
                    "updated_at": DateTime::now(),
                }},
            )
            .await?;

        Ok(ReservationRecord {
            status: next,
            ..current
        })
    }

    fn check_bookable(
        record: &ReservationRecord,
        existing: &[ReservationRecord],
        today: NaiveDate,
        min_lead_days: Option<i64>,
    ) -> Result<(), ReservationError> {
        match AvailabilityService::date_availability(record.date, existing, today, min_lead_days) {
            DateAvailability::Past => {
                return Err(ReservationError::DateUnavailable(DateAvailability::Past))
            }
            DateAvailability::TooSoon => {
                return Err(ReservationError::DateUnavailable(DateAvailability::TooSoon))
            }
            _ => {}
        }

        let slot = record
            .time_slot()
            .ok_or(ReservationError::MissingSlot)?;
        let open = AvailabilityService::available_slot_options(Some(record.date), existing);
        if !open.contains(&slot) {
            return Err(ReservationError::SlotTaken);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::TimeSlot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_on(on: NaiveDate, slot: TimeSlot, status: ReservationStatus) -> ReservationRecord {
        ReservationRecord {
            id: Some(ObjectId::new()),
            package_id: None,
            date: on,
            start_time: slot.start_time(),
            end_time: slot.end_time(),
            status,
            food_option_id: None,
            theme_id: None,
            mampara_id: None,
            extras: Vec::new(),
            celebrant_name: "Valentina".to_string(),
            celebrant_age: Some(6),
            comments: None,
            total: 2000.0,
            manual_total: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_check_bookable_rejects_taken_slot() {
        let d = date(2025, 7, 19);
        let today = date(2025, 7, 1);
        let candidate = record_on(d, TimeSlot::Morning, ReservationStatus::Pending);
        let existing = vec![record_on(d, TimeSlot::Morning, ReservationStatus::Confirmed)];

        assert!(matches!(
            ReservationService::check_bookable(&candidate, &existing, today, Some(7)),
            Err(ReservationError::SlotTaken)
        ));

        // the other slot is still fine
        let afternoon = record_on(d, TimeSlot::Afternoon, ReservationStatus::Pending);
        assert!(ReservationService::check_bookable(&afternoon, &existing, today, Some(7)).is_ok());
    }

    #[test]
    fn test_check_bookable_rejects_past_and_too_soon() {
        let today = date(2025, 7, 10);

        let past = record_on(date(2025, 7, 5), TimeSlot::Morning, ReservationStatus::Pending);
        assert!(matches!(
            ReservationService::check_bookable(&past, &[], today, Some(7)),
            Err(ReservationError::DateUnavailable(DateAvailability::Past))
        ));

        let soon = record_on(date(2025, 7, 13), TimeSlot::Morning, ReservationStatus::Pending);
        assert!(matches!(
            ReservationService::check_bookable(&soon, &[], today, Some(7)),
            Err(ReservationError::DateUnavailable(DateAvailability::TooSoon))
        ));

        // admin flow books the same date without the lead window
        assert!(ReservationService::check_bookable(&soon, &[], today, None).is_ok());
    }
}
