use chrono::{Datelike, Weekday};
use mongodb::bson::DateTime;

use crate::models::catalog::CatalogSnapshot;
use crate::models::reservation::{
    DraftExtra, ExtraSelection, ReservationDraft, ReservationRecord, ReservationStatus,
};
use crate::models::selection::Selection;
use crate::services::pricing_service::PricingService;
use crate::services::reservation_service::ReservationError;

/// Translates between the form-shaped draft (rich selections, slot labels,
/// lenient extras) and the flat persisted record (bare ids, explicit
/// start/end times), in both directions.
pub struct ReservationAdapter;

impl ReservationAdapter {
    /// Normalize a draft into the persisted shape. Only a missing date or
    /// slot can fail; every other malformed field is dropped or priced to
    /// zero rather than aborting the submission.
    pub fn to_record(
        draft: &ReservationDraft,
        catalog: &CatalogSnapshot,
    ) -> Result<ReservationRecord, ReservationError> {
        let date = draft.date.ok_or(ReservationError::MissingDate)?;
        let slot = draft.time_slot.ok_or(ReservationError::MissingSlot)?;

        // An extra whose id fails to parse, or whose quantity never coerced
        // to >= 1, is not sent malformed; it is dropped here.
        let extras: Vec<ExtraSelection> = draft
            .extras
            .iter()
            .filter_map(|entry: &DraftExtra| {
                let id = entry.object_id()?;
                let quantity = entry.quantity.filter(|q| *q >= 1)?;
                Some(ExtraSelection { id, quantity })
            })
            .collect();

        // The mampara only persists while it still belongs to the selected
        // theme.
        let mampara_id = if draft.mampara_matches_theme(catalog) {
            draft.mampara.as_ref().and_then(|s| s.object_id())
        } else {
            None
        };

        let total = if draft.manual_total {
            draft.total.unwrap_or_else(|| PricingService::total(draft, catalog))
        } else {
            PricingService::total(draft, catalog)
        };

        let now = DateTime::now();

        Ok(ReservationRecord {
            id: None,
            package_id: draft.package.as_ref().and_then(|s| s.object_id()),
            date,
            start_time: slot.start_time(),
            end_time: slot.end_time(),
            status: ReservationStatus::Pending,
            food_option_id: draft.food_option.as_ref().and_then(|s| s.object_id()),
            theme_id: draft.theme_object_id(),
            mampara_id,
            extras,
            celebrant_name: draft.celebrant_name.trim().to_string(),
            celebrant_age: draft.celebrant_age,
            comments: draft.comments.clone(),
            total: PricingService::round_currency(total),
            manual_total: draft.manual_total,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    /// Rebuild the form-shaped draft from a persisted record for edit mode.
    /// Ids with no catalog match are left unselected rather than failing
    /// hydration; the catalog may have drifted since booking time.
    pub fn hydrate(record: &ReservationRecord, catalog: &CatalogSnapshot) -> ReservationDraft {
        let package = record
            .package_id
            .and_then(|id| catalog.package(&id).map(|p| (id, p.clone())))
            .map(|(id, p)| {
                // embed the price that applies on the booked day
                let price = match record.date.weekday() {
                    Weekday::Fri | Weekday::Sat | Weekday::Sun => p.price_weekend,
                    _ => p.price_weekday,
                };
                Selection::rich(id, p.name, price)
            });

        let food_option = record
            .food_option_id
            .and_then(|id| catalog.food_option(&id).map(|f| (id, f.clone())))
            .map(|(id, f)| Selection::rich(id, f.name, f.extra_price));

        let theme = record
            .theme_id
            .and_then(|id| catalog.theme(&id).map(|t| (id, t.clone())))
            .map(|(id, t)| Selection::Rich {
                id: id.to_hex(),
                label: Some(t.name),
                price: None,
            });

        let mampara = record
            .mampara_id
            .and_then(|id| catalog.mampara(&id).map(|m| (id, m.clone())))
            .map(|(id, m)| Selection::rich(id, format!("{} piezas", m.pieces), m.price));

        let extras = record
            .extras
            .iter()
            .map(|e| DraftExtra {
                id: e.id.to_hex(),
                quantity: Some(e.quantity),
            })
            .collect();

        ReservationDraft {
            package,
            date: Some(record.date),
            time_slot: record.time_slot(),
            food_option,
            theme,
            mampara,
            extras,
            celebrant_name: record.celebrant_name.clone(),
            celebrant_age: record.celebrant_age,
            comments: record.comments.clone(),
            total: Some(record.total),
            manual_total: record.manual_total,
        }
    }
}
