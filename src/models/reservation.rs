use chrono::{NaiveDate, NaiveTime};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::catalog::CatalogSnapshot;
use crate::models::selection::Selection;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    /// Only pending and confirmed reservations hold their slot.
    pub fn blocks_slot(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Completed)
        )
    }
}

/// One of the two fixed daily booking windows. The venue runs a morning
/// party 11:00-16:00 and an afternoon party 17:00-22:00; there is nothing
/// in between.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 2] = [TimeSlot::Morning, TimeSlot::Afternoon];

    pub fn start_time(&self) -> NaiveTime {
        match self {
            TimeSlot::Morning => NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            TimeSlot::Afternoon => NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    pub fn end_time(&self) -> NaiveTime {
        match self {
            TimeSlot::Morning => NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            TimeSlot::Afternoon => NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        }
    }

    /// Recover the slot label from a stored start time.
    pub fn from_start_time(start: NaiveTime) -> Option<TimeSlot> {
        TimeSlot::ALL.into_iter().find(|s| s.start_time() == start)
    }
}

// Custom deserializer so a quantity arriving as a float (or anything that is
// not a number at all) never fails the whole payload. Non-numeric input maps
// to None and the entry is dropped downstream.
fn deserialize_lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => {
            if let Some(i) = n.as_u64() {
                Ok(Some(i as u32))
            } else if let Some(f) = n.as_f64() {
                if f >= 0.0 {
                    Ok(Some(f.ceil() as u32))
                } else {
                    Ok(None)
                }
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

/// An extras line as the form sends it: id still raw, quantity not yet
/// validated.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DraftExtra {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_quantity")]
    pub quantity: Option<u32>,
}

impl DraftExtra {
    pub fn object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.id).ok()
    }
}

/// An extras line as persisted: both fields coerced, quantity >= 1.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ExtraSelection {
    pub id: ObjectId,
    pub quantity: u32,
}

/// The persisted reservation. `date` is day-only and slots are stored as
/// explicit start/end times, so a record never carries timezone information
/// that could shift the party to the wrong day.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReservationRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub package_id: Option<ObjectId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub food_option_id: Option<ObjectId>,
    pub theme_id: Option<ObjectId>,
    pub mampara_id: Option<ObjectId>,
    #[serde(default)]
    pub extras: Vec<ExtraSelection>,
    pub celebrant_name: String,
    pub celebrant_age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub total: f32,
    #[serde(default)]
    pub manual_total: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl ReservationRecord {
    pub fn time_slot(&self) -> Option<TimeSlot> {
        TimeSlot::from_start_time(self.start_time)
    }
}

/// The in-progress reservation as the form edits it. Selections may be rich
/// or bare ids; nothing here is trusted until the adapter normalizes it.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ReservationDraft {
    pub package: Option<Selection>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub food_option: Option<Selection>,
    pub theme: Option<Selection>,
    pub mampara: Option<Selection>,
    #[serde(default)]
    pub extras: Vec<DraftExtra>,
    #[serde(default)]
    pub celebrant_name: String,
    pub celebrant_age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub total: Option<f32>,
    #[serde(default)]
    pub manual_total: bool,
}

impl ReservationDraft {
    pub fn theme_object_id(&self) -> Option<ObjectId> {
        self.theme.as_ref().and_then(|t| t.object_id())
    }

    /// True when the selected mampara belongs to the selected theme. A
    /// mampara without a resolvable catalog entry is never compatible.
    pub fn mampara_matches_theme(&self, catalog: &CatalogSnapshot) -> bool {
        let Some(mampara_sel) = &self.mampara else {
            return true;
        };
        let Some(theme_id) = self.theme_object_id() else {
            return false;
        };
        mampara_sel
            .object_id()
            .and_then(|id| catalog.mampara(&id).map(|m| m.theme_id == theme_id))
            .unwrap_or(false)
    }

    /// Switch themes. A mampara belonging to the old theme does not survive
    /// the switch.
    pub fn select_theme(&mut self, theme: Option<Selection>, catalog: &CatalogSnapshot) {
        self.theme = theme;
        if !self.mampara_matches_theme(catalog) {
            self.mampara = None;
        }
    }

    /// Upsert an extras line. A quantity below 1 removes the line entirely
    /// rather than keeping it at zero.
    pub fn set_extra_quantity(&mut self, id: &str, quantity: u32) {
        if quantity < 1 {
            self.extras.retain(|e| e.id != id);
            return;
        }
        match self.extras.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry.quantity = Some(quantity),
            None => self.extras.push(DraftExtra {
                id: id.to_string(),
                quantity: Some(quantity),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Mampara;

    fn mampara_for(theme_id: ObjectId) -> Mampara {
        Mampara {
            id: Some(ObjectId::new()),
            theme_id,
            pieces: 3,
            price: 350.0,
            active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_transitions() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_only_pending_and_confirmed_block_slots() {
        assert!(ReservationStatus::Pending.blocks_slot());
        assert!(ReservationStatus::Confirmed.blocks_slot());
        assert!(!ReservationStatus::Cancelled.blocks_slot());
        assert!(!ReservationStatus::Completed.blocks_slot());
    }

    #[test]
    fn test_slot_round_trips_through_start_time() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::from_start_time(slot.start_time()), Some(slot));
        }
        assert_eq!(
            TimeSlot::from_start_time(NaiveTime::from_hms_opt(12, 30, 0).unwrap()),
            None
        );
    }

    #[test]
    fn test_changing_theme_clears_foreign_mampara() {
        let theme_a = ObjectId::new();
        let theme_b = ObjectId::new();
        let mampara = mampara_for(theme_a);
        let catalog = CatalogSnapshot {
            mamparas: vec![mampara.clone()],
            ..Default::default()
        };

        let mut draft = ReservationDraft {
            theme: Some(Selection::from_id(theme_a)),
            mampara: Some(Selection::from_id(mampara.id.unwrap())),
            ..Default::default()
        };
        assert!(draft.mampara_matches_theme(&catalog));

        draft.select_theme(Some(Selection::from_id(theme_b)), &catalog);
        assert!(draft.mampara.is_none());
    }

    #[test]
    fn test_compatible_mampara_survives_theme_reselect() {
        let theme_a = ObjectId::new();
        let mampara = mampara_for(theme_a);
        let catalog = CatalogSnapshot {
            mamparas: vec![mampara.clone()],
            ..Default::default()
        };

        let mut draft = ReservationDraft {
            theme: Some(Selection::from_id(theme_a)),
            mampara: Some(Selection::from_id(mampara.id.unwrap())),
            ..Default::default()
        };
        draft.select_theme(Some(Selection::from_id(theme_a)), &catalog);
        assert!(draft.mampara.is_some());
    }

    #[test]
    fn test_zero_quantity_removes_extra() {
        let id = ObjectId::new().to_hex();
        let mut draft = ReservationDraft::default();
        draft.set_extra_quantity(&id, 2);
        assert_eq!(draft.extras.len(), 1);
        draft.set_extra_quantity(&id, 0);
        assert!(draft.extras.is_empty());
    }

    #[test]
    fn test_non_numeric_quantity_deserializes_to_none() {
        let entry: DraftExtra = serde_json::from_value(serde_json::json!({
            "id": ObjectId::new().to_hex(),
            "quantity": "plenty"
        }))
        .unwrap();
        assert_eq!(entry.quantity, None);

        let entry: DraftExtra = serde_json::from_value(serde_json::json!({
            "id": ObjectId::new().to_hex(),
            "quantity": 2.4
        }))
        .unwrap();
        assert_eq!(entry.quantity, Some(3));
    }
}
