use serde::Serialize;

use crate::models::reservation::{ReservationRecord, ReservationStatus};
use crate::services::pricing_service::PricingService;

/// Monthly roll-up for the admin finances page. Revenue counts money that
/// is committed or already earned: confirmed and completed parties.
/// Cancelled totals are reported separately and never added in.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FinanceSummary {
    pub year: i32,
    pub month: u32,
    pub pending_count: u32,
    pub confirmed_count: u32,
    pub completed_count: u32,
    pub cancelled_count: u32,
    pub confirmed_revenue: f32,
    pub completed_revenue: f32,
    pub cancelled_total: f32,
    pub total_revenue: f32,
}

pub struct FinanceService;

impl FinanceService {
    pub fn summarize(year: i32, month: u32, reservations: &[ReservationRecord]) -> FinanceSummary {
        let mut summary = FinanceSummary {
            year,
            month,
            pending_count: 0,
            confirmed_count: 0,
            completed_count: 0,
            cancelled_count: 0,
            confirmed_revenue: 0.0,
            completed_revenue: 0.0,
            cancelled_total: 0.0,
            total_revenue: 0.0,
        };

        for reservation in reservations {
            match reservation.status {
                ReservationStatus::Pending => summary.pending_count += 1,
                ReservationStatus::Confirmed => {
                    summary.confirmed_count += 1;
                    summary.confirmed_revenue += reservation.total;
                }
                ReservationStatus::Completed => {
                    summary.completed_count += 1;
                    summary.completed_revenue += reservation.total;
                }
                ReservationStatus::Cancelled => {
                    summary.cancelled_count += 1;
                    summary.cancelled_total += reservation.total;
                }
            }
        }

        summary.confirmed_revenue = PricingService::round_currency(summary.confirmed_revenue);
        summary.completed_revenue = PricingService::round_currency(summary.completed_revenue);
        summary.cancelled_total = PricingService::round_currency(summary.cancelled_total);
        summary.total_revenue =
            PricingService::round_currency(summary.confirmed_revenue + summary.completed_revenue);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::TimeSlot;
    use chrono::NaiveDate;

    fn record(total: f32, status: ReservationStatus) -> ReservationRecord {
        ReservationRecord {
            id: None,
            package_id: None,
            date: NaiveDate::from_ymd_opt(2025, 7, 19).unwrap(),
            start_time: TimeSlot::Morning.start_time(),
            end_time: TimeSlot::Morning.end_time(),
            status,
            food_option_id: None,
            theme_id: None,
            mampara_id: None,
            extras: Vec::new(),
            celebrant_name: "Valentina".to_string(),
            celebrant_age: Some(6),
            comments: None,
            total,
            manual_total: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_counts_and_revenue() {
        let reservations = vec![
            record(2000.0, ReservationStatus::Pending),
            record(2500.0, ReservationStatus::Confirmed),
            record(3000.0, ReservationStatus::Confirmed),
            record(1800.0, ReservationStatus::Completed),
            record(2200.0, ReservationStatus::Cancelled),
        ];

        let summary = FinanceService::summarize(2025, 7, &reservations);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.confirmed_count, 2);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.cancelled_count, 1);
        assert_eq!(summary.confirmed_revenue, 5500.0);
        assert_eq!(summary.completed_revenue, 1800.0);
        assert_eq!(summary.cancelled_total, 2200.0);
        // cancelled money never lands in the total
        assert_eq!(summary.total_revenue, 7300.0);
    }

    #[test]
    fn test_empty_month_is_all_zero() {
        let summary = FinanceService::summarize(2025, 2, &[]);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.pending_count, 0);
    }
}
