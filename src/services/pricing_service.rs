use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::catalog::{CatalogSnapshot, Package};
use crate::models::reservation::{DraftExtra, ReservationDraft};
use crate::models::selection::Selection;

/// Flat surcharge added on top of the weekday price for parties booked on a
/// Tuesday. Applied once per date, never per edit: pricing is a pure
/// function of the draft, so re-selecting the same Tuesday cannot stack it.
pub const TUESDAY_SURCHARGE: f32 = 1500.0;

/// Itemized result of a pricing run, returned by the quote endpoint so the
/// form can show the breakdown next to the total.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PriceQuote {
    pub package: f32,
    pub food_option: f32,
    pub mampara: f32,
    pub extras: f32,
    pub total: f32,
}

pub struct PricingService;

impl PricingService {
    /// Base price for the selected package on the selected date: weekday
    /// price Mon-Thu, weekend price Fri-Sun, plus the Tuesday surcharge.
    /// Either side missing prices to 0.
    pub fn package_price(package: Option<&Package>, date: Option<NaiveDate>) -> f32 {
        let (Some(package), Some(date)) = (package, date) else {
            return 0.0;
        };

        match date.weekday() {
            Weekday::Tue => package.price_weekday + TUESDAY_SURCHARGE,
            Weekday::Mon | Weekday::Wed | Weekday::Thu => package.price_weekday,
            Weekday::Fri | Weekday::Sat | Weekday::Sun => package.price_weekend,
        }
    }

    pub fn food_option_price(selection: Option<&Selection>, catalog: &CatalogSnapshot) -> f32 {
        selection
            .and_then(|s| s.resolve_price(|id| catalog.food_option(id).map(|f| f.extra_price)))
            .unwrap_or(0.0)
    }

    pub fn mampara_price(selection: Option<&Selection>, catalog: &CatalogSnapshot) -> f32 {
        selection
            .and_then(|s| s.resolve_price(|id| catalog.mampara(id).map(|m| m.price)))
            .unwrap_or(0.0)
    }

    /// Sum of catalog price x quantity over the extras list. Entries with an
    /// unknown id or an uncoerced quantity contribute 0 instead of failing
    /// the computation; catalog data may still be loading when the form
    /// first recomputes.
    pub fn extras_total(extras: &[DraftExtra], catalog: &CatalogSnapshot) -> f32 {
        extras
            .iter()
            .map(|entry| {
                let price = entry
                    .object_id()
                    .and_then(|id| catalog.extra(&id).map(|e| e.price))
                    .unwrap_or(0.0);
                price * entry.quantity.unwrap_or(0) as f32
            })
            .sum()
    }

    pub fn total(draft: &ReservationDraft, catalog: &CatalogSnapshot) -> f32 {
        Self::quote(draft, catalog).total
    }

    pub fn quote(draft: &ReservationDraft, catalog: &CatalogSnapshot) -> PriceQuote {
        let package = draft
            .package
            .as_ref()
            .and_then(|s| s.object_id())
            .and_then(|id| catalog.package(&id).cloned());

        let package_price = Self::package_price(package.as_ref(), draft.date);
        let food_option_price = Self::food_option_price(draft.food_option.as_ref(), catalog);
        let mampara_price = Self::mampara_price(draft.mampara.as_ref(), catalog);
        let extras_total = Self::extras_total(&draft.extras, catalog);

        PriceQuote {
            package: Self::round_currency(package_price),
            food_option: Self::round_currency(food_option_price),
            mampara: Self::round_currency(mampara_price),
            extras: Self::round_currency(extras_total),
            total: Self::round_currency(
                package_price + food_option_price + mampara_price + extras_total,
            ),
        }
    }

    /// Round half-up to 2 decimal places.
    pub fn round_currency(amount: f32) -> f32 {
        (amount * 100.0).round() / 100.0
    }
}
