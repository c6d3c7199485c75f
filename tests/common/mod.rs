#![allow(dead_code)]

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use fiesta_api::models::catalog::{
    CatalogSnapshot, Extra, FoodOption, Mampara, Package, Theme,
};
use fiesta_api::models::reservation::{ReservationRecord, ReservationStatus, TimeSlot};

// Fixed ids so test payloads and stub handlers agree on the same catalog.
pub const PACKAGE_ID: &str = "64b000000000000000000001";
pub const FOOD_OPTION_ID: &str = "64b000000000000000000002";
pub const THEME_ID: &str = "64b000000000000000000003";
pub const MAMPARA_ID: &str = "64b000000000000000000004";
pub const EXTRA_ID: &str = "64b000000000000000000005";

pub fn oid(hex: &str) -> ObjectId {
    ObjectId::parse_str(hex).unwrap()
}

pub fn fixture_catalog() -> CatalogSnapshot {
    CatalogSnapshot {
        packages: vec![Package {
            id: Some(oid(PACKAGE_ID)),
            name: "Fiesta Total".to_string(),
            description: "Hall, tables and staff for up to 80 guests".to_string(),
            price_weekday: 2000.0,
            price_weekend: 2500.0,
            active: true,
            created_at: None,
            updated_at: None,
        }],
        food_options: vec![FoodOption {
            id: Some(oid(FOOD_OPTION_ID)),
            name: "Taquiza".to_string(),
            extra_price: 800.0,
            active: true,
            created_at: None,
            updated_at: None,
        }],
        themes: vec![Theme {
            id: Some(oid(THEME_ID)),
            name: "Dinosaurios".to_string(),
            active: true,
            photo_url: None,
            created_at: None,
            updated_at: None,
        }],
        mamparas: vec![Mampara {
            id: Some(oid(MAMPARA_ID)),
            theme_id: oid(THEME_ID),
            pieces: 3,
            price: 350.0,
            active: true,
            created_at: None,
            updated_at: None,
        }],
        extras: vec![Extra {
            id: Some(oid(EXTRA_ID)),
            name: "Piñata".to_string(),
            price: 100.0,
            active: true,
            created_at: None,
            updated_at: None,
        }],
    }
}

pub fn reservation_on(
    date: NaiveDate,
    slot: TimeSlot,
    status: ReservationStatus,
) -> ReservationRecord {
    ReservationRecord {
        id: Some(ObjectId::new()),
        package_id: Some(oid(PACKAGE_ID)),
        date,
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
