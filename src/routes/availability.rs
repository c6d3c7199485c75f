use actix_web::{web, HttpResponse, Responder};
use chrono::{Datelike, Local, NaiveDate};
use mongodb::Client;
use serde::Serialize;
use std::sync::Arc;

use crate::models::reservation::TimeSlot;
use crate::services::availability_service::{
    AvailabilityService, DateAvailability, SlotBooking, MIN_LEAD_DAYS,
};
use crate::services::reservation_service::ReservationService;

#[derive(serde::Deserialize)]
pub struct DateQuery {
    date: String,
    admin: Option<bool>,
}

#[derive(serde::Deserialize)]
pub struct MonthQuery {
    year: i32,
    month: u32,
    admin: Option<bool>,
}

#[derive(Serialize)]
struct DateAvailabilityResponse {
    date: NaiveDate,
    availability: DateAvailability,
    slots_booked: SlotBooking,
    available_slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
struct DayClassification {
    date: NaiveDate,
    availability: DateAvailability,
}

#[derive(Serialize)]
struct MonthAvailabilityResponse {
    year: i32,
    month: u32,
    days: Vec<DayClassification>,
}

// The admin flow skips the customer lead-time window.
fn lead_days_for(admin: Option<bool>) -> Option<i64> {
    if admin.unwrap_or(false) {
        None
    } else {
        Some(MIN_LEAD_DAYS)
    }
}

/*
    /api/reservations/availability?date=YYYY-MM-DD[&admin=true]
*/
pub async fn get_date_availability(
    data: web::Data<Arc<Client>>,
    params: web::Query<DateQuery>,
) -> impl Responder {
    let client = data.into_inner();

    let date = match NaiveDate::parse_from_str(&params.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return HttpResponse::BadRequest().body("Invalid date, expected YYYY-MM-DD"),
    };

    let reservations = match ReservationService::active_on_date(&client, date).await {
        Ok(reservations) => reservations,
        Err(err) => {
            eprintln!("Failed to fetch reservations for {}: {:?}", date, err);
            return HttpResponse::InternalServerError().body("Failed to check availability");
        }
    };

    let today = Local::now().date_naive();
    let response = DateAvailabilityResponse {
        date,
        availability: AvailabilityService::date_availability(
            date,
            &reservations,
            today,
            lead_days_for(params.admin),
        ),
        slots_booked: AvailabilityService::slots_booked_for_date(date, &reservations),
        available_slots: AvailabilityService::available_slot_options(Some(date), &reservations),
    };

    HttpResponse::Ok().json(response)
}

/*
    /api/reservations/availability/month?year=YYYY&month=M[&admin=true]

    One fetch for the whole month, then every day classified in memory for
    the calendar view.
*/
pub async fn get_month_availability(
    data: web::Data<Arc<Client>>,
    params: web::Query<MonthQuery>,
) -> impl Responder {
    let client = data.into_inner();

    if params.month < 1 || params.month > 12 {
        return HttpResponse::BadRequest().body("Invalid month, expected 1-12");
    }

    let reservations = match ReservationService::in_month(&client, params.year, params.month).await
    {
        Ok(reservations) => reservations,
        Err(err) => {
            eprintln!(
                "Failed to fetch reservations for {}-{}: {:?}",
                params.year, params.month, err
            );
            return HttpResponse::InternalServerError().body("Failed to check availability");
        }
    };

    let today = Local::now().date_naive();
    let lead_days = lead_days_for(params.admin);

    let mut days = Vec::new();
    let mut cursor = NaiveDate::from_ymd_opt(params.year, params.month, 1);
    while let Some(date) = cursor {
        if date.month() != params.month {
            break;
        }
        days.push(DayClassification {
            date,
            availability: AvailabilityService::date_availability(
                date,
                &reservations,
                today,
                lead_days,
            ),
        });
        cursor = date.succ_opt();
    }

    HttpResponse::Ok().json(MonthAvailabilityResponse {
        year: params.year,
        month: params.month,
        days,
    })
}
