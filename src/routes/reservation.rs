use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use futures::TryStreamExt;
use bson::{doc, oid::ObjectId, Document};
use mongodb::Client;
use std::sync::Arc;

use crate::models::reservation::{ReservationDraft, ReservationRecord, ReservationStatus};
use crate::services::availability_service::MIN_LEAD_DAYS;
use crate::services::catalog_service::CatalogService;
use crate::services::pricing_service::PricingService;
use crate::services::reservation_adapter::ReservationAdapter;
use crate::services::reservation_service::{ReservationError, ReservationService};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    date: Option<String>,
    status: Option<String>,
    search: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct WriteQuery {
    admin: Option<bool>,
}

#[derive(serde::Deserialize)]
pub struct StatusInput {
    status: ReservationStatus,
}

fn error_response(err: ReservationError) -> HttpResponse {
    match &err {
        ReservationError::MissingDate
        | ReservationError::MissingSlot
        | ReservationError::InvalidMonth => HttpResponse::BadRequest().body(err.to_string()),
        ReservationError::SlotTaken | ReservationError::InvalidStatusChange { .. } => {
            HttpResponse::Conflict().body(err.to_string())
        }
        ReservationError::DateUnavailable(_) => HttpResponse::BadRequest().body(err.to_string()),
        ReservationError::NotFound => HttpResponse::NotFound().body(err.to_string()),
        ReservationError::Database(db_err) => {
            eprintln!("Reservation database error: {:?}", db_err);
            HttpResponse::InternalServerError().body("Failed to process reservation")
        }
    }
}

fn lead_days_for(admin: Option<bool>) -> Option<i64> {
    if admin.unwrap_or(false) {
        None
    } else {
        Some(MIN_LEAD_DAYS)
    }
}

/*
    POST /api/reservations/quote

    Runs the pricing engine over the submitted draft and returns the
    itemized breakdown. This is the form's recompute call; nothing is
    persisted.
*/
pub async fn quote(data: web::Data<Arc<Client>>, input: web::Json<ReservationDraft>) -> impl Responder {
    let client = data.into_inner();

    let catalog = match CatalogService::load_snapshot(&client).await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load catalog snapshot: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load catalog");
        }
    };

    HttpResponse::Ok().json(PricingService::quote(&input, &catalog))
}

/*
    POST /api/reservations[?admin=true]
*/
pub async fn create_reservation(
    data: web::Data<Arc<Client>>,
    input: web::Json<ReservationDraft>,
    params: web::Query<WriteQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let draft = input.into_inner();

    let catalog = match CatalogService::load_snapshot(&client).await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load catalog snapshot: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load catalog");
        }
    };

    let today = Local::now().date_naive();
    match ReservationService::create(&client, &draft, &catalog, today, lead_days_for(params.admin))
        .await
    {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => error_response(err),
    }
}

/*
    GET /api/reservations?date=YYYY-MM-DD&status=pending&search=name
*/
pub async fn get_reservations(
    data: web::Data<Arc<Client>>,
    params: web::Query<ListQuery>,
) -> impl Responder {
    let client = data.into_inner();

    let mut filter = Document::new();
    if let Some(date) = &params.date {
        filter.insert("date", date.clone());
    }
    if let Some(status) = &params.status {
        match status.as_str() {
            "pending" | "confirmed" | "cancelled" | "completed" => {
                filter.insert("status", status.clone());
            }
            _ => return HttpResponse::BadRequest().body("Invalid status filter"),
        }
    }
    if let Some(search) = &params.search {
        if !search.is_empty() {
            filter.insert(
                "celebrant_name",
                doc! {
                    "$regex": format!("^{}", regex::escape(search)),
                    "$options": "i",
                },
            );
        }
    }

    let sort_options = doc! { "date": -1 };
    match ReservationService::collection(&client)
        .find(filter)
        .sort(sort_options)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<ReservationRecord>>().await {
            Ok(reservations) => HttpResponse::Ok().json(reservations),
            Err(err) => {
                eprintln!("Failed to collect reservations: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect reservations")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve reservations: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve reservations")
        }
    }
}

/*
    GET /api/reservations/{id}

    Returns the stored record together with its hydrated draft so the edit
    form opens pre-filled, even when some catalog ids have gone stale.
*/
pub async fn get_reservation_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let record = match ReservationService::collection(&client)
        .find_one(doc! { "_id": id })
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => return HttpResponse::NotFound().body("Reservation not found"),
        Err(err) => {
            eprintln!("Failed to retrieve reservation: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve reservation");
        }
    };

    let catalog = match CatalogService::load_snapshot(&client).await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load catalog snapshot: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load catalog");
        }
    };

    let draft = ReservationAdapter::hydrate(&record, &catalog);
    HttpResponse::Ok().json(serde_json::json!({
        "reservation": record,
        "draft": draft,
    }))
}

/*
    PUT /api/reservations/{id}[?admin=true]
*/
pub async fn update_reservation(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<ReservationDraft>,
    params: web::Query<WriteQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };
    let draft = input.into_inner();

    let catalog = match CatalogService::load_snapshot(&client).await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load catalog snapshot: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load catalog");
        }
    };

    let today = Local::now().date_naive();
    match ReservationService::update(
        &client,
        id,
        &draft,
        &catalog,
        today,
        lead_days_for(params.admin),
    )
    .await
    {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => error_response(err),
    }
}

/*
    PUT /api/reservations/{id}/status
*/
pub async fn change_reservation_status(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<StatusInput>,
) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match ReservationService::change_status(&client, id, input.status).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => error_response(err),
    }
}
