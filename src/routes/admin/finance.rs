use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use std::sync::Arc;

use crate::services::finance_service::FinanceService;
use crate::services::reservation_service::ReservationService;

#[derive(serde::Deserialize)]
pub struct SummaryQuery {
    year: i32,
    month: u32,
}

/*
    /api/admin/finance/summary?year=YYYY&month=M
*/
pub async fn get_summary(
    data: web::Data<Arc<Client>>,
    params: web::Query<SummaryQuery>,
) -> impl Responder {
    let client = data.into_inner();

    if params.month < 1 || params.month > 12 {
        return HttpResponse::BadRequest().body("Invalid month, expected 1-12");
    }

    match ReservationService::in_month(&client, params.year, params.month).await {
        Ok(reservations) => HttpResponse::Ok().json(FinanceService::summarize(
            params.year,
            params.month,
            &reservations,
        )),
        Err(err) => {
            eprintln!(
                "Failed to fetch reservations for {}-{}: {:?}",
                params.year, params.month, err
            );
            HttpResponse::InternalServerError().body("Failed to build finance summary")
        }
    }
}
