use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use bson::doc;
use mongodb::{bson::oid::ObjectId, Client};
use std::sync::Arc;

use crate::models::catalog::Mampara;
use crate::services::catalog_service::CatalogService;

/*
    /api/catalog/packages
*/
pub async fn get_packages(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    match CatalogService::packages(&client).find(doc! { "active": true }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<_>>().await {
            Ok(packages) => HttpResponse::Ok().json(packages),
            Err(err) => {
                eprintln!("Failed to collect packages: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect packages")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve packages: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve packages")
        }
    }
}

/*
    /api/catalog/food-options
*/
pub async fn get_food_options(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    match CatalogService::food_options(&client).find(doc! { "active": true }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<_>>().await {
            Ok(food_options) => HttpResponse::Ok().json(food_options),
            Err(err) => {
                eprintln!("Failed to collect food options: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect food options")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve food options: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve food options")
        }
    }
}

/*
    /api/catalog/themes
*/
pub async fn get_themes(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    let sort_options = doc! { "name": 1 };
    match CatalogService::themes(&client)
        .find(doc! { "active": true })
        .sort(sort_options)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<_>>().await {
            Ok(themes) => HttpResponse::Ok().json(themes),
            Err(err) => {
                eprintln!("Failed to collect themes: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect themes")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve themes: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve themes")
        }
    }
}

/*
    /api/catalog/themes/{id}/mamparas

    Mamparas are only ever offered through their theme, so the selector can
    never show one that belongs elsewhere.
*/
pub async fn get_theme_mamparas(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();
    let theme_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid theme ID"),
    };

    let filter = doc! { "theme_id": theme_id, "active": true };

    match CatalogService::mamparas(&client).find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Mampara>>().await {
            Ok(mamparas) => HttpResponse::Ok().json(mamparas),
            Err(err) => {
                eprintln!("Failed to collect mamparas: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect mamparas")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve mamparas: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve mamparas")
        }
    }
}

/*
    /api/catalog/extras
*/
pub async fn get_extras(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();

    match CatalogService::extras(&client).find(doc! { "active": true }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<_>>().await {
            Ok(extras) => HttpResponse::Ok().json(extras),
            Err(err) => {
                eprintln!("Failed to collect extras: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect extras")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve extras: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve extras")
        }
    }
}
