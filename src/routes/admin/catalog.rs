use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::{Client, Collection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::db::mongo::CATALOG_DB;
use crate::models::catalog::{Extra, FoodOption, Mampara, Package, Theme};
use crate::services::catalog_service;

// One route set covers all five catalog kinds; the payload is validated by
// round-tripping it through the kind's typed model, so an entry that would
// not deserialize back out of the database can never get in.
fn collection_name(kind: &str) -> Option<&'static str> {
    match kind {
        "packages" => Some(catalog_service::PACKAGES),
        "food-options" => Some(catalog_service::FOOD_OPTIONS),
        "themes" => Some(catalog_service::THEMES),
        "mamparas" => Some(catalog_service::MAMPARAS),
        "extras" => Some(catalog_service::EXTRAS),
        _ => None,
    }
}

fn validated_document(kind: &str, payload: &serde_json::Value) -> Result<Document, String> {
    match kind {
        "packages" => typed_document::<Package>(payload),
        "food-options" => typed_document::<FoodOption>(payload),
        "themes" => typed_document::<Theme>(payload),
        "mamparas" => typed_document::<Mampara>(payload),
        "extras" => typed_document::<Extra>(payload),
        _ => Err("Unknown catalog kind".to_string()),
    }
}

fn typed_document<T: DeserializeOwned + Serialize>(
    payload: &serde_json::Value,
) -> Result<Document, String> {
    let entity: T = serde_json::from_value(payload.clone()).map_err(|e| e.to_string())?;
    let mut document = mongodb::bson::to_document(&entity).map_err(|e| e.to_string())?;
    // ids come from the path or the database, never from the body
    document.remove("_id");
    document.remove("created_at");
    document.remove("updated_at");
    Ok(document)
}

fn untyped_collection(client: &Client, name: &str) -> Collection<Document> {
    client.database(CATALOG_DB).collection(name)
}

/*
    POST /api/admin/catalog/{kind}
*/
pub async fn create_entry(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<serde_json::Value>,
) -> impl Responder {
    let client = data.into_inner();
    let kind = path.into_inner();

    let Some(name) = collection_name(&kind) else {
        return HttpResponse::NotFound().body("Unknown catalog kind");
    };

    let mut document = match validated_document(&kind, &input) {
        Ok(document) => document,
        Err(err) => return HttpResponse::BadRequest().body(format!("Invalid payload: {}", err)),
    };

    let now = DateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);

    match untyped_collection(&client, name).insert_one(&document).await {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "id": result.inserted_id.as_object_id().map(|id| id.to_hex()),
        })),
        Err(err) => {
            eprintln!("Failed to create {} entry: {:?}", kind, err);
            HttpResponse::InternalServerError().body("Failed to create catalog entry")
        }
    }
}

/*
    PUT /api/admin/catalog/{kind}/{id}
*/
pub async fn update_entry(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String, String)>,
    input: web::Json<serde_json::Value>,
) -> impl Responder {
    let client = data.into_inner();
    let (kind, id) = path.into_inner();

    let Some(name) = collection_name(&kind) else {
        return HttpResponse::NotFound().body("Unknown catalog kind");
    };
    let id: ObjectId = match ObjectId::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let mut document = match validated_document(&kind, &input) {
        Ok(document) => document,
        Err(err) => return HttpResponse::BadRequest().body(format!("Invalid payload: {}", err)),
    };
    document.insert("updated_at", DateTime::now());

    match untyped_collection(&client, name)
        .update_one(doc! { "_id": id }, doc! { "$set": document })
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Catalog entry not found");
            }
            HttpResponse::Ok().body("Catalog entry updated")
        }
        Err(err) => {
            eprintln!("Failed to update {} entry: {:?}", kind, err);
            HttpResponse::InternalServerError().body("Failed to update catalog entry")
        }
    }
}

#[derive(serde::Deserialize)]
pub struct ActiveInput {
    active: bool,
}

/*
    PUT /api/admin/catalog/{kind}/{id}/active

    Catalog entries are deactivated, never deleted: existing reservations
    keep referencing them and must still hydrate for edit mode.
*/
pub async fn set_entry_active(
    data: web::Data<Arc<Client>>,
    path: web::Path<(String, String)>,
    input: web::Json<ActiveInput>,
) -> impl Responder {
    let client = data.into_inner();
    let (kind, id) = path.into_inner();

    let Some(name) = collection_name(&kind) else {
        return HttpResponse::NotFound().body("Unknown catalog kind");
    };
    let id: ObjectId = match ObjectId::parse_str(&id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match untyped_collection(&client, name)
        .update_one(
            doc! { "_id": id },
            doc! { "$set": { "active": input.active, "updated_at": DateTime::now() } },
        )
        .await
    {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().body("Catalog entry not found");
            }
            HttpResponse::Ok().body("Catalog entry updated")
        }
        Err(err) => {
            eprintln!("Failed to update {} entry: {:?}", kind, err);
            HttpResponse::InternalServerError().body("Failed to update catalog entry")
        }
    }
}
