use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use fiesta_api::db;
use fiesta_api::routes;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    // Public booking-flow routes
                    .service(
                        web::scope("/catalog")
                            .route("/packages", web::get().to(routes::catalog::get_packages))
                            .route(
                                "/food-options",
                                web::get().to(routes::catalog::get_food_options),
                            )
                            .route("/themes", web::get().to(routes::catalog::get_themes))
                            .route(
                                "/themes/{id}/mamparas",
                                web::get().to(routes::catalog::get_theme_mamparas),
                            )
                            .route("/extras", web::get().to(routes::catalog::get_extras)),
                    )
                    .service(
                        web::scope("/reservations")
                            .route(
                                "/availability",
                                web::get().to(routes::availability::get_date_availability),
                            )
                            .route(
                                "/availability/month",
                                web::get().to(routes::availability::get_month_availability),
                            )
                            .route("/quote", web::post().to(routes::reservation::quote))
                            .route(
                                "",
                                web::post().to(routes::reservation::create_reservation),
                            )
                            .route("", web::get().to(routes::reservation::get_reservations))
                            .route(
                                "/{id}",
                                web::get().to(routes::reservation::get_reservation_by_id),
                            )
                            .route(
                                "/{id}",
                                web::put().to(routes::reservation::update_reservation),
                            )
                            .route(
                                "/{id}/status",
                                web::put().to(routes::reservation::change_reservation_status),
                            ),
                    )
                    // Admin dashboard routes
                    .configure(routes::admin::config),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
