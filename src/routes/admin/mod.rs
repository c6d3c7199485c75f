use actix_web::web;

pub mod catalog;
pub mod finance;

// Authorization for this scope is enforced upstream (reverse proxy / API
// gateway); the service itself stays credential-free.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::scope("/catalog")
                    .route("/{kind}", web::post().to(catalog::create_entry))
                    .route("/{kind}/{id}", web::put().to(catalog::update_entry))
                    .route("/{kind}/{id}/active", web::put().to(catalog::set_entry_active)),
            )
            .route("/finance/summary", web::get().to(finance::get_summary)),
    );
}
