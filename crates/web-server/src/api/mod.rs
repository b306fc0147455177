mod get_photos;

pub use carousel_web_server_derive::ApiError as Error;

use actix_web::{web, HttpResponse};

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/photos")
            .route(web::get().to(get_photos::endpoint))
            .default_service(web::route().to(method_not_allowed)),
    );
}
