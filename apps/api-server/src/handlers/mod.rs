//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/v1/posts")
                        .route("", web::get().to(posts::get_items))
                        .route("", web::post().to(posts::write))
                        .route("/{id}", web::get().to(posts::get_item))
                        .route("/{id}", web::put().to(posts::modify))
                        .route("/{id}", web::delete().to(posts::delete_item)),
                ),
        );
}

/// Unreadable JSON bodies get the same envelope as validation failures.
fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("요청 본문을 읽을 수 없습니다: {err}")).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("잘못된 경로 값입니다: {err}")).into()
}
