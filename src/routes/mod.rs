pub mod health;
pub mod open_classrooms;

use crate::error::ApiError;
use actix_web::{HttpResponse, web};

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::init)
            .configure(open_classrooms::init),
    );
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
