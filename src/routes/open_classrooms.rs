use crate::error::ApiError;
use crate::handlers::open_classrooms::{get_open_classrooms, parse_location};
use crate::state::AppState;
use actix_web::{HttpResponse, get, post, web};

#[get("/open-classrooms")]
async fn open_classrooms(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let buildings = get_open_classrooms(&state.config, None).await?;
    Ok(HttpResponse::Ok().json(buildings))
}

#[post("/open-classrooms")]
async fn nearest_open_classrooms(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let location = parse_location(&body)?;
    let buildings = get_open_classrooms(&state.config, Some(location)).await?;
    Ok(HttpResponse::Ok().json(buildings))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(open_classrooms).service(nearest_open_classrooms);
}
