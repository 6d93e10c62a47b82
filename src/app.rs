use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, middleware, web};

use crate::rate_limit::rate_limit;
use crate::routes;
use crate::state::AppState;

pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let origins = &state.config.cors_origins;
    let cors_enabled = !origins.is_empty();
    let cors = cors(origins);
    let payload_limit = state.config.max_content_length;

    App::new()
        .app_data(state)
        .app_data(web::PayloadConfig::new(payload_limit))
        .configure(routes::init)
        .default_service(web::to(routes::not_found))
        .wrap(middleware::from_fn(rate_limit))
        .wrap(middleware::Condition::new(cors_enabled, cors))
        .wrap(middleware::Logger::default())
}

fn cors(origins: &[String]) -> Cors {
    let cors = if origins.iter().any(|origin| origin == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allow_any_method().allow_any_header()
}
