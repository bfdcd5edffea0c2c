//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{DoctorResponse, NewDoctor, UpdateDoctor};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::doctor_handler::register_doctor,
        crate::api::handlers::doctor_handler::list_doctors,
        crate::api::handlers::doctor_handler::get_doctor,
        crate::api::handlers::doctor_handler::update_doctor,
        crate::api::handlers::doctor_handler::delete_doctor,
    ),
    components(schemas(NewDoctor, UpdateDoctor, DoctorResponse)),
    tags(
        (name = "Doctors", description = "Doctor profile management"),
    )
)]
pub struct ApiDoc;
