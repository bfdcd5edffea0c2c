//! Doctor handlers.
//!
//! Responses are built from `DoctorResponse` only, so the stored credential
//! never leaves the service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{DoctorResponse, NewDoctor, UpdateDoctor};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;

/// Create doctor routes
pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_doctors).post(register_doctor))
        .route(
            "/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}

/// Register a new doctor
#[utoipa::path(
    post,
    path = "/doctors",
    tag = "Doctors",
    request_body = NewDoctor,
    responses(
        (status = 201, description = "Doctor registered", body = DoctorResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_doctor(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewDoctor>,
) -> AppResult<(StatusCode, Json<DoctorResponse>)> {
    let doctor = state.doctor_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(DoctorResponse::from(doctor))))
}

/// List all doctors
#[utoipa::path(
    get,
    path = "/doctors",
    tag = "Doctors",
    responses(
        (status = 200, description = "List of doctors", body = Vec<DoctorResponse>)
    )
)]
pub async fn list_doctors(State(state): State<AppState>) -> AppResult<Json<Vec<DoctorResponse>>> {
    let doctors = state.doctor_service.list_doctors().await?;
    Ok(Json(doctors.into_iter().map(DoctorResponse::from).collect()))
}

/// Get doctor by ID
#[utoipa::path(
    get,
    path = "/doctors/{id}",
    tag = "Doctors",
    params(
        ("id" = i64, Path, description = "Doctor ID")
    ),
    responses(
        (status = 200, description = "Doctor profile", body = DoctorResponse),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DoctorResponse>> {
    let doctor = state.doctor_service.get_doctor(id).await?;
    Ok(Json(DoctorResponse::from(doctor)))
}

/// Update a doctor profile (absent fields are left unchanged)
#[utoipa::path(
    put,
    path = "/doctors/{id}",
    tag = "Doctors",
    params(
        ("id" = i64, Path, description = "Doctor ID")
    ),
    request_body = UpdateDoctor,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Doctor not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateDoctor>,
) -> AppResult<Json<DoctorResponse>> {
    let doctor = state.doctor_service.update_doctor(id, payload).await?;
    Ok(Json(DoctorResponse::from(doctor)))
}

/// Delete a doctor
#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    tag = "Doctors",
    params(
        ("id" = i64, Path, description = "Doctor ID")
    ),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.doctor_service.delete_doctor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
