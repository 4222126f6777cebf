use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use uuid::Uuid;

use super::export::contracts_to_csv;
use super::models::{ContractInput, ContractRecord};
use crate::auth::middleware::validate_request_token;
use crate::docgen::{self, GeneratorError};
use crate::AppState;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
pub struct ContractListQuery {
    /// Case-insensitive substring match on project title or contract number.
    pub q: Option<String>,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    get,
    path = "/contracts",
    security(("bearer_auth" = [])),
    params(
        ("q" = Option<String>, Query, description = "Filter by project title or contract number")
    ),
    responses(
        (status = 200, description = "List of contracts", body = [ContractRecord]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_all_contracts(
    req: HttpRequest,
    query: web::Query<ContractListQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    let mut contracts = match state.get_all_contracts().await {
        Ok(contracts) => contracts,
        Err(e) => {
            log::error!("Failed to fetch contracts: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to fetch contracts"));
        }
    };

    if let Some(q) = query.q.as_deref() {
        let needle = q.to_lowercase();
        contracts.retain(|record| {
            record.project_title.to_lowercase().contains(&needle)
                || record.contract_number.to_lowercase().contains(&needle)
        });
    }

    HttpResponse::Ok().json(contracts)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    post,
    path = "/contracts",
    request_body = ContractInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Contract created", body = ContractRecord),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Contract number already exists")
    )
)]
pub async fn create_contract(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ContractInput>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    if let Err(message) = body.validate() {
        return HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(&message));
    }

    let record = ContractRecord::from_input(Uuid::new_v4(), &body);
    match state.insert_contract(&record).await {
        Ok(()) => {
            state.invalidate_contract_cache().await;
            HttpResponse::Created().json(record)
        }
        Err(e) if is_unique_violation(&e) => HttpResponse::Conflict().json(
            crate::ErrorResponse::new("Conflict", "Contract number already exists"),
        ),
        Err(e) => {
            log::error!("Failed to insert contract: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to create contract"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    get,
    path = "/contracts/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID of the contract to retrieve")
    ),
    responses(
        (status = 200, description = "Contract found", body = ContractRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn get_contract_by_id(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    match state.get_contract_by_id(&path.into_inner()).await {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => {
            HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Contract not found"))
        }
        Err(e) => {
            log::error!("Failed to fetch contract: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to fetch contract"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    put,
    path = "/contracts/{id}",
    request_body = ContractInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contract updated", body = ContractRecord),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contract not found"),
        (status = 409, description = "Contract number already exists")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the contract to update")
    )
)]
pub async fn update_contract(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    body: web::Json<ContractInput>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    if let Err(message) = body.validate() {
        return HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(&message));
    }

    let record = ContractRecord::from_input(path.into_inner(), &body);
    match state.update_contract(&record).await {
        Ok(true) => {
            state.invalidate_contract_cache().await;
            HttpResponse::Ok().json(record)
        }
        Ok(false) => {
            HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Contract not found"))
        }
        Err(e) if is_unique_violation(&e) => HttpResponse::Conflict().json(
            crate::ErrorResponse::new("Conflict", "Contract number already exists"),
        ),
        Err(e) => {
            log::error!("Failed to update contract: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to update contract"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    delete,
    path = "/contracts/{id}",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Contract deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contract not found")
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the contract to delete")
    )
)]
pub async fn delete_contract(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    match state.delete_contract(&path.into_inner()).await {
        Ok(true) => {
            state.invalidate_contract_cache().await;
            HttpResponse::NoContent().finish()
        }
        Ok(false) => {
            HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Contract not found"))
        }
        Err(e) => {
            log::error!("Failed to delete contract: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to delete contract"))
        }
    }
}

/// Generate the agreement document for a single contract.
#[utoipa::path(
    context_path = "/api",
    tag = "Documents",
    get,
    path = "/contracts/{id}/document",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID of the contract to generate")
    ),
    responses(
        (status = 200, description = "Agreement document", content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contract not found"),
        (status = 422, description = "Stored record has non-numeric financial fields")
    )
)]
pub async fn download_contract_document(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    let record = match state.get_contract_by_id(&path.into_inner()).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found("Contract not found"));
        }
        Err(e) => {
            log::error!("Failed to fetch contract: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to fetch contract"));
        }
    };

    match docgen::render(&record) {
        Ok(bytes) => {
            let filename = sanitize_filename::sanitize(format!("{}.docx", record.contract_number));
            HttpResponse::Ok()
                .content_type(DOCX_MIME)
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(bytes)
        }
        Err(err @ GeneratorError::Formatting { .. }) => {
            log::warn!("Contract {} failed to render: {}", record.contract_number, err);
            HttpResponse::UnprocessableEntity()
                .json(crate::ErrorResponse::new("FormattingError", &err.to_string()))
        }
        Err(err) => {
            log::error!("Document generation failed: {:?}", err);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to generate document"))
        }
    }
}

/// Generate agreements for every contract and bundle them into one archive.
///
/// Records that fail to render are skipped; the response reports how many
/// via the `X-Skipped-Contracts` header.
#[utoipa::path(
    context_path = "/api",
    tag = "Documents",
    get,
    path = "/contracts/documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "ZIP archive of agreement documents", content_type = "application/zip"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn download_all_documents(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    let contracts = match state.get_all_contracts().await {
        Ok(contracts) => contracts,
        Err(e) => {
            log::error!("Failed to fetch contracts: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to fetch contracts"));
        }
    };

    match docgen::generate_batch(&contracts) {
        Ok(archive) => {
            if !archive.skipped.is_empty() {
                log::warn!(
                    "Batch generation skipped {} of {} contracts",
                    archive.skipped.len(),
                    contracts.len()
                );
            }
            HttpResponse::Ok()
                .content_type("application/zip")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"contracts.zip\"",
                ))
                .insert_header(("X-Skipped-Contracts", archive.skipped.len().to_string()))
                .body(archive.bytes)
        }
        Err(err) => {
            log::error!("Batch archive construction failed: {:?}", err);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to build archive"))
        }
    }
}

/// Export the contract table as CSV.
#[utoipa::path(
    context_path = "/api",
    tag = "Contracts",
    get,
    path = "/contracts/export",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV export of all contracts", content_type = "text/csv"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn export_contracts(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Err(e) = validate_request_token(&req) {
        return e.error_response();
    }

    let contracts = match state.get_all_contracts().await {
        Ok(contracts) => contracts,
        Err(e) => {
            log::error!("Failed to fetch contracts: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to fetch contracts"));
        }
    };

    match contracts_to_csv(&contracts) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contracts_data.csv\"",
            ))
            .body(bytes),
        Err(err) => {
            log::error!("CSV export failed: {:?}", err);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error("Failed to export contracts"))
        }
    }
}

/// Configure contract routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contracts")
            .service(
                web::resource("")
                    .route(web::get().to(get_all_contracts))
                    .route(web::post().to(create_contract)),
            )
            .service(web::resource("/documents").route(web::get().to(download_all_documents)))
            .service(web::resource("/export").route(web::get().to(export_contracts)))
            .service(
                web::resource("/{id}/document")
                    .route(web::get().to(download_contract_document)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_contract_by_id))
                    .route(web::put().to(update_contract))
                    .route(web::delete().to(delete_contract)),
            ),
    );
}
