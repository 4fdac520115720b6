use super::AppState;
use super::dto::{
    ClientResponse, CreateClientRequest, HealthResponse, SetLimitRequest, TransactionRequest,
    TransactionResponse,
};
use super::error::ApiError;
use crate::domain::outcome::{CreateOutcome, Deletion, LimitUpdate};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub const BASE_PATH: &str = "/api/v1/pix-clients";

/// Bytes that cannot appear raw inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path of one client record, with each key part percent-encoded.
pub fn client_location(document: &str, account_id: &str) -> String {
    format!(
        "{}/{}/{}",
        BASE_PATH,
        utf8_percent_encode(document, PATH_SEGMENT),
        utf8_percent_encode(account_id, PATH_SEGMENT)
    )
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Register a client account
///
/// POST /api/v1/pix-clients
///
/// 201 with the record and a `Location` header; 400 on invalid input; 409
/// when the document/account pair already exists.
pub async fn create_client(
    State(service): State<AppState>,
    payload: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    match service.create_client(req.into()).await? {
        CreateOutcome::Created(record) => {
            let location = HeaderValue::from_str(&client_location(
                &record.document,
                &record.account_id,
            ))
            .map_err(|_| ApiError::internal())?;
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(ClientResponse::from(record)),
            )
                .into_response())
        }
        conflict @ CreateOutcome::Conflict(_) => Err(ApiError::conflict(conflict.to_string())),
    }
}

/// Get one client account
///
/// GET /api/v1/pix-clients/{document}/{account_id}
///
/// 204 with an empty body when the record does not exist.
pub async fn get_client(
    State(service): State<AppState>,
    Path((document, account_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    match service.get_client(&document, &account_id).await? {
        Some(record) => Ok(Json(ClientResponse::from(record)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// List all accounts of a document
///
/// GET /api/v1/pix-clients/{document}
pub async fn list_accounts(
    State(service): State<AppState>,
    Path(document): Path<String>,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let records = service.list_accounts(&document).await?;
    Ok(Json(records.into_iter().map(ClientResponse::from).collect()))
}

/// Replace the PIX limit
///
/// PATCH /api/v1/pix-clients/{document}/{account_id}/limit
pub async fn set_limit(
    State(service): State<AppState>,
    Path((document, account_id)): Path<(String, String)>,
    payload: Result<Json<SetLimitRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload?;

    match service.set_limit(req.into_command(document, account_id)).await? {
        LimitUpdate::Updated => Ok(StatusCode::NO_CONTENT),
        LimitUpdate::NotFound => Err(ApiError::not_found("Client not found.")),
    }
}

/// DELETE /api/v1/pix-clients/{document}/{account_id}
pub async fn delete_client(
    State(service): State<AppState>,
    Path((document, account_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    match service.delete_client(&document, &account_id).await? {
        Deletion::Deleted => Ok(StatusCode::NO_CONTENT),
        Deletion::NotFound => Err(ApiError::not_found("Client not found.")),
    }
}

/// Process a PIX transaction
///
/// POST /api/v1/pix-clients/{document}/{account_id}/transactions
///
/// Always 200 for a well-formed request; `approved` carries the decision.
pub async fn process_transaction(
    State(service): State<AppState>,
    Path((document, account_id)): Path<(String, String)>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(req) = payload?;

    let outcome = service
        .process_transaction(req.into_command(document, account_id))
        .await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_location_encodes_each_segment() {
        assert_eq!(
            client_location("12345678900", "1234#56789-0"),
            "/api/v1/pix-clients/12345678900/1234%2356789-0"
        );
        assert_eq!(
            client_location("12/3", "conta ção"),
            "/api/v1/pix-clients/12%2F3/conta%20%C3%A7%C3%A3o"
        );
        assert_eq!(client_location("123", "456"), "/api/v1/pix-clients/123/456");
    }
}
