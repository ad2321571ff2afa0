use std::sync::MutexGuard;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::{DeskError, OperationsDesk, SharedDesk};
use crate::affiliate::ReferralRequest;
use crate::claims::{Claim, ClaimId, NewClaim};
use crate::coverage::{self, CostInputs};
use crate::partners::PartnerId;
use crate::policy::{NewPolicy, Policy, PolicyId};
use crate::records::AuditCategory;

/// Router builder exposing the desk over HTTP.
pub fn desk_router(desk: SharedDesk) -> Router {
    Router::new()
        .route(
            "/api/v1/policies",
            get(list_policies_handler).post(link_policy_handler),
        )
        .route("/api/v1/policies/:policy_id", put(update_policy_handler))
        .route(
            "/api/v1/policies/:policy_id/history",
            delete(clear_history_handler),
        )
        .route("/api/v1/verifications", post(verify_benefits_handler))
        .route(
            "/api/v1/claims",
            get(list_claims_handler).post(file_claim_handler),
        )
        .route("/api/v1/claims/:claim_id", put(update_claim_handler))
        .route("/api/v1/claims/:claim_id/appeal", post(appeal_handler))
        .route(
            "/api/v1/claims/:claim_id/statement",
            post(verify_statement_handler),
        )
        .route(
            "/api/v1/audit",
            get(audit_log_handler).delete(purge_audit_handler),
        )
        .route("/api/v1/affiliates/offers", get(offers_handler))
        .route("/api/v1/affiliates/referrals", post(referral_handler))
        .route(
            "/api/v1/affiliates/transactions",
            get(transactions_handler),
        )
        .route(
            "/api/v1/partners/:partner_id/note",
            put(save_partner_note_handler),
        )
        .route("/api/v1/dashboard/claims", get(claim_summary_handler))
        .route("/api/v1/dashboard/affiliates", get(affiliate_stats_handler))
        .route("/api/v1/coverage/estimate", post(estimate_handler))
        .with_state(desk)
}

fn lock(desk: &SharedDesk) -> MutexGuard<'_, OperationsDesk> {
    desk.lock().expect("desk mutex poisoned")
}

pub(crate) fn error_response(error: DeskError) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, DeskError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationRequest {
    pub(crate) identifier: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerificationResponse {
    pub(crate) identifier: String,
    pub(crate) policy: Option<Policy>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppealRequest {
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartnerNoteRequest {
    pub(crate) note: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuditQuery {
    #[serde(default)]
    pub(crate) category: Option<AuditCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PartnerQuery {
    #[serde(default)]
    pub(crate) partner_id: Option<PartnerId>,
}

pub(crate) async fn list_policies_handler(State(desk): State<SharedDesk>) -> Response {
    let policies = lock(&desk).policies().to_vec();
    Json(policies).into_response()
}

pub(crate) async fn link_policy_handler(
    State(desk): State<SharedDesk>,
    Json(intake): Json<NewPolicy>,
) -> Response {
    let result = lock(&desk).link_policy(intake);
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn update_policy_handler(
    State(desk): State<SharedDesk>,
    Path(policy_id): Path<String>,
    Json(updated): Json<Policy>,
) -> Response {
    let result = lock(&desk).update_policy(&PolicyId(policy_id), updated);
    respond(StatusCode::OK, result)
}

pub(crate) async fn clear_history_handler(
    State(desk): State<SharedDesk>,
    Path(policy_id): Path<String>,
) -> Response {
    let result = lock(&desk)
        .clear_policy_history(&PolicyId(policy_id))
        .map(|cleared| json!({ "cleared": cleared }));
    respond(StatusCode::OK, result)
}

pub(crate) async fn verify_benefits_handler(
    State(desk): State<SharedDesk>,
    Json(request): Json<VerificationRequest>,
) -> Response {
    let result = lock(&desk)
        .verify_benefits(&request.identifier)
        .map(|policy| VerificationResponse {
            identifier: request.identifier.trim().to_string(),
            policy,
        });
    respond(StatusCode::OK, result)
}

pub(crate) async fn list_claims_handler(State(desk): State<SharedDesk>) -> Response {
    let claims = lock(&desk).claims().to_vec();
    Json(claims).into_response()
}

pub(crate) async fn file_claim_handler(
    State(desk): State<SharedDesk>,
    Json(intake): Json<NewClaim>,
) -> Response {
    let claim = lock(&desk).file_claim(intake);
    (StatusCode::CREATED, Json(claim)).into_response()
}

pub(crate) async fn update_claim_handler(
    State(desk): State<SharedDesk>,
    Path(claim_id): Path<String>,
    Json(updated): Json<Claim>,
) -> Response {
    if updated.id.0 != claim_id {
        let payload = json!({
            "error": format!("claim id {} does not match path {claim_id}", updated.id),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }
    let result = lock(&desk).update_claim(updated);
    respond(StatusCode::OK, result)
}

pub(crate) async fn appeal_handler(
    State(desk): State<SharedDesk>,
    Path(claim_id): Path<String>,
    Json(request): Json<AppealRequest>,
) -> Response {
    let result = lock(&desk).submit_appeal(&ClaimId(claim_id), request.notes);
    respond(StatusCode::OK, result)
}

pub(crate) async fn verify_statement_handler(
    State(desk): State<SharedDesk>,
    Path(claim_id): Path<String>,
) -> Response {
    let result = lock(&desk).verify_statement(&ClaimId(claim_id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn claim_summary_handler(State(desk): State<SharedDesk>) -> Response {
    let summary = lock(&desk).claim_summary();
    Json(summary).into_response()
}

pub(crate) async fn audit_log_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<AuditQuery>,
) -> Response {
    let desk = lock(&desk);
    let entries: Vec<_> = desk
        .audit_log()
        .entries()
        .iter()
        .filter(|entry| query.category.map_or(true, |category| entry.category == category))
        .cloned()
        .collect();
    Json(entries).into_response()
}

pub(crate) async fn purge_audit_handler(State(desk): State<SharedDesk>) -> Response {
    let purged = lock(&desk).purge_audit_log();
    Json(json!({ "purged": purged })).into_response()
}

pub(crate) async fn offers_handler(State(desk): State<SharedDesk>) -> Response {
    let offers: Vec<_> = lock(&desk).offers().offers().cloned().collect();
    Json(offers).into_response()
}

pub(crate) async fn referral_handler(
    State(desk): State<SharedDesk>,
    Json(request): Json<ReferralRequest>,
) -> Response {
    let result = lock(&desk).verify_referral(request);
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn transactions_handler(State(desk): State<SharedDesk>) -> Response {
    let transactions: Vec<_> = lock(&desk)
        .affiliates()
        .transactions()
        .iter()
        .cloned()
        .collect();
    Json(transactions).into_response()
}

pub(crate) async fn save_partner_note_handler(
    State(desk): State<SharedDesk>,
    Path(partner_id): Path<String>,
    Json(request): Json<PartnerNoteRequest>,
) -> Response {
    let result = lock(&desk).save_partner_note(&PartnerId(partner_id), request.note);
    respond(StatusCode::OK, result)
}

pub(crate) async fn affiliate_stats_handler(
    State(desk): State<SharedDesk>,
    Query(query): Query<PartnerQuery>,
) -> Response {
    let stats = lock(&desk).affiliate_stats(query.partner_id.as_ref());
    Json(stats).into_response()
}

pub(crate) async fn estimate_handler(Json(inputs): Json<CostInputs>) -> Response {
    Json(coverage::estimate(inputs)).into_response()
}
