use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::metrics,
    database::MongoDB,
    models::AuthUser,
    services::team_service,
    utils::error::AppError,
};

#[utoipa::path(
    get,
    path = "/api/team",
    tag = "Team",
    responses(
        (status = 200, description = "Current roster, creation order ascending"),
        (status = 500, description = "Backend error")
    )
)]
pub async fn list_members(db: web::Data<MongoDB>) -> impl Responder {
    metrics::increment_request_count();
    log::info!("📋 GET /team - Listing members");

    match team_service::list_members(&db).await {
        Ok(team) => {
            log::info!("✅ Listed {} members", team.len());
            HttpResponse::Ok().json(serde_json::json!({ "team": team }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Error listing members: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/team",
    tag = "Team",
    request_body = team_service::MemberRequest,
    responses(
        (status = 200, description = "Member created", body = crate::models::TeamMemberInfo),
        (status = 400, description = "Missing name or role"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Backend error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_member(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    request: web::Json<team_service::MemberRequest>,
) -> impl Responder {
    metrics::increment_request_count();
    log::info!("📝 POST /team - {} adding '{}'", user.name, request.name);

    match team_service::create_member(&db, request.into_inner()).await {
        Ok(member) => {
            log::info!("✅ Member created: {}", member.id);
            HttpResponse::Ok().json(serde_json::json!({ "member": member }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::warn!("⚠️ Failed to create member: {}", e);
            match &e {
                AppError::Validation(_) => {
                    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
                }
                _ => HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": e.to_string() })),
            }
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/team/{id}",
    tag = "Team",
    request_body = team_service::MemberRequest,
    responses(
        (status = 200, description = "Member rewritten", body = crate::models::TeamMemberInfo),
        (status = 400, description = "Missing name or role"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "No such member, or backend error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_member(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<team_service::MemberRequest>,
) -> impl Responder {
    metrics::increment_request_count();
    log::info!("🔧 PUT /team/{} - Updated by {}", id, user.name);

    match team_service::update_member(&db, &id, request.into_inner()).await {
        Ok(member) => {
            log::info!("✅ Member updated: {}", member.id);
            HttpResponse::Ok().json(serde_json::json!({ "member": member }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::warn!("⚠️ Failed to update member {}: {}", id, e);
            match &e {
                AppError::Validation(_) => {
                    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
                }
                // NotFound stays a 500 on the wire; the message tells them apart
                _ => HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": e.to_string() })),
            }
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/team/{id}",
    tag = "Team",
    responses(
        (status = 200, description = "Member removed (or was already gone)"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Backend error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_member(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    id: web::Path<String>,
) -> impl Responder {
    metrics::increment_request_count();
    log::info!("🗑️  DELETE /team/{} - Removed by {}", id, user.name);

    match team_service::delete_member(&db, &id).await {
        Ok(()) => {
            log::info!("✅ Member {} deleted", id);
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Error deleting member {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}
