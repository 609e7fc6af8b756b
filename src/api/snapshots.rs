use actix_web::{web, HttpResponse, Responder};

use crate::{
    api::metrics,
    database::MongoDB,
    models::AuthUser,
    services::snapshot_service,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/api/snapshot",
    tag = "Snapshots",
    request_body = snapshot_service::SaveSnapshotRequest,
    responses(
        (status = 200, description = "Snapshot stored", body = snapshot_service::SaveSnapshotResponse),
        (status = 400, description = "Missing payload"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Backend error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_snapshot(
    user: web::ReqData<AuthUser>,
    db: web::Data<MongoDB>,
    request: web::Json<snapshot_service::SaveSnapshotRequest>,
) -> impl Responder {
    metrics::increment_request_count();
    log::info!("💾 POST /snapshot - Saved by {}", user.name);

    match snapshot_service::save_snapshot(&db, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ Snapshot stored: {}", response.snapshot_id);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            metrics::increment_error_count();
            log::warn!("⚠️ Failed to store snapshot: {}", e);
            match &e {
                AppError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
                    "ok": false,
                    "error": e.to_string()
                })),
                _ => HttpResponse::InternalServerError().json(serde_json::json!({
                    "ok": false,
                    "error": e.to_string()
                })),
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/snapshot",
    tag = "Snapshots",
    responses(
        (status = 200, description = "Up to the 20 most recent snapshots, newest first"),
        (status = 500, description = "Backend error")
    )
)]
pub async fn list_snapshots(db: web::Data<MongoDB>) -> impl Responder {
    metrics::increment_request_count();
    log::info!("📊 GET /snapshot - Fetching recent snapshots");

    match snapshot_service::list_snapshots(&db).await {
        Ok(data) => {
            log::info!("✅ Found {} snapshots", data.len());
            HttpResponse::Ok().json(serde_json::json!({
                "ok": true,
                "count": data.len(),
                "data": data
            }))
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Error fetching snapshots: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "ok": false,
                "error": e.to_string()
            }))
        }
    }
}
