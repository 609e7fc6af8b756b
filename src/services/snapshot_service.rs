// ==================== SNAPSHOTS ====================
// Append-only storage for dashboard report snapshots. Payload contents
// are opaque to this service; the envelope only carries a schema version
// so consumers can validate before use.

use crate::{
    database::MongoDB,
    models::{SnapshotDoc, SnapshotInfo},
    utils::error::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "snapshots";

/// Listing cap, newest first. There is no further pagination.
pub const LIST_LIMIT: i64 = 20;

/// Version written when the caller does not tag the envelope.
pub const DEFAULT_SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveSnapshotRequest {
    #[schema(value_type = Object)]
    pub payload: Option<serde_json::Value>,
    pub schema_version: Option<i32>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SaveSnapshotResponse {
    pub ok: bool,
    #[serde(rename = "snapshotId")]
    pub snapshot_id: String,
    pub created_at: String,
}

fn validate(request: SaveSnapshotRequest) -> Result<(serde_json::Value, i32), AppError> {
    match request.payload {
        Some(payload) if !payload.is_null() => Ok((
            payload,
            request.schema_version.unwrap_or(DEFAULT_SCHEMA_VERSION),
        )),
        _ => Err(AppError::Validation("missing payload".to_string())),
    }
}

/// POST /api/snapshot - Appends one snapshot, returns id and timestamp
pub async fn save_snapshot(
    db: &MongoDB,
    request: SaveSnapshotRequest,
) -> Result<SaveSnapshotResponse, AppError> {
    let (payload, schema_version) = validate(request)?;

    let payload = mongodb::bson::to_bson(&payload)
        .map_err(|e| AppError::Database(format!("unstorable payload: {}", e)))?;

    let snapshot = SnapshotDoc {
        id: None,
        schema_version,
        payload,
        created_at: DateTime::now(),
    };

    let collection = db.collection::<SnapshotDoc>(COLLECTION);
    let result = collection
        .insert_one(&snapshot)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("insert returned no id".to_string()))?;

    Ok(SaveSnapshotResponse {
        ok: true,
        snapshot_id: id.to_hex(),
        created_at: snapshot
            .created_at
            .try_to_rfc3339_string()
            .map_err(|e| AppError::Database(e.to_string()))?,
    })
}

/// GET /api/snapshot - The 20 most recent snapshots, newest first
pub async fn list_snapshots(db: &MongoDB) -> Result<Vec<SnapshotInfo>, AppError> {
    let collection = db.collection::<SnapshotDoc>(COLLECTION);

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "created_at": -1, "_id": -1 })
        .limit(LIST_LIMIT)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let docs: Vec<SnapshotDoc> = cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(docs.into_iter().map(SnapshotDoc::into_info).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_rejects_missing_payload() {
        let err = validate(SaveSnapshotRequest {
            payload: None,
            schema_version: None,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Explicit null is the same as absent
        let err = validate(SaveSnapshotRequest {
            payload: Some(serde_json::Value::Null),
            schema_version: Some(3),
        })
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_validate_defaults_schema_version() {
        let (payload, version) = validate(SaveSnapshotRequest {
            payload: Some(json!({ "a": 1 })),
            schema_version: None,
        })
        .unwrap();
        assert_eq!(payload["a"], 1);
        assert_eq!(version, DEFAULT_SCHEMA_VERSION);

        let (_, version) = validate(SaveSnapshotRequest {
            payload: Some(json!([1, 2])),
            schema_version: Some(4),
        })
        .unwrap();
        assert_eq!(version, 4);
    }
}
