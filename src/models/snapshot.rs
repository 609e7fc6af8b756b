use mongodb::bson::{oid::ObjectId, Bson, DateTime};
use serde::{Deserialize, Serialize};

/// Stored shape, `snapshots` collection. Append-only: nothing in the
/// service ever updates or deletes one of these. The payload is opaque
/// BSON; only the envelope (schema version, timestamp) has meaning here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SnapshotDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub schema_version: i32,
    pub payload: Bson,
    pub created_at: DateTime,
}

/// External shape returned when listing snapshots.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub id: String,
    pub schema_version: i32,
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub created_at: String,
}

impl SnapshotDoc {
    pub fn into_info(self) -> SnapshotInfo {
        SnapshotInfo {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            schema_version: self.schema_version,
            payload: self.payload.into(),
            created_at: self
                .created_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::bson;

    #[test]
    fn test_info_keeps_full_payload() {
        let doc = SnapshotDoc {
            id: Some(ObjectId::new()),
            schema_version: 1,
            payload: bson!({ "revenue": 120500, "series": [1, 2, 3] }),
            created_at: DateTime::now(),
        };

        let info = doc.into_info();
        assert_eq!(info.payload["revenue"], 120500);
        assert_eq!(info.payload["series"][2], 3);
        assert!(!info.created_at.is_empty());
    }
}
