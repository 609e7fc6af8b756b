// ==================== TEAM MEMBERS ====================
// CRUD for the crew roster shown on the dashboard. Updates are full-record
// rewrites: omitted optional fields are written back as null, never left
// unchanged. Single-row writes only; last writer wins.

use crate::{
    database::MongoDB,
    models::{TeamMemberDoc, TeamMemberInfo},
    utils::error::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime};
use serde::Deserialize;

pub const COLLECTION: &str = "team_members";

/// Shared body for create and update. `name` and `role` default to empty
/// strings when absent so validation, not deserialization, reports them.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub fallback: Option<String>,
}

fn validate(request: &MemberRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation("name and role are required".to_string()));
    }
    Ok(())
}

fn opt_bson(value: Option<String>) -> Bson {
    value.map(Bson::String).unwrap_or(Bson::Null)
}

/// GET /api/team - Full roster, creation order ascending
pub async fn list_members(db: &MongoDB) -> Result<Vec<TeamMemberInfo>, AppError> {
    let collection = db.collection::<TeamMemberDoc>(COLLECTION);

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "created_at": 1 })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let docs: Vec<TeamMemberDoc> = cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(docs.into_iter().map(TeamMemberDoc::into_info).collect())
}

/// POST /api/team - Inserts one member, returns it with the generated id
pub async fn create_member(
    db: &MongoDB,
    request: MemberRequest,
) -> Result<TeamMemberInfo, AppError> {
    validate(&request)?;

    let member = TeamMemberDoc {
        id: None,
        name: request.name,
        role: request.role,
        email: request.email,
        phone: request.phone,
        avatar_url: request.avatar_url,
        fallback: request.fallback,
        created_at: DateTime::now(),
    };

    let collection = db.collection::<TeamMemberDoc>(COLLECTION);
    let result = collection
        .insert_one(&member)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::Database("insert returned no id".to_string()))?;

    Ok(TeamMemberDoc {
        id: Some(id),
        ..member
    }
    .into_info())
}

/// PUT /api/team/{id} - Rewrites every mutable field of one member.
/// An unknown id is a failed update, never an upsert.
pub async fn update_member(
    db: &MongoDB,
    id: &str,
    request: MemberRequest,
) -> Result<TeamMemberInfo, AppError> {
    validate(&request)?;

    // An id that never came from us behaves like any other missing row
    let oid = ObjectId::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("no team member with id {}", id)))?;

    let update = doc! { "$set": {
        "name": request.name.clone(),
        "role": request.role.clone(),
        "email": opt_bson(request.email.clone()),
        "phone": opt_bson(request.phone.clone()),
        "avatar_url": opt_bson(request.avatar_url.clone()),
        "fallback": opt_bson(request.fallback.clone()),
    }};

    let collection = db.collection::<TeamMemberDoc>(COLLECTION);
    let result = collection
        .update_one(doc! { "_id": oid }, update)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("no team member with id {}", id)));
    }

    // Full rewrite: the stored record now equals the request plus its id
    Ok(TeamMemberInfo {
        id: oid.to_hex(),
        name: request.name,
        role: request.role,
        email: request.email,
        phone: request.phone,
        avatar_url: request.avatar_url,
        fallback: request.fallback,
    })
}

/// DELETE /api/team/{id} - Removes one member. Unknown ids are not an
/// error; the operation is idempotent from the caller's perspective.
pub async fn delete_member(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let Ok(oid) = ObjectId::parse_str(id) else {
        return Ok(());
    };

    let collection = db.collection::<TeamMemberDoc>(COLLECTION);
    collection
        .delete_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, role: &str) -> MemberRequest {
        MemberRequest {
            name: name.to_string(),
            role: role.to_string(),
            email: None,
            phone: None,
            avatar_url: None,
            fallback: None,
        }
    }

    #[test]
    fn test_validate_requires_name_and_role() {
        assert!(validate(&request("Dana", "Foreman")).is_ok());

        for bad in [request("", "Foreman"), request("Dana", ""), request("   ", "Foreman")] {
            let err = validate(&bad).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        // Body with role only: serde fills name with "", validation rejects
        let parsed: MemberRequest = serde_json::from_str(r#"{"role": "Foreman"}"#).unwrap();
        assert_eq!(parsed.name, "");
        assert!(validate(&parsed).is_err());
    }

    #[test]
    fn test_omitted_optionals_become_null() {
        assert_eq!(opt_bson(None), Bson::Null);
        assert_eq!(
            opt_bson(Some("x@y.z".to_string())),
            Bson::String("x@y.z".to_string())
        );
    }
}
