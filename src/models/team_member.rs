use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Stored shape, `team_members` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamMemberDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub fallback: Option<String>,
    pub created_at: DateTime,
}

/// External camelCase shape returned by the API. Optional fields
/// serialize as explicit nulls, matching the full-record update contract.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInfo {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub fallback: Option<String>,
}

impl TeamMemberDoc {
    pub fn into_info(self) -> TeamMemberInfo {
        TeamMemberInfo {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            avatar_url: self.avatar_url,
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_mapping_uses_camel_case_and_hex_id() {
        let oid = ObjectId::new();
        let doc = TeamMemberDoc {
            id: Some(oid),
            name: "Dana Reyes".to_string(),
            role: "Site Manager".to_string(),
            email: None,
            phone: Some("555-0101".to_string()),
            avatar_url: Some("https://img.example/dana.png".to_string()),
            fallback: Some("DR".to_string()),
            created_at: DateTime::now(),
        };

        let info = doc.into_info();
        assert_eq!(info.id, oid.to_hex());

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["avatarUrl"], "https://img.example/dana.png");
        // Omitted optionals come back as explicit null, not absent
        assert!(json["email"].is_null());
        assert_eq!(json["phone"], "555-0101");
    }
}
