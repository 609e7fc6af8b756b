use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Siteboard Service API",
        version = "1.0.0",
        description = "API for the Siteboard construction-project dashboard.\n\n**Authentication:** mutating endpoints require the demo session token: the serialized user record, base64-encoded, sent as a Bearer token. It is a capability flag only; nothing is verified server-side.\n\n**Features:**\n- Team member CRUD backed by MongoDB\n- Append-only report snapshots with latest-20 retrieval\n- Health monitoring and metrics",
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Team
        crate::api::team::list_members,
        crate::api::team::create_member,
        crate::api::team::update_member,
        crate::api::team::delete_member,

        // Snapshots
        crate::api::snapshots::save_snapshot,
        crate::api::snapshots::list_snapshots,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::AuthUser,
            crate::models::TeamMemberInfo,
            crate::models::SnapshotInfo,
            crate::services::team_service::MemberRequest,
            crate::services::snapshot_service::SaveSnapshotRequest,
            crate::services::snapshot_service::SaveSnapshotResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check and metrics endpoints for monitoring service status."),
        (name = "Team", description = "Team member roster. Reads are public; mutations require a session token."),
        (name = "Snapshots", description = "Append-only report snapshots. Payloads are opaque JSON envelopes."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Demo session token: base64-encoded user record"))
                        .build(),
                ),
            );
        }
    }
}
