//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, history, holders, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolcrib API",
        version = "0.3.0",
        description = "Equipment Checkout Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Loans
        loans::checkout,
        loans::checkin,
        loans::list_loans,
        // History
        history::list_history,
        // Holders
        holders::list_holders,
        holders::get_holder,
        holders::create_holder,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::Condition,
            crate::models::enums::HistoryAction,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::CheckoutRequest,
            crate::models::loan::CheckinRequest,
            crate::models::loan::CheckoutResponse,
            crate::models::loan::CheckinResponse,
            // History
            crate::models::history::HistoryRecord,
            // Holders
            crate::models::holder::Holder,
            crate::models::holder::CreateHolder,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment metadata management"),
        (name = "loans", description = "Checkout and check-in"),
        (name = "history", description = "Checkout/check-in audit trail"),
        (name = "holders", description = "Approved-holder directory")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
