use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::features::contact::dtos::{ContactChannelsDto, ContactQuery};
use crate::features::contact::services::ContactService;
use crate::shared::types::ApiResponse;

/// Get the shop's contact channels
///
/// Returns a chat deep link, a `mailto:` link and a phone link, all prefilled
/// with the given message.
#[utoipa::path(
    get,
    path = "/api/contact",
    params(ContactQuery),
    responses(
        (status = 200, description = "Contact channels", body = ApiResponse<ContactChannelsDto>),
    ),
    tag = "contact"
)]
pub async fn get_contact(
    State(service): State<Arc<ContactService>>,
    Query(query): Query<ContactQuery>,
) -> Json<ApiResponse<ContactChannelsDto>> {
    let channels = service.channels(query.message.as_deref());
    Json(ApiResponse::success(Some(channels), None, None))
}
