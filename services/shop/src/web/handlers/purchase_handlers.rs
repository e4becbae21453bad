// services/shop/src/web/handlers/purchase_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::purchase::CreatePurchaseRequest;
use crate::models::validate_payload;
use crate::state::PurchaseServiceState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(
    name = "handler::create_purchase",
    skip(state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, lines = req_payload.items.len())
)]
pub async fn create_purchase_handler(
  state: web::Data<PurchaseServiceState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<CreatePurchaseRequest>,
) -> Result<HttpResponse, AppError> {
  let request = req_payload.into_inner();
  validate_payload(&request)?;

  let purchase = state.purchases.create_purchase(auth_user.user_id, request.items).await?;
  info!(purchase_id = %purchase.id, total = %purchase.total_amount, "Purchase created.");
  Ok(HttpResponse::Created().json(purchase))
}

#[instrument(name = "handler::purchase_history", skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn purchase_history_handler(
  state: web::Data<PurchaseServiceState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let purchases = state.purchases.purchase_history(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(purchases))
}
