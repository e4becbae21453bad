// services/shop/src/web/handlers/item_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::item::ItemRequest;
use crate::models::validate_payload;
use crate::state::ItemServiceState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_items", skip(state))]
pub async fn list_items_handler(state: web::Data<ItemServiceState>) -> Result<HttpResponse, AppError> {
  let items = state.items.list_items().await?;
  info!("Fetched {} items.", items.len());
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::get_item", skip(state, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(
  state: web::Data<ItemServiceState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  match state.items.find_item(item_id).await? {
    Some(item) => Ok(HttpResponse::Ok().json(item)),
    None => Err(AppError::NotFound("Item not found".to_string())),
  }
}

#[instrument(
    name = "handler::create_item",
    skip(state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, name = %req_payload.name)
)]
pub async fn create_item_handler(
  state: web::Data<ItemServiceState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<ItemRequest>,
) -> Result<HttpResponse, AppError> {
  let request = req_payload.into_inner();
  validate_payload(&request)?;

  let item = state.items.create_item(request).await?;
  info!(item_id = %item.id, "Item created.");
  Ok(HttpResponse::Created().json(item))
}

#[instrument(
    name = "handler::update_item",
    skip(state, path, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, item_id = %path.as_ref())
)]
pub async fn update_item_handler(
  state: web::Data<ItemServiceState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
  req_payload: web::Json<ItemRequest>,
) -> Result<HttpResponse, AppError> {
  let item_id = path.into_inner();
  let request = req_payload.into_inner();
  validate_payload(&request)?;

  let item = state.items.update_item(item_id, request).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(
    name = "handler::delete_item",
    skip(state, path, auth_user),
    fields(user_id = %auth_user.user_id, item_id = %path.as_ref())
)]
pub async fn delete_item_handler(
  state: web::Data<ItemServiceState>,
  auth_user: AuthenticatedUser,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  state.items.delete_item(path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}
