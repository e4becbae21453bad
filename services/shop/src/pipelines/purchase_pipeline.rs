// services/shop/src/pipelines/purchase_pipeline.rs

use crate::errors::AppError;
use crate::models::purchase::{max_purchase_total, NewPurchase, NewPurchaseLine};
use crate::pipelines::contexts::{PricedLine, PurchaseCtxData};
use chrono::Utc;
use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use shopflow::{ContextData, Pipeline, StepControl};
use tracing::{event, info, warn, Level};
use uuid::Uuid;

pub const PURCHASE_PIPELINE: &str = "create_purchase";

/// Builds the purchase-creation pipeline.
///
/// The stock comparison in `resolve_requested_items` only rejects early; the
/// conditional decrement inside `record_purchase` is what guarantees stock
/// never goes negative.
pub fn build_purchase_pipeline() -> Pipeline<PurchaseCtxData, AppError> {
  let mut purchase_p = Pipeline::<PurchaseCtxData, AppError>::new(
    PURCHASE_PIPELINE,
    &["validate_purchase_request", "resolve_requested_items", "record_purchase"],
  );

  purchase_p.on("validate_purchase_request", |ctx_data: ContextData<PurchaseCtxData>| {
    Box::pin(async move {
      let guard = ctx_data.read();
      if guard.requested.is_empty() {
        return Err(AppError::Validation("items: at least one item is required".to_string()));
      }
      if let Some(bad) = guard.requested.iter().find(|line| line.quantity <= 0) {
        return Err(AppError::Validation(format!(
          "items: quantity for item {} must be greater than zero",
          bad.item_id
        )));
      }
      Ok(StepControl::Continue)
    })
  });

  // Fetch every requested item, pre-check stock and price the lines with the
  // price observed now. That price becomes the line's snapshot.
  purchase_p.on("resolve_requested_items", |ctx_data: ContextData<PurchaseCtxData>| {
    Box::pin(async move {
      let (requested, directory) = {
        let guard = ctx_data.read();
        (guard.requested.clone(), guard.deps.directory.clone())
      };

      let fetched = try_join_all(requested.iter().map(|line| directory.fetch_item(line.item_id))).await?;

      let mut priced_lines = Vec::with_capacity(requested.len());
      let mut total_amount = Decimal::ZERO;
      for (line, item) in requested.iter().zip(fetched) {
        if line.quantity > item.stock {
          warn!(item_id = %line.item_id, requested = line.quantity, stock = item.stock, "Requested quantity exceeds known stock.");
          return Err(AppError::InsufficientStock { item_id: line.item_id });
        }
        total_amount = item
          .price
          .checked_mul(Decimal::from(line.quantity))
          .and_then(|line_amount| total_amount.checked_add(line_amount))
          .filter(|total| *total <= max_purchase_total())
          .ok_or_else(|| AppError::Validation("items: purchase total exceeds the supported amount".to_string()))?;
        priced_lines.push(PricedLine {
          item_id: line.item_id,
          name: item.name,
          quantity: line.quantity,
          unit_price: item.price,
        });
      }

      event!(Level::DEBUG, lines = priced_lines.len(), %total_amount, "Purchase priced.");
      {
        let mut guard = ctx_data.write();
        guard.priced_lines = priced_lines;
        guard.total_amount = total_amount;
      }
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  purchase_p.on("record_purchase", |ctx_data: ContextData<PurchaseCtxData>| {
    Box::pin(async move {
      let (new_purchase, store) = {
        let guard = ctx_data.read();
        let new_purchase = NewPurchase {
          id: Uuid::new_v4(),
          user_id: guard.user_id,
          total_amount: guard.total_amount,
          created_at: Utc::now(),
          lines: guard
            .priced_lines
            .iter()
            .map(|line| NewPurchaseLine {
              item_id: line.item_id,
              quantity: line.quantity,
              price_at_purchase: line.unit_price,
            })
            .collect(),
        };
        (new_purchase, guard.deps.store.clone())
      };

      let record = store.record_purchase(new_purchase).await?;
      info!(purchase_id = %record.header.id, total = %record.header.total_amount, "Purchase recorded.");
      ctx_data.write().recorded = Some(record);
      Ok::<_, AppError>(StepControl::Continue)
    })
  });

  purchase_p
}
