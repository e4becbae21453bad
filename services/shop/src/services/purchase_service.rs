// services/shop/src/services/purchase_service.rs

//! The purchase orchestrator: creation through the `create_purchase`
//! pipeline, and history with live item names.

use crate::clients::item_client::{DirectoryError, ItemDirectory};
use crate::errors::{AppError, Result};
use crate::models::purchase::{Purchase, PurchaseItemView, PurchaseRecord, RequestedItem};
use crate::pipelines::contexts::{PurchaseCtxData, PurchaseDeps};
use crate::pipelines::purchase_pipeline::build_purchase_pipeline;
use crate::repositories::PurchaseStore;
use shopflow::{Pipeline, PipelineOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, warn, Level};
use uuid::Uuid;

pub struct PurchaseOrchestrator {
  deps: PurchaseDeps,
  pipeline: Pipeline<PurchaseCtxData, AppError>,
}

impl PurchaseOrchestrator {
  pub fn new(directory: Arc<dyn ItemDirectory>, store: Arc<dyn PurchaseStore>) -> Self {
    let pipeline = build_purchase_pipeline();
    tracing::info!(steps = ?pipeline.step_names(), "Purchase pipeline built.");
    Self {
      deps: PurchaseDeps { directory, store },
      pipeline,
    }
  }

  /// Prices, stock-checks and atomically records a purchase.
  ///
  /// Fails with `ItemNotFound` or `InsufficientStock` on conflicts; in that
  /// case nothing was written.
  #[instrument(name = "purchase_service::create_purchase", skip(self, requested), fields(lines = requested.len()))]
  pub async fn create_purchase(&self, user_id: Uuid, requested: Vec<RequestedItem>) -> Result<Purchase> {
    let ctx = PurchaseCtxData::new(self.deps.clone(), user_id, requested);
    let (outcome, ctx) = self.pipeline.run_owned(ctx).await?;

    if let PipelineOutcome::Stopped { step } = outcome {
      warn!(%step, "Purchase pipeline stopped before recording.");
      return Err(AppError::Internal(format!("Purchase halted at step '{}'", step)));
    }
    let record = ctx
      .recorded
      .ok_or_else(|| AppError::Internal("Purchase completed without a stored record.".to_string()))?;

    // Names were fetched moments ago while pricing; reuse them.
    let names: HashMap<Uuid, String> = ctx
      .priced_lines
      .into_iter()
      .map(|line| (line.item_id, line.name))
      .collect();
    Ok(to_view(record, |item_id| names.get(&item_id).cloned()))
  }

  /// All purchases of `user_id`, newest first. Names are resolved live; an item
  /// deleted since yields `name: None`. Any other directory failure fails the
  /// whole request.
  #[instrument(name = "purchase_service::purchase_history", skip(self))]
  pub async fn purchase_history(&self, user_id: Uuid) -> Result<Vec<Purchase>> {
    let records = self.deps.store.purchases_for_user(user_id).await?;

    let mut names: HashMap<Uuid, Option<String>> = HashMap::new();
    for record in &records {
      for line in &record.lines {
        if names.contains_key(&line.item_id) {
          continue;
        }
        let name = match self.deps.directory.fetch_item(line.item_id).await {
          Ok(item) => Some(item.name),
          Err(DirectoryError::NotFound { item_id }) => {
            event!(Level::DEBUG, %item_id, "Purchased item no longer in directory.");
            None
          }
          Err(other) => return Err(AppError::Directory(other)),
        };
        names.insert(line.item_id, name);
      }
    }

    Ok(
      records
        .into_iter()
        .map(|record| to_view(record, |item_id| names.get(&item_id).cloned().flatten()))
        .collect(),
    )
  }
}

fn to_view(record: PurchaseRecord, name_of: impl Fn(Uuid) -> Option<String>) -> Purchase {
  Purchase {
    id: record.header.id,
    user_id: record.header.user_id,
    total_amount: record.header.total_amount,
    created_at: record.header.created_at,
    items: record
      .lines
      .into_iter()
      .map(|line| PurchaseItemView {
        item_id: line.item_id,
        quantity: line.quantity,
        name: name_of(line.item_id),
        price: line.price_at_purchase,
      })
      .collect(),
  }
}
