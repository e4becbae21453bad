// services/shop/src/clients/item_client.rs

//! Read access to the item directory (the item service) from the purchase
//! service.

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{event, instrument, Level};
use uuid::Uuid;

/// The subset of an item the purchase workflow needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryItem {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub stock: i32,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
  #[error("item {item_id} not found in directory")]
  NotFound { item_id: Uuid },

  #[error("item directory did not answer in time")]
  Timeout,

  #[error("item directory unreachable: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("item directory answered with status {status}")]
  UnexpectedStatus { status: u16 },

  #[error("item directory payload could not be decoded: {0}")]
  Decode(String),
}

#[async_trait]
pub trait ItemDirectory: Send + Sync {
  async fn fetch_item(&self, item_id: Uuid) -> Result<DirectoryItem, DirectoryError>;
}

/// `ItemDirectory` over HTTP: `GET {base_url}/items/{id}` with a hard
/// per-request timeout and no retries.
#[derive(Clone)]
pub struct HttpItemDirectory {
  client: reqwest::Client,
  base_url: String,
}

impl HttpItemDirectory {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(DirectoryError::Transport)?;
    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    })
  }

  fn item_url(&self, item_id: Uuid) -> String {
    format!("{}/items/{}", self.base_url, item_id)
  }
}

fn classify(err: reqwest::Error) -> DirectoryError {
  if err.is_timeout() {
    DirectoryError::Timeout
  } else if err.is_decode() {
    DirectoryError::Decode(err.to_string())
  } else {
    DirectoryError::Transport(err)
  }
}

#[async_trait]
impl ItemDirectory for HttpItemDirectory {
  #[instrument(name = "item_client::fetch_item", skip(self), err(Display))]
  async fn fetch_item(&self, item_id: Uuid) -> Result<DirectoryItem, DirectoryError> {
    let response = self.client.get(self.item_url(item_id)).send().await.map_err(classify)?;

    match response.status() {
      StatusCode::NOT_FOUND => Err(DirectoryError::NotFound { item_id }),
      status if status.is_success() => {
        let item = response.json::<DirectoryItem>().await.map_err(classify)?;
        event!(Level::DEBUG, %item_id, stock = item.stock, "Fetched item from directory.");
        Ok(item)
      }
      status => Err(DirectoryError::UnexpectedStatus {
        status: status.as_u16(),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn item_url_ignores_trailing_slash() {
    let directory = HttpItemDirectory::new("http://items.local/api/v1/", Duration::from_secs(5)).unwrap();
    let id = Uuid::nil();
    assert_eq!(
      directory.item_url(id),
      "http://items.local/api/v1/items/00000000-0000-0000-0000-000000000000"
    );
  }

  #[test]
  fn directory_item_reads_item_service_payload() {
    let payload = r#"{
      "id": "6f1c1c0e-8a62-4a57-9d2e-3b1f1b0c9a11",
      "name": "Widget",
      "description": "ignored",
      "price": 10.5,
      "stock": 5,
      "created_at": "2024-01-01T00:00:00Z",
      "updated_at": "2024-01-01T00:00:00Z"
    }"#;
    let item: DirectoryItem = serde_json::from_str(payload).unwrap();
    assert_eq!(item.name, "Widget");
    assert_eq!(item.price, Decimal::new(105, 1));
    assert_eq!(item.stock, 5);
  }

  mod over_http {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::{web, App, HttpResponse, HttpServer};

    const WIDGET: Uuid = Uuid::from_u128(0x1);
    const SLOW: Uuid = Uuid::from_u128(0x2);
    const BROKEN: Uuid = Uuid::from_u128(0x3);
    const GARBLED: Uuid = Uuid::from_u128(0x4);

    async fn item_route(path: web::Path<Uuid>) -> HttpResponse {
      match path.into_inner() {
        WIDGET => HttpResponse::Ok().json(DirectoryItem {
          id: WIDGET,
          name: "Widget".to_string(),
          price: Decimal::new(1000, 2),
          stock: 5,
        }),
        SLOW => {
          actix_web::rt::time::sleep(Duration::from_secs(3)).await;
          HttpResponse::Ok().finish()
        }
        BROKEN => HttpResponse::ServiceUnavailable().finish(),
        GARBLED => HttpResponse::Ok().content_type("application/json").body("{ not json"),
        _ => HttpResponse::NotFound().json(serde_json::json!({ "error": "Item not found" })),
      }
    }

    fn start_item_service() -> (String, ServerHandle) {
      let server = HttpServer::new(|| App::new().route("/api/v1/items/{item_id}", web::get().to(item_route)))
        .workers(1)
        .bind("127.0.0.1:0")
        .unwrap();
      let addr = server.addrs()[0];
      let server = server.run();
      let handle = server.handle();
      actix_web::rt::spawn(server);
      (format!("http://{}/api/v1", addr), handle)
    }

    #[actix_web::test]
    async fn maps_item_service_answers_onto_directory_errors() {
      let (base_url, handle) = start_item_service();
      let directory = HttpItemDirectory::new(base_url, Duration::from_millis(300)).unwrap();

      let item = directory.fetch_item(WIDGET).await.unwrap();
      assert_eq!(item.name, "Widget");
      assert_eq!(item.price, Decimal::new(1000, 2));

      let unknown = Uuid::new_v4();
      assert!(matches!(
        directory.fetch_item(unknown).await,
        Err(DirectoryError::NotFound { item_id }) if item_id == unknown
      ));
      assert!(matches!(
        directory.fetch_item(BROKEN).await,
        Err(DirectoryError::UnexpectedStatus { status: 503 })
      ));
      assert!(matches!(directory.fetch_item(GARBLED).await, Err(DirectoryError::Decode(_))));
      assert!(matches!(directory.fetch_item(SLOW).await, Err(DirectoryError::Timeout)));

      handle.stop(false).await;
    }

    #[actix_web::test]
    async fn refused_connection_is_a_transport_error() {
      let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
      let directory = HttpItemDirectory::new(format!("http://127.0.0.1:{}/api/v1", port), Duration::from_millis(300)).unwrap();

      assert!(matches!(
        directory.fetch_item(WIDGET).await,
        Err(DirectoryError::Transport(_))
      ));
    }
  }
}
