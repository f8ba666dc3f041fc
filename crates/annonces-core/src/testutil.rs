//! Test utilities: mock fetcher and shared HTML fixtures.
//!
//! Handwritten mocks for dependency injection in unit tests, using
//! `Arc<Mutex<_>>` for interior mutability.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::Listing;
use crate::traits::Fetcher;

/// Mock fetcher that returns a configurable response.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a default HTML string.
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }

    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body>default</body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

/// Create a listing with the fields the dashboard cares about.
pub fn make_listing(title: &str, condition: &str, price: f64) -> Listing {
    Listing {
        title: title.to_string(),
        condition: condition.to_string(),
        price,
        address: "Dakar".to_string(),
        image_url: "https://img.example.com/item.jpg".to_string(),
    }
}

/// Expat-Dakar style listing page with two cards: one complete, one with
/// most elements missing (exercises the default-on-missing paths).
pub const TWO_CARD_PAGE: &str = r#"<html><body>
  <div class="listings-cards__list">
    <div class="listings-cards__list-item">
      <div class="listing-card__header__title"> Réfrigérateur Samsung 350L </div>
      <span class="listing-card__header__tags__item--condition_new">Neuf</span>
      <span class="listing-card__price__value">1 250 000 F Cfa</span>
      <div class="listing-card__header__location">Dakar,
Plateau</div>
      <div class="listing-card__image__inner"><img src="https://img.example.com/frigo.jpg"/></div>
    </div>
    <div class="listings-cards__list-item">
      <div class="listing-card__header__title">Climatiseur LG 12000 BTU</div>
      <span class="listing-card__price__value"></span>
      <div class="listing-card__header__location">Rufisque</div>
    </div>
  </div>
</body></html>"#;
