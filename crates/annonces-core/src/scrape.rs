use crate::error::AppError;
use crate::extract::ListingExtractor;
use crate::models::Listing;
use crate::site::Category;
use crate::traits::Fetcher;

/// Orchestrates the scrape pipeline for one category page: fetch → extract.
///
/// Generic over the [`Fetcher`] via a trait, enabling dependency injection
/// and testability without real HTTP calls. One page at a time, strictly
/// sequential.
pub struct ScrapeService<F: Fetcher> {
    fetcher: F,
    extractor: ListingExtractor,
}

impl<F: Fetcher> ScrapeService<F> {
    pub fn new(fetcher: F) -> Result<Self, AppError> {
        Ok(Self {
            fetcher,
            extractor: ListingExtractor::new()?,
        })
    }

    /// Fetch one category page and extract its listings.
    ///
    /// Fetch failure propagates; an empty page is not an error.
    pub async fn scrape_page(
        &self,
        category: Category,
        page: u32,
    ) -> Result<Vec<Listing>, AppError> {
        let url = category.page_url(page)?;
        tracing::info!("Fetching {}", url);

        let html = self.fetcher.fetch(url.as_str()).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let listings = self.extractor.extract_page(&html);
        if listings.is_empty() {
            tracing::warn!("No listings found for {} page {}", category.slug(), page);
        } else {
            tracing::info!("Extracted {} listings", listings.len());
        }

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockFetcher, TWO_CARD_PAGE};

    #[tokio::test]
    async fn happy_path() {
        let svc = ScrapeService::new(MockFetcher::new(TWO_CARD_PAGE)).unwrap();
        let listings = svc
            .scrape_page(Category::Refrigerateurs, 1)
            .await
            .unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Réfrigérateur Samsung 350L");
        assert_eq!(listings[0].price, 1_250_000.0);
    }

    #[tokio::test]
    async fn empty_page_yields_empty_result() {
        let svc =
            ScrapeService::new(MockFetcher::new("<html><body>rien</body></html>")).unwrap();
        let listings = svc.scrape_page(Category::Climatisation, 3).await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn fetch_error_propagates() {
        let svc = ScrapeService::new(MockFetcher::with_error(AppError::Http(
            "HTTP 503 for https://www.expat-dakar.com/machines-a-laver?page=1".into(),
        )))
        .unwrap();

        let err = svc
            .scrape_page(Category::MachinesALaver, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
        assert!(err.is_fetch_failure());
    }
}
