use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;
use crate::models::{Listing, NOT_AVAILABLE};

/// Condition tag classes, in lookup order. First match wins; a card with
/// none of them gets the [`NOT_AVAILABLE`] sentinel.
pub const CONDITION_CLASSES: [&str; 4] = [
    "listing-card__header__tags__item--condition_used",
    "listing-card__header__tags__item--condition_new",
    "listing-card__header__tags__item--condition_refurbished",
    "listing-card__header__tags__item--condition_used-abroad",
];

const CARD_SELECTOR: &str = "div.listings-cards__list-item";
const TITLE_SELECTOR: &str = "div.listing-card__header__title";
const PRICE_SELECTOR: &str = "span.listing-card__price__value";
const ADDRESS_SELECTOR: &str = "div.listing-card__header__location";
const IMAGE_SELECTOR: &str = "div.listing-card__image__inner";

/// Per-listing field extractor for category listing pages.
///
/// All selectors are compiled once at construction. Every per-card lookup
/// is defensive: a missing element yields the field's default rather than
/// an error, matching the site's frequently incomplete cards.
pub struct ListingExtractor {
    card: Selector,
    title: Selector,
    price: Selector,
    address: Selector,
    image: Selector,
    img: Selector,
    conditions: Vec<Selector>,
}

impl ListingExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            card: parse_selector(CARD_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            price: parse_selector(PRICE_SELECTOR)?,
            address: parse_selector(ADDRESS_SELECTOR)?,
            image: parse_selector(IMAGE_SELECTOR)?,
            img: parse_selector("img")?,
            conditions: CONDITION_CLASSES
                .iter()
                .map(|class| parse_selector(&format!("span.{class}")))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Extract all listings from one page of raw HTML.
    ///
    /// A card that fails extraction is logged and dropped; the batch
    /// continues. Zero matching cards yields an empty result.
    pub fn extract_page(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let cards: Vec<_> = document.select(&self.card).collect();
        if cards.is_empty() {
            tracing::warn!("no listing cards found on page");
            return Vec::new();
        }

        let mut listings = Vec::with_capacity(cards.len());
        for (index, card) in cards.iter().enumerate() {
            match self.extract_card(card) {
                Ok(listing) => listings.push(listing),
                Err(e) => tracing::warn!("skipping listing #{}: {e}", index + 1),
            }
        }
        listings
    }

    fn extract_card(&self, card: &ElementRef<'_>) -> Result<Listing, AppError> {
        let title = text_of(card, &self.title);
        let price_text = text_of(card, &self.price);
        let address = text_of(card, &self.address);
        let image_url = card
            .select(&self.image)
            .next()
            .and_then(|wrapper| wrapper.select(&self.img).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);
        let condition = self
            .conditions
            .iter()
            .find_map(|selector| text_of(card, selector));

        // A card with none of the known child elements is not a listing.
        if title.is_none()
            && price_text.is_none()
            && address.is_none()
            && image_url.is_none()
            && condition.is_none()
        {
            return Err(AppError::Extract(
                "card has no recognizable listing fields".into(),
            ));
        }

        Ok(Listing {
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            condition: condition.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            price: clean_price(price_text.as_deref().unwrap_or("")),
            address: address
                .map(|a| clean_address(&a))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            image_url: image_url.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, AppError> {
    Selector::parse(selector)
        .map_err(|e| AppError::Selector(format!("'{selector}': {e}")))
}

/// Trimmed text content of the first element matching `selector`, if any.
fn text_of(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Parse a price string like `"1 250 000 F Cfa"` into a float.
///
/// Strips U+202F narrow no-break spaces, the currency suffix, and interior
/// spaces. Empty or unparsable input yields 0.0, a silent default.
pub fn clean_price(raw: &str) -> f64 {
    let cleaned = raw
        .trim()
        .replace('\u{202f}', "")
        .replace(" F Cfa", "")
        .replace(' ', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value >= 0.0 => value,
        Ok(_) => 0.0,
        Err(_) => {
            tracing::debug!("unparsable price text {raw:?}, defaulting to 0");
            0.0
        }
    }
}

/// Collapse the comma-newline the site puts between address lines.
pub fn clean_address(raw: &str) -> String {
    raw.trim().replace(",\n", " -").trim().to_string()
}
