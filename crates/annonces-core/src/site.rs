use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::AppError;

/// Base URL of the scraped site.
pub const BASE_URL: &str = "https://www.expat-dakar.com";

/// Highest page number offered by the site's category pagination.
pub const MAX_PAGE: u32 = 17;

/// The four fixed appliance categories the scraper covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Refrigerateurs,
    Climatisation,
    Cuisinieres,
    MachinesALaver,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Refrigerateurs,
        Category::Climatisation,
        Category::Cuisinieres,
        Category::MachinesALaver,
    ];

    /// URL path segment on the site, also used in snapshot file names.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Refrigerateurs => "refrigerateurs-congelateurs",
            Category::Climatisation => "climatisation",
            Category::Cuisinieres => "cuisinieres-fours",
            Category::MachinesALaver => "machines-a-laver",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Category::Refrigerateurs => "Réfrigérateurs & congélateurs",
            Category::Climatisation => "Climatisation",
            Category::Cuisinieres => "Cuisinières & fours",
            Category::MachinesALaver => "Machines à laver",
        }
    }

    /// Parse a category from its slug.
    pub fn parse(s: &str) -> Result<Category, AppError> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == s)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "unknown category '{s}' (expected one of: {})",
                    Category::ALL.map(|c| c.slug()).join(", ")
                ))
            })
    }

    /// Full URL of one paginated category listing page.
    pub fn page_url(self, page: u32) -> Result<Url, AppError> {
        let mut url = Url::parse(BASE_URL)
            .and_then(|base| base.join(self.slug()))
            .map_err(|e| AppError::Config(format!("bad category URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let url = Category::Climatisation.page_url(3).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.expat-dakar.com/climatisation?page=3"
        );
    }

    #[test]
    fn test_slug_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.slug()).unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        let err = Category::parse("televiseurs").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("televiseurs"));
    }

    #[test]
    fn test_display_is_slug() {
        assert_eq!(
            Category::MachinesALaver.to_string(),
            "machines-a-laver"
        );
    }
}
