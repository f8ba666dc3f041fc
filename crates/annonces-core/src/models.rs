use serde::{Deserialize, Serialize};

/// Sentinel for any field whose source element is missing from a card.
pub const NOT_AVAILABLE: &str = "Pas Disponible";

/// CSV column headers, in serialization order.
pub const CSV_HEADERS: [&str; 5] = [
    "Details",
    "Condition",
    "Price (F Cfa)",
    "Address",
    "Image Link",
];

/// One scraped classified-ad record.
///
/// Constructed fresh per scrape invocation, never mutated. The serde
/// renames drive the CSV header row, so the exported columns match the
/// site's tabular view exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "Details")]
    pub title: String,

    /// Text of the first matching condition tag, or [`NOT_AVAILABLE`].
    #[serde(rename = "Condition")]
    pub condition: String,

    /// Non-negative amount in F CFA; defaults to 0.0 when the price text
    /// is empty or unparsable.
    #[serde(rename = "Price (F Cfa)")]
    pub price: f64,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Image Link")]
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_headers_match_serde_renames() {
        let listing = Listing {
            title: "Réfrigérateur Samsung".to_string(),
            condition: "Neuf".to_string(),
            price: 250_000.0,
            address: "Dakar".to_string(),
            image_url: "https://img.example.com/frigo.jpg".to_string(),
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&listing).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = data.lines().next().unwrap();
        assert_eq!(header, CSV_HEADERS.join(","));
    }

    #[test]
    fn listing_roundtrips_through_csv() {
        let listing = Listing {
            title: "Climatiseur LG".to_string(),
            condition: NOT_AVAILABLE.to_string(),
            price: 0.0,
            address: "Dakar - Plateau".to_string(),
            image_url: NOT_AVAILABLE.to_string(),
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&listing).unwrap();
        let data = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let back: Listing = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(back, listing);
    }
}
