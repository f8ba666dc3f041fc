//! Dashboard statistics computed over saved snapshots.

use std::collections::BTreeMap;

use crate::models::Listing;

/// One bucket of the price distribution. `upper` is exclusive except for
/// the last bucket, which also holds the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Frequency of each distinct condition label, sorted by descending count,
/// ties broken by label.
pub fn condition_counts(listings: &[Listing]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for listing in listings {
        *counts.entry(listing.condition.clone()).or_default() += 1;
    }

    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Equal-width price histogram over `[min, max]` of all prices.
///
/// Degenerate inputs (no listings, zero buckets, or all prices equal)
/// collapse to at most one bucket.
pub fn price_histogram(listings: &[Listing], buckets: usize) -> Vec<PriceBucket> {
    if listings.is_empty() || buckets == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for listing in listings {
        min = min.min(listing.price);
        max = max.max(listing.price);
    }

    if (max - min).abs() < f64::EPSILON {
        return vec![PriceBucket {
            lower: min,
            upper: max,
            count: listings.len(),
        }];
    }

    let width = (max - min) / buckets as f64;
    let mut out: Vec<PriceBucket> = (0..buckets)
        .map(|i| PriceBucket {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for listing in listings {
        let mut index = ((listing.price - min) / width) as usize;
        if index >= buckets {
            index = buckets - 1;
        }
        out[index].count += 1;
    }
    out
}
