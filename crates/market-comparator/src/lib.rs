//! Market comparison
//!
//! Places a property's cap rate against a segment average. Segment data is a
//! static policy table standing in for a live market-data feed.

use analysis_core::{CompetitiveRating, MarketComparison, MarketTrend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSegment {
    Urban,
    Suburban,
    Rural,
    Default,
}

impl MarketSegment {
    /// Address heuristic: anything mentioning "city" is urban, the rest falls
    /// back to the default segment. Suburban and rural are never selected
    /// here; they wait on a real location classifier.
    pub fn classify(address: &str) -> Self {
        if address.to_lowercase().contains("city") {
            MarketSegment::Urban
        } else {
            MarketSegment::Default
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentProfile {
    pub average_cap_rate: f64,
    pub trend: MarketTrend,
}

/// Segment policy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTable {
    pub urban: SegmentProfile,
    pub suburban: SegmentProfile,
    pub rural: SegmentProfile,
    pub default: SegmentProfile,
}

impl Default for MarketTable {
    fn default() -> Self {
        Self {
            urban: SegmentProfile { average_cap_rate: 5.5, trend: MarketTrend::Rising },
            suburban: SegmentProfile { average_cap_rate: 7.2, trend: MarketTrend::Stable },
            rural: SegmentProfile { average_cap_rate: 8.1, trend: MarketTrend::Declining },
            default: SegmentProfile { average_cap_rate: 6.5, trend: MarketTrend::Stable },
        }
    }
}

impl MarketTable {
    pub fn profile(&self, segment: MarketSegment) -> SegmentProfile {
        match segment {
            MarketSegment::Urban => self.urban,
            MarketSegment::Suburban => self.suburban,
            MarketSegment::Rural => self.rural,
            MarketSegment::Default => self.default,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarketComparator {
    table: MarketTable,
}

impl MarketComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: MarketTable) -> Self {
        Self { table }
    }

    pub fn compare(&self, cap_rate: f64, address: &str) -> MarketComparison {
        let profile = self.table.profile(MarketSegment::classify(address));

        MarketComparison {
            average_cap_rate: profile.average_cap_rate,
            market_trend: profile.trend,
            competitive_rating: CompetitiveRating::from_cap_rate(cap_rate, profile.average_cap_rate),
        }
    }
}
