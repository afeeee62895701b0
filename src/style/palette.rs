//! Depth buckets and their display colors.
//!
//! Buckets are scanned from the deepest threshold down and the first one
//! whose lower edge admits the depth wins. A lower edge is either
//! inclusive (`depth >= min_depth`) or exclusive (`depth > min_depth`), so
//! the standard table reads `[90, ∞)`, `[70, 90)`, `[50, 70)`, `[30, 50)`,
//! `(10, 30)` and the catch-all `(-∞, 10]`. Anything the buckets reject
//! (and NaN) lands in the `fallback` color.

use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// One depth interval and its color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBucket {
    /// Lower edge in kilometers
    pub min_depth: f64,
    /// CSS color used for markers and legend swatches
    pub color: String,
    /// Whether a depth equal to `min_depth` belongs to this bucket
    #[serde(default = "default_inclusive")]
    pub inclusive: bool,
}

fn default_inclusive() -> bool {
    true
}

impl DepthBucket {
    /// Bucket starting at `min_depth` inclusive
    pub fn new(min_depth: f64, color: impl Into<String>) -> Self {
        Self {
            min_depth,
            color: color.into(),
            inclusive: true,
        }
    }

    /// Bucket starting just above `min_depth`; the edge itself goes shallower
    pub fn exclusive(min_depth: f64, color: impl Into<String>) -> Self {
        Self {
            inclusive: false,
            ..Self::new(min_depth, color)
        }
    }

    pub fn admits(&self, depth_km: f64) -> bool {
        if self.inclusive {
            depth_km >= self.min_depth
        } else {
            depth_km > self.min_depth
        }
    }
}

/// A depth interval as seen by the legend, shallowest first
#[derive(Debug, Clone, PartialEq)]
pub struct DepthRange<'a> {
    /// `None` for the open-ended shallow catch-all
    pub lower: Option<f64>,
    /// `None` for the open-ended deepest bucket
    pub upper: Option<f64>,
    pub lower_inclusive: bool,
    pub upper_inclusive: bool,
    pub color: &'a str,
}

impl DepthRange<'_> {
    pub fn contains(&self, depth_km: f64) -> bool {
        let above = match self.lower {
            Some(lo) if self.lower_inclusive => depth_km >= lo,
            Some(lo) => depth_km > lo,
            None => true,
        };
        let below = match self.upper {
            Some(hi) if self.upper_inclusive => depth_km <= hi,
            Some(hi) => depth_km < hi,
            None => true,
        };
        above && below
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthPalette {
    /// Buckets ordered from deepest to shallowest threshold
    pub buckets: Vec<DepthBucket>,
    /// Color for depths below the shallowest threshold
    pub fallback: String,
}

impl DepthPalette {
    /// Named CSS colors, darker for deeper events
    pub fn standard() -> Self {
        Self {
            buckets: vec![
                DepthBucket::new(90.0, "darkred"),
                DepthBucket::new(70.0, "orangered"),
                DepthBucket::new(50.0, "darkorange"),
                DepthBucket::new(30.0, "orange"),
                DepthBucket::exclusive(10.0, "yellow"),
            ],
            fallback: "limegreen".to_string(),
        }
    }

    /// Same thresholds with hex colors running red to lime
    pub fn hex() -> Self {
        Self {
            buckets: vec![
                DepthBucket::new(90.0, "#ea2c2c"),
                DepthBucket::new(70.0, "#ea822c"),
                DepthBucket::new(50.0, "#ee9c00"),
                DepthBucket::new(30.0, "#eecc00"),
                DepthBucket::exclusive(10.0, "#d4ee00"),
            ],
            fallback: "#98ee00".to_string(),
        }
    }

    /// Color of the bucket containing `depth_km`
    pub fn color_for(&self, depth_km: f64) -> &str {
        self.buckets
            .iter()
            .find(|bucket| bucket.admits(depth_km))
            .map(|bucket| bucket.color.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Number of distinct buckets including the catch-all
    pub fn bucket_count(&self) -> usize {
        self.buckets.len() + 1
    }

    /// All colors, deepest first, catch-all last
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .map(|bucket| bucket.color.as_str())
            .chain(std::iter::once(self.fallback.as_str()))
    }

    /// The partition of the depth axis, shallowest interval first
    pub fn ranges(&self) -> Vec<DepthRange<'_>> {
        let mut ranges = Vec::with_capacity(self.bucket_count());
        let shallowest = self.buckets.last();
        ranges.push(DepthRange {
            lower: None,
            upper: shallowest.map(|b| b.min_depth),
            lower_inclusive: false,
            upper_inclusive: shallowest.map_or(false, |b| !b.inclusive),
            color: self.fallback.as_str(),
        });

        for (i, bucket) in self.buckets.iter().enumerate().rev() {
            let deeper = i.checked_sub(1).map(|j| &self.buckets[j]);
            ranges.push(DepthRange {
                lower: Some(bucket.min_depth),
                upper: deeper.map(|b| b.min_depth),
                lower_inclusive: bucket.inclusive,
                upper_inclusive: deeper.map_or(false, |b| !b.inclusive),
                color: bucket.color.as_str(),
            });
        }

        ranges
    }

    /// Checks thresholds are finite and strictly descending and colors are set
    pub fn validate(&self) -> Result<()> {
        if self.fallback.trim().is_empty() {
            return Err(MapError::Config("palette fallback color is empty".into()));
        }

        for bucket in &self.buckets {
            if !bucket.min_depth.is_finite() {
                return Err(MapError::Config(format!(
                    "palette threshold {} is not finite",
                    bucket.min_depth
                )));
            }
            if bucket.color.trim().is_empty() {
                return Err(MapError::Config(format!(
                    "palette bucket at {} km has no color",
                    bucket.min_depth
                )));
            }
        }

        if let Some(pair) = self
            .buckets
            .windows(2)
            .find(|pair| pair[0].min_depth <= pair[1].min_depth)
        {
            return Err(MapError::Config(format!(
                "palette thresholds must strictly descend, found {} before {}",
                pair[0].min_depth, pair[1].min_depth
            )));
        }

        Ok(())
    }
}

impl Default for DepthPalette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_boundaries() {
        let palette = DepthPalette::standard();

        assert_eq!(palette.color_for(90.0), "darkred");
        assert_eq!(palette.color_for(650.0), "darkred");
        assert_eq!(palette.color_for(89.999), "orangered");
        assert_eq!(palette.color_for(70.0), "orangered");
        assert_eq!(palette.color_for(69.9), "darkorange");
        assert_eq!(palette.color_for(50.0), "darkorange");
        assert_eq!(palette.color_for(30.0), "orange");
        assert_eq!(palette.color_for(10.001), "yellow");
        assert_eq!(palette.color_for(10.0), "limegreen");
        assert_eq!(palette.color_for(9.999), "limegreen");
        assert_eq!(palette.color_for(-5.0), "limegreen");
    }

    #[test]
    fn test_hex_shares_edges() {
        let palette = DepthPalette::hex();
        assert_eq!(palette.color_for(10.0), "#98ee00");
        assert_eq!(palette.color_for(10.5), "#d4ee00");
        assert_eq!(palette.color_for(90.0), "#ea2c2c");
    }

    #[test]
    fn test_bucket_edge_inclusivity() {
        let open = DepthBucket::exclusive(10.0, "yellow");
        assert!(!open.admits(10.0));
        assert!(open.admits(10.000_001));

        let closed = DepthBucket::new(10.0, "yellow");
        assert!(closed.admits(10.0));
        assert!(!closed.admits(9.999));
    }

    #[test]
    fn test_inclusive_defaults_when_deserializing() {
        let bucket: DepthBucket =
            serde_json::from_str(r#"{"min_depth": 5.0, "color": "teal"}"#).unwrap();
        assert!(bucket.inclusive);

        let palette: DepthPalette =
            serde_json::from_str(&serde_json::to_string(&DepthPalette::standard()).unwrap())
                .unwrap();
        assert_eq!(palette.color_for(10.0), "limegreen");
    }

    #[test]
    fn test_nan_depth_is_catch_all() {
        assert_eq!(DepthPalette::standard().color_for(f64::NAN), "limegreen");
    }

    #[test]
    fn test_every_depth_hits_exactly_one_range() {
        let palette = DepthPalette::standard();
        let ranges = palette.ranges();

        let mut depth = -50.0;
        while depth < 200.0 {
            let matching: Vec<_> = ranges.iter().filter(|r| r.contains(depth)).collect();
            assert_eq!(matching.len(), 1, "depth {depth}");
            assert_eq!(matching[0].color, palette.color_for(depth), "depth {depth}");
            depth += 0.25;
        }
    }

    #[test]
    fn test_ranges_shallowest_first() {
        let palette = DepthPalette::standard();
        let ranges = palette.ranges();

        assert_eq!(ranges.len(), 6);
        assert_eq!(ranges[0].lower, None);
        assert_eq!(ranges[0].upper, Some(10.0));
        assert!(ranges[0].upper_inclusive);
        assert_eq!(ranges[0].color, "limegreen");
        assert_eq!(ranges[1].lower, Some(10.0));
        assert!(!ranges[1].lower_inclusive);
        assert_eq!(ranges[1].upper, Some(30.0));
        assert!(!ranges[1].upper_inclusive);
        assert!(ranges[2].lower_inclusive);
        assert_eq!(ranges[5].lower, Some(90.0));
        assert_eq!(ranges[5].upper, None);
        assert_eq!(ranges[5].color, "darkred");
    }

    #[test]
    fn test_colors_order() {
        let palette = DepthPalette::standard();
        let colors: Vec<_> = palette.colors().collect();
        assert_eq!(
            colors,
            vec!["darkred", "orangered", "darkorange", "orange", "yellow", "limegreen"]
        );
    }

    #[test]
    fn test_validate() {
        assert!(DepthPalette::standard().validate().is_ok());
        assert!(DepthPalette::hex().validate().is_ok());

        let mut unordered = DepthPalette::standard();
        unordered.buckets.swap(0, 1);
        assert!(matches!(unordered.validate(), Err(MapError::Config(_))));

        let mut no_color = DepthPalette::standard();
        no_color.buckets[2].color = " ".to_string();
        assert!(no_color.validate().is_err());

        let mut infinite = DepthPalette::standard();
        infinite.buckets[0].min_depth = f64::INFINITY;
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_fallback_only_palette() {
        let palette = DepthPalette {
            buckets: Vec::new(),
            fallback: "gray".to_string(),
        };
        assert!(palette.validate().is_ok());
        assert_eq!(palette.color_for(500.0), "gray");
        assert_eq!(palette.ranges().len(), 1);
    }
}
