// 📊 Category Statistics - Grouped tallies of the MP roster
// Categorical dimensions count each distinct value; numeric dimensions (age,
// asset) count members per configured range.
//
// Every member is accounted for exactly once per dimension:
//   sum(group counts) + excluded == member count

use crate::collation::thai_compare;
use crate::records::Person;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default label of the unknown group
pub const UNKNOWN_LABEL: &str = "ไม่ระบุ";

// ============================================================================
// CONFIGURATION
// ============================================================================

/// What to do with members whose value is missing or outside every bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Count them in an explicit unknown group, placed last
    Bucket,

    /// Leave them out of the groups; they are reported in `excluded`
    Exclude,
}

/// Half-open numeric range `[min, max)`; an absent bound is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeBucket {
    pub fn new(label: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        RangeBucket {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value < max)
    }
}

/// Bucket policy for the statistics.
///
/// The boundaries are presentation policy, not part of the algorithm; the
/// defaults below are what the binary uses when no config file is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Age ranges in years (default: <35, 35-44, 45-54, 55-64, 65+)
    pub age_buckets: Vec<RangeBucket>,

    /// Asset ranges in baht (default: <10M, 10M-50M, 50M-100M, 100M-500M, 500M+)
    pub asset_buckets: Vec<RangeBucket>,

    /// Default: Bucket
    pub missing: MissingPolicy,

    /// Default: "ไม่ระบุ"
    pub unknown_label: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        const MILLION: f64 = 1_000_000.0;

        StatsConfig {
            age_buckets: vec![
                RangeBucket::new("ต่ำกว่า 35 ปี", None, Some(35.0)),
                RangeBucket::new("35-44 ปี", Some(35.0), Some(45.0)),
                RangeBucket::new("45-54 ปี", Some(45.0), Some(55.0)),
                RangeBucket::new("55-64 ปี", Some(55.0), Some(65.0)),
                RangeBucket::new("65 ปีขึ้นไป", Some(65.0), None),
            ],
            asset_buckets: vec![
                RangeBucket::new("น้อยกว่า 10 ล้านบาท", None, Some(10.0 * MILLION)),
                RangeBucket::new("10-50 ล้านบาท", Some(10.0 * MILLION), Some(50.0 * MILLION)),
                RangeBucket::new("50-100 ล้านบาท", Some(50.0 * MILLION), Some(100.0 * MILLION)),
                RangeBucket::new("100-500 ล้านบาท", Some(100.0 * MILLION), Some(500.0 * MILLION)),
                RangeBucket::new("500 ล้านบาทขึ้นไป", Some(500.0 * MILLION), None),
            ],
            missing: MissingPolicy::Bucket,
            unknown_label: UNKNOWN_LABEL.to_string(),
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// One bar segment: a category label and how many members fall in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

/// Tally of one dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionStats {
    pub groups: Vec<CategoryCount>,

    /// Members left out under `MissingPolicy::Exclude`
    pub excluded: usize,
}

impl DimensionStats {
    /// Members accounted for, grouped or excluded
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.value).sum::<usize>() + self.excluded
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.groups.iter().find(|g| g.name == name).map(|g| g.value)
    }
}

/// All dimensions shown on the profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub mp_type: DimensionStats,
    pub gender: DimensionStats,
    pub age: DimensionStats,
    pub education: DimensionStats,
    pub occupation_group: DimensionStats,
    pub asset: DimensionStats,
}

impl CategoryStats {
    /// (dimension name, stats) in display order
    pub fn dimensions(&self) -> [(&'static str, &DimensionStats); 6] {
        [
            ("mp_type", &self.mp_type),
            ("gender", &self.gender),
            ("age", &self.age),
            ("education", &self.education),
            ("occupation_group", &self.occupation_group),
            ("asset", &self.asset),
        ]
    }

    pub fn summary(&self) -> String {
        self.dimensions()
            .iter()
            .map(|(name, stats)| format!("{}: {} groups", name, stats.groups.len()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// STATS ENGINE
// ============================================================================

pub struct StatsEngine {
    config: StatsConfig,
}

impl StatsEngine {
    /// Engine with the default bucket policy
    pub fn new() -> Self {
        StatsEngine {
            config: StatsConfig::default(),
        }
    }

    pub fn with_config(config: StatsConfig) -> Self {
        StatsEngine { config }
    }

    /// Tally every dimension; ages are whole years on `as_of`
    pub fn load_category_stats(&self, members: &[&Person], as_of: NaiveDate) -> CategoryStats {
        CategoryStats {
            mp_type: self.group_by(members, |m| m.mp_type.label()),
            gender: self.group_by(members, |m| m.gender.as_deref()),
            age: self.bucket_by(members, &self.config.age_buckets, |m| {
                m.age_on(as_of).map(f64::from)
            }),
            education: self.group_by(members, |m| m.education.as_deref()),
            occupation_group: self.group_by(members, |m| m.occupation_group.as_deref()),
            asset: self.bucket_by(members, &self.config.asset_buckets, |m| m.asset),
        }
    }

    /// One group per distinct non-blank value, ordered by Thai collation.
    /// A value spelled like `unknown_label` counts as missing.
    pub fn group_by<F>(&self, members: &[&Person], field: F) -> DimensionStats
    where
        F: Fn(&Person) -> Option<&str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut missing = 0;

        for &member in members {
            let value = field(member)
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != self.config.unknown_label);

            match value {
                Some(value) => *counts.entry(value).or_insert(0) += 1,
                None => missing += 1,
            }
        }

        let mut groups: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(name, value)| CategoryCount {
                name: name.to_string(),
                value,
            })
            .collect();
        groups.sort_by(|a, b| thai_compare(&a.name, &b.name));

        self.finish(groups, missing)
    }

    /// Count members per bucket, keeping empty buckets in configured order
    pub fn bucket_by<F>(&self, members: &[&Person], buckets: &[RangeBucket], field: F) -> DimensionStats
    where
        F: Fn(&Person) -> Option<f64>,
    {
        let mut counts = vec![0usize; buckets.len()];
        let mut missing = 0;

        for &member in members {
            let slot = field(member)
                .filter(|v| v.is_finite())
                .and_then(|v| buckets.iter().position(|b| b.contains(v)));

            match slot {
                Some(index) => counts[index] += 1,
                None => missing += 1,
            }
        }

        let groups = buckets
            .iter()
            .zip(counts)
            .map(|(bucket, value)| CategoryCount {
                name: bucket.label.clone(),
                value,
            })
            .collect();

        self.finish(groups, missing)
    }

    fn finish(&self, mut groups: Vec<CategoryCount>, missing: usize) -> DimensionStats {
        match self.config.missing {
            MissingPolicy::Exclude => DimensionStats {
                groups,
                excluded: missing,
            },
            MissingPolicy::Bucket => {
                // A bucket may already carry the unknown label
                let existing = groups
                    .iter()
                    .position(|g| g.name == self.config.unknown_label);

                match existing {
                    Some(index) => groups[index].value += missing,
                    None if missing > 0 => groups.push(CategoryCount {
                        name: self.config.unknown_label.clone(),
                        value: missing,
                    }),
                    None => {}
                }
                DimensionStats {
                    groups,
                    excluded: 0,
                }
            }
        }
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
