//! Grade banding into coarse age categories.

use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive, str::FromStr};

use super::errors::{RosterError, RosterResult};

/// Coarse age band derived from a participant's grade.
///
/// Variant order matches the alphabetical order of the labels, so sorting
/// categories and sorting their labels agree.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Junior,
    Middle,
    Senior,
    #[default]
    Unknown,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Junior,
        Category::Middle,
        Category::Senior,
        Category::Unknown,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Junior => write!(f, "Junior"),
            Category::Middle => write!(f, "Middle"),
            Category::Senior => write!(f, "Senior"),
            Category::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for Category {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "junior" | "juniors" => Ok(Category::Junior),
            "middle" => Ok(Category::Middle),
            "senior" | "seniors" => Ok(Category::Senior),
            "unknown" => Ok(Category::Unknown),
            other => Err(RosterError::UnknownCategory(other.to_string())),
        }
    }
}

/// Three contiguous inclusive grade ranges for Junior, Middle and Senior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BandsRecord")]
pub struct CategoryBands {
    junior: RangeInclusive<i32>,
    middle: RangeInclusive<i32>,
    senior: RangeInclusive<i32>,
}

impl CategoryBands {
    /// Build custom bands.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::InvalidBands` if a range is empty or the ranges
    /// are not contiguous (`junior.end + 1 == middle.start`, and so on).
    pub fn new(
        junior: RangeInclusive<i32>,
        middle: RangeInclusive<i32>,
        senior: RangeInclusive<i32>,
    ) -> RosterResult<Self> {
        for (label, range) in [("junior", &junior), ("middle", &middle), ("senior", &senior)] {
            if range.is_empty() {
                return Err(RosterError::InvalidBands(format!(
                    "{label} range {}-{} is empty",
                    range.start(),
                    range.end()
                )));
            }
        }

        if junior.end() + 1 != *middle.start() || middle.end() + 1 != *senior.start() {
            return Err(RosterError::InvalidBands(format!(
                "ranges {}-{}, {}-{}, {}-{} are not contiguous",
                junior.start(),
                junior.end(),
                middle.start(),
                middle.end(),
                senior.start(),
                senior.end()
            )));
        }

        Ok(Self {
            junior,
            middle,
            senior,
        })
    }

    /// Map a grade to its category. Grades outside every band are `Unknown`.
    pub fn classify(&self, grade: i32) -> Category {
        if self.junior.contains(&grade) {
            Category::Junior
        } else if self.middle.contains(&grade) {
            Category::Middle
        } else if self.senior.contains(&grade) {
            Category::Senior
        } else {
            Category::Unknown
        }
    }

    pub fn range_for(&self, category: Category) -> Option<&RangeInclusive<i32>> {
        match category {
            Category::Junior => Some(&self.junior),
            Category::Middle => Some(&self.middle),
            Category::Senior => Some(&self.senior),
            Category::Unknown => None,
        }
    }
}

#[derive(Deserialize)]
struct BandsRecord {
    junior: RangeInclusive<i32>,
    middle: RangeInclusive<i32>,
    senior: RangeInclusive<i32>,
}

impl TryFrom<BandsRecord> for CategoryBands {
    type Error = RosterError;

    fn try_from(record: BandsRecord) -> Result<Self, Self::Error> {
        Self::new(record.junior, record.middle, record.senior)
    }
}

impl Default for CategoryBands {
    /// Grades 4-5 Junior, 6-7 Middle, 8-10 Senior.
    fn default() -> Self {
        Self {
            junior: 4..=5,
            middle: 6..=7,
            senior: 8..=10,
        }
    }
}

/// Classify a grade with the default bands.
pub fn classify(grade: i32) -> Category {
    CategoryBands::default().classify(grade)
}

/// Parse a grade range written as `"4-5"` or a single grade `"7"`.
pub fn parse_grade_range(s: &str) -> RosterResult<RangeInclusive<i32>> {
    let invalid = || RosterError::InvalidBands(format!("cannot parse grade range '{s}'"));

    match s.trim().split_once('-') {
        Some((lo, hi)) => {
            let lo = lo.trim().parse().map_err(|_| invalid())?;
            let hi = hi.trim().parse().map_err(|_| invalid())?;
            Ok(lo..=hi)
        }
        None => {
            let grade = s.trim().parse().map_err(|_| invalid())?;
            Ok(grade..=grade)
        }
    }
}
