//! Pairwise overlap check over a sub-field set.
//!
//! Sub-fields are sorted by `xmin` and each one is compared only against the
//! following sub-fields whose `xmin` lies before its `xmax`. The check stops at the
//! first overlapping pair; it is a pass/fail invariant check, not an overlap report.
use std::fmt;

use crate::tiling::{FieldId, SubField};

/// First pair of sub-fields found to overlap with positive area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapPair {
    /// Sub-field earlier in `xmin` order.
    pub first: FieldId,
    /// Sub-field later in `xmin` order.
    pub second: FieldId,
}

impl fmt::Display for OverlapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-fields {} and {}", self.first, self.second)
    }
}

/// Returns the first overlapping pair, or `None` when the set is overlap-free.
///
/// Touching edges or corners are not overlap.
pub fn find_first_overlap(sub_fields: &[SubField]) -> Option<OverlapPair> {
    let mut sorted: Vec<&SubField> = sub_fields.iter().collect();
    sorted.sort_by(|a, b| a.rect.xmin.total_cmp(&b.rect.xmin));

    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            if b.rect.xmin >= a.rect.xmax {
                break;
            }
            if a.rect.overlaps(&b.rect) {
                return Some(OverlapPair {
                    first: a.id,
                    second: b.id,
                });
            }
        }
    }
    None
}

/// Returns `true` when no two sub-fields overlap.
pub fn verify_no_overlap(sub_fields: &[SubField]) -> bool {
    find_first_overlap(sub_fields).is_none()
}
