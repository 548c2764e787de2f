//! Two-level tiling of care areas into main fields and sub-fields.
use crate::geometry::Rect;

pub mod main_field;
pub mod sub_field;

pub use main_field::plan_main_fields;
pub use sub_field::{plan_sub_fields, plan_sub_fields_indexed};

/// Run-scoped field identifier, starting at 1.
pub type FieldId = u64;

/// Coarse tile produced from one care area.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainField {
    pub id: FieldId,
    pub rect: Rect,
}

/// Fine tile produced from one main field and clipped to one care area.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubField {
    pub id: FieldId,
    pub rect: Rect,
    pub main_field_id: FieldId,
}

/// Monotonic id counter owned by a single planner invocation.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: FieldId,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id and advances the counter.
    #[inline]
    pub fn next_id(&mut self) -> FieldId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

/// Grid cells `[origin + i * width, origin + (i + 1) * width)` for every `i` whose lower
/// bound stays strictly below `end`.
///
/// Both bounds are computed by multiplication, so neighbouring cells share the exact same
/// edge and the count is `ceil((end - origin) / width)` without drift from repeated addition.
pub(crate) fn grid_cells(origin: f64, end: f64, width: f64) -> impl Iterator<Item = (f64, f64)> {
    debug_assert!(width > 0.0, "width must be > 0");
    (0u64..)
        .map(move |i| (origin + i as f64 * width, origin + (i + 1) as f64 * width))
        .take_while(move |&(lo, _)| lo < end)
}
