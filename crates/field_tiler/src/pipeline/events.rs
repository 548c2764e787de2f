//! Event types and sinks for observing tiling runs.
//!
//! This module defines [`TilingEvent`] and the sinks that receive them while a run
//! executes via
//! [`crate::pipeline::runner::TilingRunner`] or [`crate::pipeline::runner::run_tiling`].
use crate::analysis::{CoverageReport, OverlapPair};
use crate::pipeline::runner::RunConfig;

/// Describes events emitted by a tiling run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum TilingEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// The run configuration used.
        config: RunConfig,
        /// Number of care areas in the input.
        care_area_count: usize,
    },

    /// Emitted after main fields were placed.
    MainFieldsPlanned {
        /// Number of main fields produced.
        count: usize,
    },

    /// Emitted after sub-fields were placed and clipped.
    SubFieldsPlanned {
        /// Number of sub-fields produced.
        count: usize,
        /// Whether the care-area lookup went through a spatial index.
        indexed: bool,
    },

    /// Emitted after the overlap check.
    OverlapChecked {
        /// First overlapping pair, if any.
        overlap: Option<OverlapPair>,
    },

    /// Emitted after the coverage ratio was computed.
    CoverageComputed {
        /// Areas and ratio.
        report: CoverageReport,
    },

    /// Emitted when the run finishes.
    RunFinished {
        main_field_count: usize,
        sub_field_count: usize,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. stage name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`TilingEvent`], used for sink filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TilingEventKind {
    RunStarted,
    MainFieldsPlanned,
    SubFieldsPlanned,
    OverlapChecked,
    CoverageComputed,
    RunFinished,
    Warning,
}

impl TilingEvent {
    pub fn kind(&self) -> TilingEventKind {
        match self {
            TilingEvent::RunStarted { .. } => TilingEventKind::RunStarted,
            TilingEvent::MainFieldsPlanned { .. } => TilingEventKind::MainFieldsPlanned,
            TilingEvent::SubFieldsPlanned { .. } => TilingEventKind::SubFieldsPlanned,
            TilingEvent::OverlapChecked { .. } => TilingEventKind::OverlapChecked,
            TilingEvent::CoverageComputed { .. } => TilingEventKind::CoverageComputed,
            TilingEvent::RunFinished { .. } => TilingEventKind::RunFinished,
            TilingEvent::Warning { .. } => TilingEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`TilingEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: TilingEvent);

    /// Lets a sink skip building events it ignores.
    #[inline]
    fn wants(&self, _kind: TilingEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: TilingEvent) {}

    #[inline]
    fn wants(&self, _kind: TilingEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(TilingEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(TilingEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(TilingEvent),
{
    #[inline]
    fn send(&mut self, event: TilingEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<TilingEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn as_slice(&self) -> &[TilingEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: TilingEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> TilingEvent {
        TilingEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(TilingEventKind::Warning));
        assert!(VecSink::new().wants(TilingEventKind::Warning));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(TilingEvent::MainFieldsPlanned { count: 3 });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.as_slice()[1].kind(), TilingEventKind::MainFieldsPlanned);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        sink.send(TilingEvent::MainFieldsPlanned { count: 2 });
        drop(sink);
        assert_eq!(count, 2);
    }
}
