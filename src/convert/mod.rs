#![doc = r#"
Conversions between ticks and every [`TimeSpan`] representation.

Use [`time`] for positions measured from tick zero and [`length`] for
distances starting at an [`Anchor`]. Both accept a [`TempoMap`] or any
[`TempoMapView`] of one. [`round()`] snaps a length to a grid of steps.

A conversion from one representation to another always goes through ticks,
unless the value already has the requested representation, in which case it
is returned as is and the tempo map is not read.

[`TempoMap`]: crate::tempo_map::TempoMap
"#]

pub mod length;
pub mod time;

mod bar_beat;
mod bar_beat_fraction;
mod bar_beat_ticks;
mod math;
pub use math::MAX_MATH_DEPTH;
mod metric;
mod midi;
mod musical;
mod round;
pub use round::{TimeSpanRoundingPolicy, round};

use crate::{
    ConvertResult, TimeSpanError, ensure_non_negative,
    span::{
        BarBeatFractionTimeSpan, BarBeatTicksTimeSpan, MetricTimeSpan, MidiTimeSpan,
        MusicalTimeSpan, TimeSpan, TimeSpanRepr, TimeSpanType,
    },
    tempo_map::TempoMapView,
};

/// Where a length starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// A tick position
    Ticks(i64),
    /// A time in any representation, measured from zero
    Span(TimeSpan),
}

impl From<i64> for Anchor {
    fn from(ticks: i64) -> Self {
        Self::Ticks(ticks)
    }
}

impl From<TimeSpan> for Anchor {
    fn from(span: TimeSpan) -> Self {
        Self::Span(span)
    }
}

impl From<&TimeSpan> for Anchor {
    fn from(span: &TimeSpan) -> Self {
        Self::Span(span.clone())
    }
}

impl Anchor {
    /// The anchor as a tick position
    pub fn resolve<'a>(&self, tempo_map: impl Into<TempoMapView<'a>>) -> ConvertResult<i64> {
        match self {
            Self::Ticks(ticks) => ensure_non_negative("time", *ticks),
            Self::Span(span) => time::convert_from(span, tempo_map),
        }
    }
}

/// One representation's two-way mapping to ticks.
pub(crate) trait TicksConverter: Sized {
    /// `length` ticks starting at `anchor`. `length` is positive.
    fn from_ticks(length: i64, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<Self>;

    /// Ticks spanned from `anchor`. Not called for zero values.
    fn to_ticks(&self, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<i64>;
}

const MATH_TARGET: &str = "an unevaluated time span is not a conversion target";

/// Projects `length` ticks from `anchor` onto `ty`.
pub(crate) fn ticks_to_type(
    length: i64,
    ty: TimeSpanType,
    anchor: i64,
    view: TempoMapView<'_>,
) -> ConvertResult<TimeSpan> {
    let zero = ty
        .zero()
        .ok_or(TimeSpanError::UnsupportedOperation(MATH_TARGET))?;
    ensure_non_negative("time_span", length)?;
    if length == 0 {
        return Ok(zero);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Projecting {length} ticks at {anchor} onto {ty:?}");

    Ok(match ty {
        TimeSpanType::Midi => MidiTimeSpan::from_ticks(length, anchor, view)?.into(),
        TimeSpanType::Metric => MetricTimeSpan::from_ticks(length, anchor, view)?.into(),
        TimeSpanType::Musical => MusicalTimeSpan::from_ticks(length, anchor, view)?.into(),
        TimeSpanType::BarBeatTicks => {
            BarBeatTicksTimeSpan::from_ticks(length, anchor, view)?.into()
        }
        TimeSpanType::BarBeatFraction => {
            BarBeatFractionTimeSpan::from_ticks(length, anchor, view)?.into()
        }
        TimeSpanType::Math => return Err(TimeSpanError::UnsupportedOperation(MATH_TARGET)),
    })
}

/// Ticks spanned by `span` from `anchor`.
pub(crate) fn span_to_ticks(
    span: &TimeSpan,
    anchor: i64,
    view: TempoMapView<'_>,
    depth: usize,
) -> ConvertResult<i64> {
    if span.is_zero() {
        return Ok(0);
    }
    match span {
        TimeSpan::Midi(v) => v.to_ticks(anchor, view),
        TimeSpan::Metric(v) => v.to_ticks(anchor, view),
        TimeSpan::Musical(v) => v.to_ticks(anchor, view),
        TimeSpan::BarBeatTicks(v) => v.to_ticks(anchor, view),
        TimeSpan::BarBeatFraction(v) => v.to_ticks(anchor, view),
        TimeSpan::Math(v) => math::to_ticks(v, anchor, view, depth),
    }
}

/// Re-expresses `span`, read from `anchor`, as `ty`.
pub(crate) fn span_to_type(
    span: &TimeSpan,
    ty: TimeSpanType,
    anchor: i64,
    view: TempoMapView<'_>,
    depth: usize,
) -> ConvertResult<TimeSpan> {
    if ty == TimeSpanType::Math {
        return Err(TimeSpanError::UnsupportedOperation(MATH_TARGET));
    }
    if span.span_type() == ty {
        #[cfg(feature = "tracing")]
        tracing::trace!("{ty:?} already has the requested representation");
        return Ok(span.clone());
    }
    let ticks = span_to_ticks(span, anchor, view, depth)?;
    ticks_to_type(ticks, ty, anchor, view)
}

/// Logs conversions that overflowed.
pub(crate) fn logged<T>(result: ConvertResult<T>) -> ConvertResult<T> {
    #[cfg(feature = "tracing")]
    if let Err(TimeSpanError::Overflow) = &result {
        tracing::warn!("Time span conversion overflowed");
    }
    result
}

fn extract<T: TimeSpanRepr>(span: TimeSpan) -> ConvertResult<T> {
    T::try_from_span(span).ok_or(TimeSpanError::UnsupportedOperation(MATH_TARGET))
}
