#![doc = r#"
Time span values in every supported representation.

Values here are plain data. They carry no tempo map, so on their own they
can't say how many ticks they span; see [`crate::convert`] for that.
"#]

mod bar_beat_fraction;
pub use bar_beat_fraction::*;

mod bar_beat_ticks;
pub use bar_beat_ticks::*;

mod math;
pub use math::*;

mod metric;
pub use metric::*;

mod midi;
pub use midi::*;

mod musical;
pub use musical::*;

use core::{cmp::Ordering, fmt, str::FromStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ConvertResult, TimeSpanError,
    convert::{self, Anchor, TimeSpanRoundingPolicy},
    tempo_map::TempoMapView,
};

/// Discriminant of a [`TimeSpan`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive,
)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TimeSpanType {
    /// [`MidiTimeSpan`]
    Midi = 0,
    /// [`MetricTimeSpan`]
    Metric = 1,
    /// [`MusicalTimeSpan`]
    Musical = 2,
    /// [`BarBeatTicksTimeSpan`]
    BarBeatTicks = 3,
    /// [`BarBeatFractionTimeSpan`]
    BarBeatFraction = 4,
    /// [`MathTimeSpan`]
    Math = 5,
}

impl TimeSpanType {
    /// The canonical zero of this representation.
    ///
    /// `None` for [`TimeSpanType::Math`], which has no zero of its own.
    pub const fn zero(&self) -> Option<TimeSpan> {
        Some(match self {
            Self::Midi => TimeSpan::Midi(MidiTimeSpan::ZERO),
            Self::Metric => TimeSpan::Metric(MetricTimeSpan::ZERO),
            Self::Musical => TimeSpan::Musical(MusicalTimeSpan::ZERO),
            Self::BarBeatTicks => TimeSpan::BarBeatTicks(BarBeatTicksTimeSpan::ZERO),
            Self::BarBeatFraction => TimeSpan::BarBeatFraction(BarBeatFractionTimeSpan::ZERO),
            Self::Math => return None,
        })
    }

    /// The largest value of this representation.
    pub const fn max(&self) -> Option<TimeSpan> {
        Some(match self {
            Self::Midi => TimeSpan::Midi(MidiTimeSpan::MAX),
            Self::Metric => TimeSpan::Metric(MetricTimeSpan::MAX),
            Self::Musical => TimeSpan::Musical(MusicalTimeSpan::MAX),
            Self::BarBeatTicks => TimeSpan::BarBeatTicks(BarBeatTicksTimeSpan::MAX),
            Self::BarBeatFraction => TimeSpan::BarBeatFraction(BarBeatFractionTimeSpan::MAX),
            Self::Math => return None,
        })
    }
}

/// How the operands of a [`MathTimeSpan`] are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSpanMode {
    /// Both operands are times. Only subtraction is defined.
    TimeTime,
    /// A time, then a length starting at that time
    TimeLength,
    /// Two lengths, the second starting where the first ends
    LengthLength,
}

#[doc = r#"
A time or length in any representation.

# Example
```rust
# use midix_timespan::prelude::*;
let span: TimeSpan = MusicalTimeSpan::QUARTER.into();
assert_eq!(span.span_type(), TimeSpanType::Musical);
assert_eq!(span.to_string(), "1/4");

let tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(96));
assert_eq!(span.to_ticks_as_time(&tempo_map), Ok(96));
```
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSpan {
    /// Raw ticks
    Midi(MidiTimeSpan),
    /// Microseconds
    Metric(MetricTimeSpan),
    /// Fraction of a whole note
    Musical(MusicalTimeSpan),
    /// Bars, beats and ticks
    BarBeatTicks(BarBeatTicksTimeSpan),
    /// Bars and fractional beats
    BarBeatFraction(BarBeatFractionTimeSpan),
    /// Unevaluated sum or difference
    Math(MathTimeSpan),
}

impl TimeSpan {
    /// The representation of this value
    pub const fn span_type(&self) -> TimeSpanType {
        match self {
            Self::Midi(_) => TimeSpanType::Midi,
            Self::Metric(_) => TimeSpanType::Metric,
            Self::Musical(_) => TimeSpanType::Musical,
            Self::BarBeatTicks(_) => TimeSpanType::BarBeatTicks,
            Self::BarBeatFraction(_) => TimeSpanType::BarBeatFraction,
            Self::Math(_) => TimeSpanType::Math,
        }
    }

    /// Returns true if this is the zero of its representation.
    ///
    /// An unevaluated [`MathTimeSpan`] is never zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Midi(v) => v.is_zero(),
            Self::Metric(v) => v.is_zero(),
            Self::Musical(v) => v.is_zero(),
            Self::BarBeatTicks(v) => v.is_zero(),
            Self::BarBeatFraction(v) => v.is_zero(),
            Self::Math(_) => false,
        }
    }

    /// Records `self + other`. Fails for [`TimeSpanMode::TimeTime`].
    pub fn add(self, other: TimeSpan, mode: TimeSpanMode) -> ConvertResult<TimeSpan> {
        if mode == TimeSpanMode::TimeTime {
            return Err(TimeSpanError::UnsupportedOperation(
                "times can't be added to each other",
            ));
        }
        Ok(MathTimeSpan::new(MathOperation::Add, mode, self, other).into())
    }

    /// Records `self - other`.
    pub fn subtract(self, other: TimeSpan, mode: TimeSpanMode) -> TimeSpan {
        MathTimeSpan::new(MathOperation::Subtract, mode, self, other).into()
    }

    /// Stretches the span by a non-negative `multiplier`
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<TimeSpan> {
        Ok(match self {
            Self::Midi(v) => v.multiply(multiplier)?.into(),
            Self::Metric(v) => v.multiply(multiplier)?.into(),
            Self::Musical(v) => v.multiply(multiplier)?.into(),
            Self::BarBeatTicks(v) => v.multiply(multiplier)?.into(),
            Self::BarBeatFraction(v) => v.multiply(multiplier)?.into(),
            Self::Math(v) => v.multiply(multiplier)?.into(),
        })
    }

    /// Shrinks the span by a positive `divisor`
    pub fn divide(&self, divisor: f64) -> ConvertResult<TimeSpan> {
        Ok(match self {
            Self::Midi(v) => v.divide(divisor)?.into(),
            Self::Metric(v) => v.divide(divisor)?.into(),
            Self::Musical(v) => v.divide(divisor)?.into(),
            Self::BarBeatTicks(v) => v.divide(divisor)?.into(),
            Self::BarBeatFraction(v) => v.divide(divisor)?.into(),
            Self::Math(v) => v.divide(divisor)?.into(),
        })
    }

    /// Ticks from zero to this time. See [`convert::time::convert_from`].
    pub fn to_ticks_as_time<'a>(&self, tempo_map: impl Into<TempoMapView<'a>>) -> ConvertResult<i64> {
        convert::time::convert_from(self, tempo_map)
    }

    /// Ticks this length spans from `anchor`. See [`convert::length::convert_from`].
    pub fn to_ticks_as_length<'a>(
        &self,
        anchor: impl Into<Anchor>,
        tempo_map: impl Into<TempoMapView<'a>>,
    ) -> ConvertResult<i64> {
        convert::length::convert_from(self, anchor, tempo_map)
    }

    /// Snaps the end of this length to a grid of `step`s. See [`convert::round()`].
    pub fn round<'a>(
        &self,
        policy: TimeSpanRoundingPolicy,
        anchor: impl Into<Anchor>,
        step: &TimeSpan,
        tempo_map: impl Into<TempoMapView<'a>>,
    ) -> ConvertResult<TimeSpan> {
        convert::round(self, policy, anchor, step, tempo_map)
    }
}

impl PartialOrd for TimeSpan {
    /// Spans of different representations, and unevaluated sums, are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Midi(a), Self::Midi(b)) => a.partial_cmp(b),
            (Self::Metric(a), Self::Metric(b)) => a.partial_cmp(b),
            (Self::Musical(a), Self::Musical(b)) => a.partial_cmp(b),
            (Self::BarBeatTicks(a), Self::BarBeatTicks(b)) => a.partial_cmp(b),
            (Self::BarBeatFraction(a), Self::BarBeatFraction(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Midi(v) => v.fmt(f),
            Self::Metric(v) => v.fmt(f),
            Self::Musical(v) => v.fmt(f),
            Self::BarBeatTicks(v) => v.fmt(f),
            Self::BarBeatFraction(v) => v.fmt(f),
            Self::Math(v) => v.fmt(f),
        }
    }
}

impl FromStr for TimeSpan {
    type Err = TimeSpanError;

    /// Reads any representation from its display format.
    ///
    /// The separators pick the representation: `:` is metric, `/` musical,
    /// `_` bars and fractional beats, `.` bars, beats and ticks, and a bare
    /// number is ticks. A parenthesized expression is a [`MathTimeSpan`].
    fn from_str(s: &str) -> ConvertResult<Self> {
        parse_span(s, 0)
    }
}

pub(crate) fn parse_span(s: &str, depth: usize) -> ConvertResult<TimeSpan> {
    let s = s.trim();
    Ok(if s.starts_with('(') {
        math::parse_expression(s, depth)?.into()
    } else if s.contains(':') {
        s.parse::<MetricTimeSpan>()?.into()
    } else if s.contains('/') {
        s.parse::<MusicalTimeSpan>()?.into()
    } else if s.contains('_') {
        s.parse::<BarBeatFractionTimeSpan>()?.into()
    } else if s.contains('.') {
        s.parse::<BarBeatTicksTimeSpan>()?.into()
    } else {
        s.parse::<MidiTimeSpan>()?.into()
    })
}

/// Parses one unsigned component of a time span's text form.
pub(crate) fn parse_component<T: FromStr>(part: &str, format: &'static str) -> ConvertResult<T> {
    let part = part.trim();
    if part.is_empty() || part.starts_with(['+', '-']) {
        return Err(TimeSpanError::InvalidFormat(format));
    }
    part.parse().map_err(|_| TimeSpanError::InvalidFormat(format))
}

#[doc = r#"
A representation that conversions can produce.

Implemented by every concrete time span type. [`MathTimeSpan`] implements it
so that it can be named as a target, but converting *to* it always fails.
"#]
pub trait TimeSpanRepr: Sized {
    /// The representation produced
    const TYPE: TimeSpanType;

    /// Extracts `Self` from a span of the matching representation.
    fn try_from_span(span: TimeSpan) -> Option<Self>;
}

macro_rules! span_repr {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TimeSpan {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl TimeSpanRepr for $ty {
                const TYPE: TimeSpanType = TimeSpanType::$variant;

                fn try_from_span(span: TimeSpan) -> Option<Self> {
                    match span {
                        TimeSpan::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

span_repr! {
    Midi => MidiTimeSpan,
    Metric => MetricTimeSpan,
    Musical => MusicalTimeSpan,
    BarBeatTicks => BarBeatTicksTimeSpan,
    BarBeatFraction => BarBeatFractionTimeSpan,
    Math => MathTimeSpan,
}

pub(crate) fn ensure_multiplier(multiplier: f64) -> ConvertResult<()> {
    if !(multiplier >= 0.) || multiplier.is_infinite() {
        return Err(TimeSpanError::invalid(
            "multiplier",
            "value is negative or not finite",
        ));
    }
    Ok(())
}

pub(crate) fn ensure_divisor(divisor: f64) -> ConvertResult<()> {
    if !(divisor > 0.) || divisor.is_infinite() {
        return Err(TimeSpanError::invalid(
            "divisor",
            "value is zero, negative or not finite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    #[test]
    fn zeros_are_zero() {
        for raw in 0..5u8 {
            let ty = TimeSpanType::try_from(raw).unwrap();
            let zero = ty.zero().unwrap();
            assert_eq!(zero.span_type(), ty);
            assert!(zero.is_zero());
        }
        assert_eq!(TimeSpanType::Math.zero(), None);
        assert!(TimeSpanType::try_from(6).is_err());
        assert_eq!(u8::from(TimeSpanType::BarBeatTicks), 3);
    }

    #[test]
    fn time_plus_time_is_rejected() {
        let a: TimeSpan = MidiTimeSpan::new(10).into();
        let b: TimeSpan = MidiTimeSpan::new(20).into();
        assert!(matches!(
            a.clone().add(b.clone(), TimeSpanMode::TimeTime),
            Err(TimeSpanError::UnsupportedOperation(_))
        ));
        let diff = a.subtract(b, TimeSpanMode::TimeTime);
        assert_eq!(diff.span_type(), TimeSpanType::Math);
        assert_eq!(diff.to_string(), "(10T - 20T)");
    }

    #[test]
    fn math_display_and_scaling() {
        let quarter: TimeSpan = MusicalTimeSpan::QUARTER.into();
        let bar: TimeSpan = BarBeatTicksTimeSpan::new(1, 0, 0).into();
        let sum = quarter.add(bar, TimeSpanMode::TimeLength).unwrap();
        assert_eq!(sum.to_string(), "(1/4T + 1.0.0L)");
        assert_eq!(sum.multiply(2.).unwrap().to_string(), "(1/2T + 2.0.0L)");
        assert!(!sum.is_zero());
    }

    #[test]
    fn components_are_unsigned_numbers() {
        assert_eq!(parse_component::<i64>(" 12 ", "n"), Ok(12));
        assert_eq!(
            parse_component::<i64>("-1", "n"),
            Err(TimeSpanError::InvalidFormat("n"))
        );
        assert!(parse_component::<i64>("+1", "n").is_err());
        assert!(parse_component::<i64>("", "n").is_err());
        assert!(parse_component::<f64>("1.5x", "n").is_err());
    }

    #[test]
    fn ordering_only_within_a_type() {
        let a: TimeSpan = MidiTimeSpan::new(1).into();
        let b: TimeSpan = MidiTimeSpan::new(2).into();
        let c: TimeSpan = MetricTimeSpan::from_micros(2).into();
        assert!(a < b);
        assert_eq!(a.partial_cmp(&c), None);
    }
}
