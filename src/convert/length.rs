#![doc = r#"
Conversions of lengths: distances that start at an [`Anchor`].

The anchor matters whenever the tempo or time signature changes: the same
number of ticks is a different number of seconds, or of bars, depending on
where it starts.

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_time_signature(1920, TimeSignature::new(3, 4)).unwrap();

let from_zero: BarBeatTicksTimeSpan = length::convert_to(1440, 0, &tempo_map).unwrap();
let from_bar_two: BarBeatTicksTimeSpan = length::convert_to(1440, 1920, &tempo_map).unwrap();
assert_eq!(from_zero, BarBeatTicksTimeSpan::new(0, 3, 0));
assert_eq!(from_bar_two, BarBeatTicksTimeSpan::new(1, 0, 0));

// anchors can be given in any representation
let anchor: TimeSpan = BarBeatTicksTimeSpan::new(1, 0, 0).into();
assert_eq!(length::convert_from(&from_bar_two.into(), anchor, &tempo_map), Ok(1440));
```
"#]

use super::{Anchor, extract, logged, span_to_ticks, span_to_type, ticks_to_type};
use crate::{
    ConvertResult, ensure_non_negative,
    span::{TimeSpan, TimeSpanRepr, TimeSpanType},
    tempo_map::TempoMapView,
};

/// `length` ticks starting at `anchor`, as `T`.
pub fn convert_to<'a, T: TimeSpanRepr>(
    length: i64,
    anchor: impl Into<Anchor>,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<T> {
    extract(convert_to_type(length, T::TYPE, anchor, tempo_map)?)
}

/// `length` ticks starting at `anchor`, in the representation `ty`.
pub fn convert_to_type<'a>(
    length: i64,
    ty: TimeSpanType,
    anchor: impl Into<Anchor>,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<TimeSpan> {
    let view = tempo_map.into();
    let length = ensure_non_negative("length", length)?;
    let anchor = anchor.into().resolve(view)?;
    logged(ticks_to_type(length, ty, anchor, view))
}

/// Ticks spanned by `length` starting at `anchor`.
pub fn convert_from<'a>(
    length: &TimeSpan,
    anchor: impl Into<Anchor>,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<i64> {
    let view = tempo_map.into();
    let anchor = anchor.into().resolve(view)?;
    logged(span_to_ticks(length, anchor, view, 0))
}

/// Re-expresses `length`, starting at `anchor`, as `T`.
pub fn convert<'a, T: TimeSpanRepr>(
    length: &TimeSpan,
    anchor: impl Into<Anchor>,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<T> {
    let view = tempo_map.into();
    let anchor = anchor.into().resolve(view)?;
    extract(logged(span_to_type(length, T::TYPE, anchor, view, 0))?)
}
