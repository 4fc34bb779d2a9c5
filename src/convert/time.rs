#![doc = r#"
Conversions of times: positions measured from tick zero.

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_tempo(0, Tempo::from_bpm(60.).unwrap()).unwrap();

let metric: MetricTimeSpan = time::convert_to(720, &tempo_map).unwrap();
assert_eq!(metric, MetricTimeSpan::from_hmsms(0, 0, 1, 500));

assert_eq!(time::convert_from(&metric.into(), &tempo_map), Ok(720));
```
"#]

use super::{extract, logged, span_to_ticks, span_to_type, ticks_to_type};
use crate::{
    ConvertResult, ensure_non_negative,
    span::{TimeSpan, TimeSpanRepr, TimeSpanType},
    tempo_map::TempoMapView,
};

/// The tick position `time` as `T`.
pub fn convert_to<'a, T: TimeSpanRepr>(
    time: i64,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<T> {
    extract(convert_to_type(time, T::TYPE, tempo_map)?)
}

/// The tick position `time` in the representation `ty`.
pub fn convert_to_type<'a>(
    time: i64,
    ty: TimeSpanType,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<TimeSpan> {
    let time = ensure_non_negative("time", time)?;
    logged(ticks_to_type(time, ty, 0, tempo_map.into()))
}

/// The tick position of `time`.
///
/// The result may be negative if `time` is a difference of two times.
pub fn convert_from<'a>(
    time: &TimeSpan,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<i64> {
    logged(span_to_ticks(time, 0, tempo_map.into(), 0))
}

/// Re-expresses `time` as `T`.
pub fn convert<'a, T: TimeSpanRepr>(
    time: &TimeSpan,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<T> {
    extract(logged(span_to_type(time, T::TYPE, 0, tempo_map.into(), 0))?)
}
