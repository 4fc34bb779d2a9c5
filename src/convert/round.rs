use super::{Anchor, extract, span_to_ticks, span_to_type, ticks_to_type};
use crate::{
    ConvertResult, TimeSpanError, ensure_non_negative, num,
    span::{BarBeatFractionTimeSpan, MetricTimeSpan, TimeSpan, TimeSpanType},
    tempo_map::TempoMapView,
};

/// Which way [`round()`] moves a value that is not on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeSpanRoundingPolicy {
    /// Leave the value as it is
    #[default]
    NoRounding,
    /// Move to the next grid point
    RoundUp,
    /// Move to the previous grid point
    RoundDown,
}

#[doc = r#"
Snaps the end of a length to a grid of `step`s laid out from `anchor`.

A value already on the grid is returned unchanged, in its own
representation. Otherwise the result takes the representation of `step`.
A metric step lays the grid out in microseconds. A bar and beat step lays it
out in whole multiples of the step, so the grid follows time signature
changes. Any other step is measured in ticks at `anchor`.

To round a time rather than a length, anchor it at zero.

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_time_signature(1920, TimeSignature::new(5, 8)).unwrap();

// a bar of 4/4 and a beat of 5/8, up to the next bar line
let span: TimeSpan = BarBeatTicksTimeSpan::new(1, 1, 0).into();
let bar: TimeSpan = BarBeatTicksTimeSpan::new(1, 0, 0).into();
let rounded = span.round(TimeSpanRoundingPolicy::RoundUp, 0, &bar, &tempo_map).unwrap();
assert_eq!(rounded, BarBeatTicksTimeSpan::new(2, 0, 0).into());
assert_eq!(rounded.to_ticks_as_time(&tempo_map), Ok(1920 + 1200));
```
"#]
pub fn round<'a>(
    span: &TimeSpan,
    policy: TimeSpanRoundingPolicy,
    anchor: impl Into<Anchor>,
    step: &TimeSpan,
    tempo_map: impl Into<TempoMapView<'a>>,
) -> ConvertResult<TimeSpan> {
    if policy == TimeSpanRoundingPolicy::NoRounding || step.is_zero() {
        return Ok(span.clone());
    }
    let grid_shift = match policy {
        TimeSpanRoundingPolicy::RoundUp => 1,
        _ => 0,
    };
    let view = tempo_map.into();
    let anchor = anchor.into().resolve(view)?;

    #[cfg(feature = "tracing")]
    tracing::trace!("Rounding {span} at {anchor} by {step} ({policy:?})");

    match step {
        TimeSpan::Metric(step) => {
            let step = step.total_microseconds();
            let metric: MetricTimeSpan =
                extract(span_to_type(span, TimeSpanType::Metric, anchor, view, 0)?)?;
            let value = ensure_non_negative("time_span", metric.total_microseconds())?;
            Ok(match grid_point(value, step, grid_shift)? {
                Some(micros) => MetricTimeSpan::from_micros(micros).into(),
                None => span.clone(),
            })
        }
        TimeSpan::BarBeatTicks(_) | TimeSpan::BarBeatFraction(_) => {
            round_bar_beat(span, anchor, step, view, grid_shift)
        }
        _ => {
            let step_ticks = span_to_ticks(step, anchor, view, 0)?;
            let ticks = ensure_non_negative("time_span", span_to_ticks(span, anchor, view, 0)?)?;
            Ok(match grid_point(ticks, step_ticks, grid_shift)? {
                Some(ticks) => ticks_to_type(ticks, step.span_type(), anchor, view)?,
                None => span.clone(),
            })
        }
    }
}

/// The grid point `value` rounds to, or `None` if it is on one already.
fn grid_point(value: i64, step: i64, grid_shift: i64) -> ConvertResult<Option<i64>> {
    if step <= 0 {
        return Err(TimeSpanError::invalid(
            "step",
            "step is shorter than one unit",
        ));
    }
    if value % step == 0 {
        return Ok(None);
    }
    num::mul(value / step + grid_shift, step).map(Some)
}

fn round_bar_beat(
    span: &TimeSpan,
    anchor: i64,
    step: &TimeSpan,
    view: TempoMapView<'_>,
    grid_shift: i64,
) -> ConvertResult<TimeSpan> {
    let ty = step.span_type();
    let ticks = ensure_non_negative("time_span", span_to_ticks(span, anchor, view, 0)?)?;
    let end = num::add(anchor, ticks)?;

    // without a change along the way every step has the same length
    if ty == TimeSpanType::BarBeatTicks
        && !view
            .time_signature_changes()
            .any(|c| c.time() > anchor && c.time() < end)
    {
        let step_ticks = span_to_ticks(step, anchor, view, 0)?;
        return Ok(match grid_point(ticks, step_ticks, grid_shift)? {
            Some(ticks) => ticks_to_type(ticks, ty, anchor, view)?,
            None => span.clone(),
        });
    }

    let steps = |factor: i64| -> ConvertResult<i64> {
        span_to_ticks(&step.multiply(factor as f64)?, anchor, view, 0)
    };
    if steps(1)? <= 0 {
        return Err(TimeSpanError::invalid(
            "step",
            "step is shorter than one unit",
        ));
    }

    // double until the span fits, then narrow down
    let (mut low, mut high) = (0, 1);
    while steps(high)? <= ticks {
        low = high;
        high = num::mul(high, 2)?;
    }
    while low <= high {
        let middle = low + (high - low) / 2;
        let middle_ticks = steps(middle)?;
        if middle_ticks > ticks {
            high = middle - 1;
        } else if middle_ticks < ticks {
            low = middle + 1;
        } else {
            return Ok(span.clone());
        }
    }

    let result_ticks = if low > 0 {
        steps(low - 1 + grid_shift)?
    } else {
        0
    };
    let result = ticks_to_type(result_ticks, ty, anchor, view)?;

    match (result, step) {
        (TimeSpan::BarBeatFraction(result), TimeSpan::BarBeatFraction(step)) if step.beats() > 0. => {
            let digits = fraction_digits(step.beats());
            let beats = num::round_to_digits(result.beats(), digits)?;
            Ok(BarBeatFractionTimeSpan::try_new(result.bars(), beats)?.into())
        }
        (result, _) => Ok(result),
    }
}

/// Decimal places of `value` as it is displayed.
fn fraction_digits(value: f64) -> usize {
    let mut digits = 0;
    let mut scaled = value;
    while digits < 15 && num::abs(scaled - num::trunc(scaled)) > 1e-9 {
        scaled *= 10.;
        digits += 1;
    }
    digits
}
