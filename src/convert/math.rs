use super::{bar_beat, span_to_ticks, ticks_to_type};
use crate::{
    ConvertResult, TimeSpanError, num,
    span::{MathOperation, MathTimeSpan, TimeSpan, TimeSpanMode, TimeSpanType},
    tempo_map::TempoMapView,
};

/// Deepest [`MathTimeSpan`] nesting that is evaluated.
pub const MAX_MATH_DEPTH: usize = 256;

/// The concrete representation at the far left of an expression.
fn leftmost_type(mut span: &TimeSpan) -> TimeSpanType {
    while let TimeSpan::Math(math) = span {
        span = math.left();
    }
    span.span_type()
}

/// Resolves an expression to ticks.
///
/// Times are measured from zero. Lengths are measured from `anchor`, or for
/// the right operand from where the left one ends.
pub(super) fn to_ticks(
    span: &MathTimeSpan,
    anchor: i64,
    view: TempoMapView<'_>,
    depth: usize,
) -> ConvertResult<i64> {
    let depth = depth + 1;
    if depth > MAX_MATH_DEPTH {
        return Err(TimeSpanError::UnsupportedOperation(
            "time span expression is nested too deeply",
        ));
    }

    match span.mode() {
        TimeSpanMode::TimeTime => match span.operation() {
            MathOperation::Add => Err(TimeSpanError::UnsupportedOperation(
                "times can't be added to each other",
            )),
            MathOperation::Subtract => time_difference(span, view, depth),
        },
        TimeSpanMode::TimeLength => {
            let time = span_to_ticks(span.left(), 0, view, depth)?;
            shift(time, span.operation(), span.right(), view, depth)
        }
        TimeSpanMode::LengthLength => {
            let length = span_to_ticks(span.left(), anchor, view, depth)?;
            let end = num::add(anchor, length)?;
            let moved = shift(end, span.operation(), span.right(), view, depth)?;
            num::sub(moved, anchor)
        }
    }
}

/// Moves `position` by `length`, read as a length starting at `position`.
///
/// Subtraction reads the length backwards, through a view flipped at `position`.
fn shift(
    position: i64,
    operation: MathOperation,
    length: &TimeSpan,
    view: TempoMapView<'_>,
    depth: usize,
) -> ConvertResult<i64> {
    match operation {
        MathOperation::Add => {
            let ticks = span_to_ticks(length, position, view, depth)?;
            num::add(position, ticks)
        }
        MathOperation::Subtract => {
            let ticks = span_to_ticks(length, position, view.flip(position), depth)?;
            num::sub(position, ticks)
        }
    }
}

/// `left - right` for two times, computed in the representation of `left`.
fn time_difference(
    span: &MathTimeSpan,
    view: TempoMapView<'_>,
    depth: usize,
) -> ConvertResult<i64> {
    let ty = leftmost_type(span.left());
    // both operands are re-projected so bar and beat components come out carried
    let left_ticks = span_to_ticks(span.left(), 0, view, depth)?;
    let left = ticks_to_type(left_ticks, ty, 0, view)?;
    let right_ticks = span_to_ticks(span.right(), 0, view, depth)?;
    let right = ticks_to_type(right_ticks, ty, 0, view)?;
    let difference = same_type_difference(left, right, view)?;
    span_to_ticks(&difference, 0, view, depth)
}

fn same_type_difference(
    left: TimeSpan,
    right: TimeSpan,
    view: TempoMapView<'_>,
) -> ConvertResult<TimeSpan> {
    Ok(match (left, right) {
        (TimeSpan::Midi(a), TimeSpan::Midi(b)) => a.checked_sub(b)?.into(),
        (TimeSpan::Metric(a), TimeSpan::Metric(b)) => a.checked_sub(b)?.into(),
        (TimeSpan::Musical(a), TimeSpan::Musical(b)) => a.checked_sub(b)?.into(),
        (TimeSpan::BarBeatTicks(a), TimeSpan::BarBeatTicks(b)) => {
            let signature = view.time_signature_at(0);
            let tpqn = view.ticks_per_quarter_note()?;
            let (_, beat_length) = bar_beat::lengths(signature, tpqn)?;
            a.checked_sub_in(b, signature.numerator() as i64, beat_length)?
                .into()
        }
        (TimeSpan::BarBeatFraction(a), TimeSpan::BarBeatFraction(b)) => {
            let signature = view.time_signature_at(0);
            a.checked_sub_in(b, signature.numerator() as i64)?.into()
        }
        _ => {
            return Err(TimeSpanError::UnsupportedOperation(
                "time spans of different representations can't be subtracted",
            ));
        }
    })
}
