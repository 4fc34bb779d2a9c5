use alloc::boxed::Box;
use core::{fmt, str::FromStr};

use super::{TimeSpan, TimeSpanMode, parse_span};
use crate::{ConvertResult, TimeSpanError, convert::MAX_MATH_DEPTH};

const MATH_FORMAT: &str = "`(<time span><T|L> <+|-> <time span><T|L>)`";

/// The operation of a [`MathTimeSpan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathOperation {
    /// `left + right`
    Add,
    /// `left - right`
    Subtract,
}

#[doc = r#"
A sum or difference of two time spans that has not been evaluated yet.

Adding a length to a time means nothing until it is known where that time
lies in a tempo map, so [`TimeSpan::add`] and [`TimeSpan::subtract`] only record
the operands. Converting the expression resolves it.

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_tempo(960, Tempo::from_bpm(60.).unwrap()).unwrap();

// one second at 120 bpm, then one second at 60 bpm
let second: TimeSpan = MetricTimeSpan::from_hmsms(0, 0, 1, 0).into();
let two = second.clone().add(second.clone(), TimeSpanMode::LengthLength).unwrap();
assert_eq!(two.to_string(), "(0:0:1:0L + 0:0:1:0L)");
assert_eq!(length::convert_from(&two, 0, &tempo_map), Ok(960 + 480));
```
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MathTimeSpan {
    operation: MathOperation,
    mode: TimeSpanMode,
    left: Box<TimeSpan>,
    right: Box<TimeSpan>,
}

impl MathTimeSpan {
    pub(crate) fn new(
        operation: MathOperation,
        mode: TimeSpanMode,
        left: TimeSpan,
        right: TimeSpan,
    ) -> Self {
        Self {
            operation,
            mode,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Add or subtract
    pub const fn operation(&self) -> MathOperation {
        self.operation
    }

    /// How the operands are read
    pub const fn mode(&self) -> TimeSpanMode {
        self.mode
    }

    /// The first operand
    pub fn left(&self) -> &TimeSpan {
        &self.left
    }

    /// The second operand
    pub fn right(&self) -> &TimeSpan {
        &self.right
    }

    /// Scales both operands
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        Ok(Self::new(
            self.operation,
            self.mode,
            self.left.multiply(multiplier)?,
            self.right.multiply(multiplier)?,
        ))
    }

    /// Divides both operands
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        Ok(Self::new(
            self.operation,
            self.mode,
            self.left.divide(divisor)?,
            self.right.divide(divisor)?,
        ))
    }
}

impl fmt::Display for MathTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation = match self.operation {
            MathOperation::Add => '+',
            MathOperation::Subtract => '-',
        };
        let (left_mode, right_mode) = match self.mode {
            TimeSpanMode::TimeTime => ('T', 'T'),
            TimeSpanMode::TimeLength => ('T', 'L'),
            TimeSpanMode::LengthLength => ('L', 'L'),
        };
        write!(
            f,
            "({}{left_mode} {operation} {}{right_mode})",
            self.left, self.right
        )
    }
}

impl FromStr for MathTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        parse_expression(s.trim(), 0)
    }
}

/// Splits a displayed operand into the span and whether it is a time.
fn operand(s: &str) -> ConvertResult<(&str, bool)> {
    if let Some(span) = s.strip_suffix('T') {
        Ok((span, true))
    } else if let Some(span) = s.strip_suffix('L') {
        Ok((span, false))
    } else {
        Err(TimeSpanError::InvalidFormat(MATH_FORMAT))
    }
}

pub(super) fn parse_expression(s: &str, depth: usize) -> ConvertResult<MathTimeSpan> {
    let depth = depth + 1;
    if depth > MAX_MATH_DEPTH {
        return Err(TimeSpanError::UnsupportedOperation(
            "time span expression is nested too deeply",
        ));
    }
    let inner = s
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(TimeSpanError::InvalidFormat(MATH_FORMAT))?;

    // operands have no spaces of their own outside parentheses
    let mut open = 0usize;
    let split = inner
        .char_indices()
        .find(|&(_, c)| {
            match c {
                '(' => open += 1,
                ')' => open = open.saturating_sub(1),
                _ => {}
            }
            c == ' ' && open == 0
        })
        .map(|(at, _)| at)
        .ok_or(TimeSpanError::InvalidFormat(MATH_FORMAT))?;

    let (left, rest) = inner.split_at(split);
    let (operation, right) = if let Some(right) = rest.strip_prefix(" + ") {
        (MathOperation::Add, right)
    } else if let Some(right) = rest.strip_prefix(" - ") {
        (MathOperation::Subtract, right)
    } else {
        return Err(TimeSpanError::InvalidFormat(MATH_FORMAT));
    };

    let (left, left_is_time) = operand(left)?;
    let (right, right_is_time) = operand(right)?;
    let mode = match (left_is_time, right_is_time) {
        (true, true) => TimeSpanMode::TimeTime,
        (true, false) => TimeSpanMode::TimeLength,
        (false, false) => TimeSpanMode::LengthLength,
        (false, true) => return Err(TimeSpanError::InvalidFormat(MATH_FORMAT)),
    };
    if mode == TimeSpanMode::TimeTime && operation == MathOperation::Add {
        return Err(TimeSpanError::UnsupportedOperation(
            "times can't be added to each other",
        ));
    }

    Ok(MathTimeSpan::new(
        operation,
        mode,
        parse_span(left, depth)?,
        parse_span(right, depth)?,
    ))
}
