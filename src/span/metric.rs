use core::{fmt, str::FromStr, time::Duration};

use crate::{ConvertResult, Micros, TimeSpanError, num};

const MICROS_PER_MILLISECOND: i64 = 1_000;
const MICROS_PER_SECOND: i64 = 1_000 * MICROS_PER_MILLISECOND;
const MICROS_PER_MINUTE: i64 = 60 * MICROS_PER_SECOND;
const MICROS_PER_HOUR: i64 = 60 * MICROS_PER_MINUTE;

#[doc = r#"
A wall-clock time span, in microseconds.

Displayed as `hours:minutes:seconds:milliseconds`.

# Example
```rust
# use midix_timespan::prelude::*;
let span = MetricTimeSpan::from_hmsms(1, 2, 3, 4);
assert_eq!(span.hours(), 1);
assert_eq!(span.minutes(), 2);
assert_eq!(span.seconds(), 3);
assert_eq!(span.milliseconds(), 4);
assert_eq!(span.to_string(), "1:2:3:4");
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricTimeSpan(Micros);

impl MetricTimeSpan {
    /// Zero microseconds
    pub const ZERO: Self = Self(Micros::ZERO);
    /// The longest representable span
    pub const MAX: Self = Self(Micros::MAX);

    /// Create a new span
    pub const fn new(micros: Micros) -> Self {
        Self(micros)
    }

    /// Create a new span of `micros` microseconds
    pub const fn from_micros(micros: i64) -> Self {
        Self(Micros::new(micros))
    }

    /// Create a span from its clock components
    pub const fn from_hmsms(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Self::from_micros(
            hours * MICROS_PER_HOUR
                + minutes * MICROS_PER_MINUTE
                + seconds * MICROS_PER_SECOND
                + milliseconds * MICROS_PER_MILLISECOND,
        )
    }

    /// The span as [`Micros`]
    pub const fn micros(&self) -> Micros {
        self.0
    }

    /// Total microseconds
    pub const fn total_microseconds(&self) -> i64 {
        self.0.us()
    }

    /// Total seconds, fractional
    pub const fn total_seconds(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Whole hours
    pub const fn hours(&self) -> i64 {
        self.0.us() / MICROS_PER_HOUR
    }

    /// Minutes past the hour
    pub const fn minutes(&self) -> i64 {
        self.0.us() % MICROS_PER_HOUR / MICROS_PER_MINUTE
    }

    /// Seconds past the minute
    pub const fn seconds(&self) -> i64 {
        self.0.us() % MICROS_PER_MINUTE / MICROS_PER_SECOND
    }

    /// Milliseconds past the second
    pub const fn milliseconds(&self) -> i64 {
        self.0.us() % MICROS_PER_SECOND / MICROS_PER_MILLISECOND
    }

    /// Returns true if the span is zero microseconds long
    pub const fn is_zero(&self) -> bool {
        self.0.us() == 0
    }

    /// Converts into a [`Duration`] if non-negative
    pub const fn to_duration(&self) -> Option<Duration> {
        self.0.to_duration()
    }

    /// Sum of two spans, failing on overflow
    pub fn checked_add(self, rhs: Self) -> ConvertResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(TimeSpanError::Overflow)
    }

    /// Difference of two spans, failing on overflow
    pub fn checked_sub(self, rhs: Self) -> ConvertResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(TimeSpanError::Overflow)
    }

    /// Stretches the span by `multiplier`, rounding to the nearest microsecond
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        super::ensure_multiplier(multiplier)?;
        let micros = num::round_to_i64(self.total_microseconds() as f64 * multiplier)?;
        Ok(Self::from_micros(micros))
    }

    /// Shrinks the span by `divisor`, rounding to the nearest microsecond
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        super::ensure_divisor(divisor)?;
        let micros = num::round_to_i64(self.total_microseconds() as f64 / divisor)?;
        Ok(Self::from_micros(micros))
    }
}

impl From<Micros> for MetricTimeSpan {
    fn from(micros: Micros) -> Self {
        Self(micros)
    }
}

impl From<Duration> for MetricTimeSpan {
    fn from(duration: Duration) -> Self {
        Self(Micros::from(duration))
    }
}

impl fmt::Display for MetricTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.milliseconds()
        )
    }
}

const METRIC_FORMAT: &str = "`hours:minutes:seconds:milliseconds`, like `0:1:30:500`";

impl FromStr for MetricTimeSpan {
    type Err = TimeSpanError;

    /// Reads `h:m:s:ms`. `h:m:s` and `m:s` are accepted too.
    fn from_str(s: &str) -> ConvertResult<Self> {
        let mut parts = [0i64; 4];
        let mut count = 0;
        for part in s.split(':') {
            let slot = parts
                .get_mut(count)
                .ok_or(TimeSpanError::InvalidFormat(METRIC_FORMAT))?;
            *slot = super::parse_component(part, METRIC_FORMAT)?;
            count += 1;
        }
        let [hours, minutes, seconds, milliseconds] = match (count, parts) {
            (2, [m, sec, ..]) => [0, m, sec, 0],
            (3, [h, m, sec, _]) => [h, m, sec, 0],
            (4, parts) => parts,
            _ => return Err(TimeSpanError::InvalidFormat(METRIC_FORMAT)),
        };

        let micros = [
            (hours, MICROS_PER_HOUR),
            (minutes, MICROS_PER_MINUTE),
            (seconds, MICROS_PER_SECOND),
            (milliseconds, MICROS_PER_MILLISECOND),
        ]
        .into_iter()
        .try_fold(0, |total, (value, unit)| num::add(total, num::mul(value, unit)?))?;
        Ok(Self::from_micros(micros))
    }
}

#[test]
fn metric_components() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let span = MetricTimeSpan::from(Duration::from_millis(90_500));
    assert_eq!(span.total_microseconds(), 90_500_000);
    assert_eq!(span.to_string(), "0:1:30:500");
    assert_eq!(span.total_seconds(), 90.5);
    assert_eq!(span.divide(2.), Ok(MetricTimeSpan::from_micros(45_250_000)));
    assert_eq!(MetricTimeSpan::ZERO.to_string(), "0:0:0:0");
}

#[test]
fn metric_parses_its_display() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    let span = MetricTimeSpan::from_hmsms(1, 2, 3, 4);
    assert_eq!(span.to_string().parse(), Ok(span));
    assert_eq!("1:30".parse(), Ok(MetricTimeSpan::from_hmsms(0, 1, 30, 0)));
    assert_eq!("2:0:5".parse(), Ok(MetricTimeSpan::from_hmsms(2, 0, 5, 0)));
    assert!("1:2:3:4:5".parse::<MetricTimeSpan>().is_err());
    assert!("90".parse::<MetricTimeSpan>().is_err());
    assert!("0:-1:0:0".parse::<MetricTimeSpan>().is_err());
    assert_eq!(
        "9999999999999:0:0:0".parse::<MetricTimeSpan>(),
        Err(TimeSpanError::Overflow)
    );
}
