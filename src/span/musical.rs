use core::{cmp::Ordering, fmt, str::FromStr};

use num_rational::Ratio;

use crate::{ConvertResult, TimeSpanError, num};

/// Precision kept from a fractional multiplier or divisor
const FRACTION_PART_MULTIPLIER: i64 = 1_000;

#[doc = r#"
A time span as a fraction of a whole note.

The fraction is always kept in lowest terms with a positive denominator, so
`2/8` and `1/4` are the same span and compare equal.

# Example
```rust
# use midix_timespan::prelude::*;
let span = MusicalTimeSpan::new(2, 8);
assert_eq!(span, MusicalTimeSpan::QUARTER);

assert_eq!(MusicalTimeSpan::QUARTER.single_dotted(), Ok(MusicalTimeSpan::new(3, 8)));
assert_eq!(MusicalTimeSpan::EIGHTH.triplet(), Ok(MusicalTimeSpan::new(1, 12)));
assert_eq!(span.to_string(), "1/4");
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MusicalTimeSpan {
    numerator: i64,
    denominator: i64,
}

impl Default for MusicalTimeSpan {
    fn default() -> Self {
        Self::ZERO
    }
}

impl MusicalTimeSpan {
    /// Zero
    pub const ZERO: Self = Self::whole_over(0, 1);
    /// The longest representable span
    pub const MAX: Self = Self::whole_over(i64::MAX, 1);

    /// A whole note
    pub const WHOLE: Self = Self::whole_over(1, 1);
    /// A half note
    pub const HALF: Self = Self::whole_over(1, 2);
    /// A quarter note
    pub const QUARTER: Self = Self::whole_over(1, 4);
    /// An eighth note
    pub const EIGHTH: Self = Self::whole_over(1, 8);
    /// A sixteenth note
    pub const SIXTEENTH: Self = Self::whole_over(1, 16);
    /// A thirty-second note
    pub const THIRTY_SECOND: Self = Self::whole_over(1, 32);
    /// A sixty-fourth note
    pub const SIXTY_FOURTH: Self = Self::whole_over(1, 64);

    const fn whole_over(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Create a new span, reduced to lowest terms.
    ///
    /// # Panics
    /// if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        match Self::try_new(numerator, denominator) {
            Ok(span) => span,
            Err(_) => panic!("Musical time span denominator can't be zero."),
        }
    }

    /// Create a new span, reduced to lowest terms, failing if `denominator` is zero.
    pub fn try_new(numerator: i64, denominator: i64) -> ConvertResult<Self> {
        if denominator == 0 {
            return Err(TimeSpanError::invalid("denominator", "denominator is zero"));
        }
        Self::reduce(numerator as i128, denominator as i128)
    }

    /// Reduces a wide fraction, failing if the result does not fit.
    pub(crate) fn reduce(numerator: i128, denominator: i128) -> ConvertResult<Self> {
        let ratio = Ratio::new(numerator, denominator);
        let numerator = i64::try_from(*ratio.numer()).map_err(|_| TimeSpanError::Overflow)?;
        let denominator = i64::try_from(*ratio.denom()).map_err(|_| TimeSpanError::Overflow)?;
        Ok(Self::whole_over(numerator, denominator))
    }

    /// The numerator; carries the sign
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// The denominator; always positive
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns true if the span is zero
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Lengthens the span by `dots` augmentation dots.
    ///
    /// One dot adds half of the span, two dots add three quarters, and so on.
    pub fn dotted(&self, dots: u32) -> ConvertResult<Self> {
        let scale = 1i128.checked_shl(dots).ok_or(TimeSpanError::Overflow)?;
        let factor = scale
            .checked_mul(2)
            .and_then(|v| v.checked_sub(1))
            .ok_or(TimeSpanError::Overflow)?;
        let numerator = (self.numerator as i128)
            .checked_mul(factor)
            .ok_or(TimeSpanError::Overflow)?;
        let denominator = (self.denominator as i128)
            .checked_mul(scale)
            .ok_or(TimeSpanError::Overflow)?;
        Self::reduce(numerator, denominator)
    }

    /// The span with one dot
    pub fn single_dotted(&self) -> ConvertResult<Self> {
        self.dotted(1)
    }

    /// The span with two dots
    pub fn double_dotted(&self) -> ConvertResult<Self> {
        self.dotted(2)
    }

    /// One note of a tuplet that fits `notes` notes into the space of `space`.
    pub fn tuplet(&self, notes: u32, space: u32) -> ConvertResult<Self> {
        if notes == 0 {
            return Err(TimeSpanError::invalid("notes", "tuplet has no notes"));
        }
        if space == 0 {
            return Err(TimeSpanError::invalid("space", "tuplet has no space"));
        }
        Self::reduce(
            self.numerator as i128 * space as i128,
            self.denominator as i128 * notes as i128,
        )
    }

    /// Three notes in the space of two
    pub fn triplet(&self) -> ConvertResult<Self> {
        self.tuplet(3, 2)
    }

    /// Two notes in the space of three
    pub fn duplet(&self) -> ConvertResult<Self> {
        self.tuplet(2, 3)
    }

    /// Sum of two spans, failing on overflow
    pub fn checked_add(self, rhs: Self) -> ConvertResult<Self> {
        let (a, b, c, d) = self.wide(rhs);
        Self::reduce(a * d + c * b, b * d)
    }

    /// Difference of two spans, failing on overflow
    pub fn checked_sub(self, rhs: Self) -> ConvertResult<Self> {
        let (a, b, c, d) = self.wide(rhs);
        Self::reduce(a * d - c * b, b * d)
    }

    fn wide(self, rhs: Self) -> (i128, i128, i128, i128) {
        (
            self.numerator as i128,
            self.denominator as i128,
            rhs.numerator as i128,
            rhs.denominator as i128,
        )
    }

    /// Stretches the span by `multiplier`, kept to three decimal places
    pub fn multiply(&self, multiplier: f64) -> ConvertResult<Self> {
        super::ensure_multiplier(multiplier)?;
        let factor = num::round_to_i64(multiplier * FRACTION_PART_MULTIPLIER as f64)?;
        Self::reduce(
            self.numerator as i128 * factor as i128,
            self.denominator as i128 * FRACTION_PART_MULTIPLIER as i128,
        )
    }

    /// Shrinks the span by `divisor`, kept to three decimal places
    pub fn divide(&self, divisor: f64) -> ConvertResult<Self> {
        super::ensure_divisor(divisor)?;
        let factor = num::round_to_i64(divisor * FRACTION_PART_MULTIPLIER as f64)?;
        if factor == 0 {
            return Err(TimeSpanError::invalid("divisor", "divisor rounds to zero"));
        }
        Self::reduce(
            self.numerator as i128 * FRACTION_PART_MULTIPLIER as i128,
            self.denominator as i128 * factor as i128,
        )
    }
}

impl PartialOrd for MusicalTimeSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MusicalTimeSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, c, d) = self.wide(*other);
        (a * d).cmp(&(c * b))
    }
}

impl fmt::Display for MusicalTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

const MUSICAL_FORMAT: &str = "`numerator/denominator`, like `3/8`";

impl FromStr for MusicalTimeSpan {
    type Err = TimeSpanError;

    /// Reads `n/d`, reducing it. Only the numerator may carry a sign.
    fn from_str(s: &str) -> ConvertResult<Self> {
        let (numerator, denominator) = s
            .split_once('/')
            .ok_or(TimeSpanError::InvalidFormat(MUSICAL_FORMAT))?;
        let numerator = match numerator.trim().strip_prefix('-') {
            Some(magnitude) => -super::parse_component::<i64>(magnitude, MUSICAL_FORMAT)?,
            None => super::parse_component(numerator, MUSICAL_FORMAT)?,
        };
        Self::try_new(numerator, super::parse_component(denominator, MUSICAL_FORMAT)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fractions_are_reduced() {
        let span = MusicalTimeSpan::new(6, -8);
        assert_eq!(span.numerator(), -3);
        assert_eq!(span.denominator(), 4);
        assert_eq!(MusicalTimeSpan::new(0, 7), MusicalTimeSpan::ZERO);
        assert!(MusicalTimeSpan::try_new(1, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn dots_and_tuplets() {
        let quarter = MusicalTimeSpan::QUARTER;
        assert_eq!(quarter.dotted(0), Ok(quarter));
        assert_eq!(quarter.single_dotted(), Ok(MusicalTimeSpan::new(3, 8)));
        assert_eq!(quarter.double_dotted(), Ok(MusicalTimeSpan::new(7, 16)));
        assert_eq!(quarter.dotted(3), Ok(MusicalTimeSpan::new(15, 32)));
        assert_eq!(quarter.triplet(), Ok(MusicalTimeSpan::new(1, 6)));
        assert_eq!(quarter.duplet(), Ok(MusicalTimeSpan::new(3, 8)));
        assert_eq!(MusicalTimeSpan::MAX.dotted(1), Err(TimeSpanError::Overflow));
        assert!(quarter.tuplet(0, 2).is_err());
    }

    #[test]
    fn arithmetic_and_ordering() {
        let sum = MusicalTimeSpan::QUARTER
            .checked_add(MusicalTimeSpan::EIGHTH)
            .unwrap();
        assert_eq!(sum, MusicalTimeSpan::new(3, 8));
        assert_eq!(
            sum.checked_sub(MusicalTimeSpan::HALF),
            Ok(MusicalTimeSpan::new(-1, 8))
        );
        assert!(MusicalTimeSpan::EIGHTH < MusicalTimeSpan::QUARTER);
        assert_eq!(MusicalTimeSpan::HALF.multiply(1.5), Ok(MusicalTimeSpan::new(3, 4)));
        assert_eq!(MusicalTimeSpan::HALF.divide(4.), Ok(MusicalTimeSpan::EIGHTH));
    }

    #[test]
    fn parsing_reduces() {
        assert_eq!("2/8".parse(), Ok(MusicalTimeSpan::QUARTER));
        assert_eq!("-1/8".parse(), Ok(MusicalTimeSpan::new(-1, 8)));
        assert!("1/0".parse::<MusicalTimeSpan>().unwrap_err().is_invalid_argument());
        assert_eq!(
            "1/-4".parse::<MusicalTimeSpan>(),
            Err(TimeSpanError::InvalidFormat(MUSICAL_FORMAT))
        );
        assert!("1/4/2".parse::<MusicalTimeSpan>().is_err());
        assert!("quarter".parse::<MusicalTimeSpan>().is_err());
    }
}
