use core::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    time::Duration,
};

/// Signed Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Micros(i64);

impl Micros {
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// The largest representable span.
    pub const MAX: Self = Self(i64::MAX);

    /// Creates a new instance of microseconds
    pub const fn new(microseconds: i64) -> Self {
        Self(microseconds)
    }
    /// Returns the microseconds as an i64
    pub const fn us(&self) -> i64 {
        self.0
    }
    /// ms -> us
    pub const fn from_ms(ms: i64) -> Self {
        Self(ms * 1_000)
    }
    /// s -> us
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000_000)
    }
    /// Returns seconds
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }

    /// Returns `None` on overflow.
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns `None` on overflow.
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Converts into a [`Duration`] if non-negative.
    pub const fn to_duration(&self) -> Option<Duration> {
        if self.0 < 0 {
            return None;
        }
        Some(Duration::from_micros(self.0 as u64))
    }
}

impl From<Duration> for Micros {
    /// Saturates at [`Micros::MAX`].
    fn from(value: Duration) -> Self {
        Self(i64::try_from(value.as_micros()).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} μs", self.0)
    }
}

impl Add for Micros {
    type Output = Micros;
    fn add(self, rhs: Self) -> Self::Output {
        Micros(self.0 + rhs.0)
    }
}

impl AddAssign for Micros {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Micros {
    type Output = Micros;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Micros {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Micros {
    type Output = Micros;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[test]
fn micros_from_duration() {
    use pretty_assertions::assert_eq;
    assert_eq!(Micros::from(Duration::from_millis(1500)), Micros::new(1_500_000));
    assert_eq!(Micros::from_secs(2).to_duration(), Some(Duration::from_secs(2)));
    assert_eq!(Micros::new(-1).to_duration(), None);
    assert_eq!(Micros::MAX.checked_add(Micros::new(1)), None);
}
