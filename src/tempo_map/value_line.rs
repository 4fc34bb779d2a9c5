use alloc::vec::Vec;

/// A value that takes effect at some tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueChange<T> {
    time: i64,
    value: T,
}

impl<T: Copy> ValueChange<T> {
    /// Create a new change at `time`
    pub const fn new(time: i64, value: T) -> Self {
        Self { time, value }
    }

    /// The tick at which the value takes effect
    pub const fn time(&self) -> i64 {
        self.time
    }

    /// The new value
    pub const fn value(&self) -> T {
        self.value
    }
}

#[doc = r#"
An ascending timeline of value changes over the tick axis.

Before the first change, and on an empty line, the default value is in force.
The line never holds two changes at the same tick and never holds a change
that repeats the value already in force.

# Example
```rust
# use midix_timespan::prelude::*;
let mut line = ValueLine::new(TimeSignature::default());
line.set_value(1920, TimeSignature::new(3, 4));

assert_eq!(line.value_at(0), TimeSignature::new(4, 4));
assert_eq!(line.value_at(1919), TimeSignature::new(4, 4));
assert_eq!(line.value_at(1920), TimeSignature::new(3, 4));
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueLine<T> {
    default: T,
    changes: Vec<ValueChange<T>>,
}

impl<T: Copy + PartialEq> ValueLine<T> {
    /// Create an empty line
    pub const fn new(default: T) -> Self {
        Self {
            default,
            changes: Vec::new(),
        }
    }

    /// The value in force when no change precedes a tick
    pub const fn default_value(&self) -> T {
        self.default
    }

    /// All changes, ascending by time
    pub fn changes(&self) -> &[ValueChange<T>] {
        &self.changes
    }

    /// Returns true if no change was ever set
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The value of the latest change at or before `time`.
    pub fn value_at(&self, time: i64) -> T {
        let index = self.changes.partition_point(|c| c.time <= time);
        match index {
            0 => self.default,
            i => self.changes[i - 1].value,
        }
    }

    /// The value in force strictly before `time`
    fn value_before(&self, time: i64) -> T {
        let index = self.changes.partition_point(|c| c.time < time);
        match index {
            0 => self.default,
            i => self.changes[i - 1].value,
        }
    }

    /// Sets `value` from `time` on.
    ///
    /// A change already at `time` is replaced. Returns true if the line changed.
    pub fn set_value(&mut self, time: i64, value: T) -> bool {
        let before = self.value_before(time);
        let index = self.changes.partition_point(|c| c.time < time);

        let replaced = match self.changes.get(index) {
            Some(existing) if existing.time == time => {
                if existing.value == value {
                    return false;
                }
                self.changes.remove(index);
                true
            }
            _ => false,
        };

        let inserted = value != before;
        if inserted {
            self.changes.insert(index, ValueChange::new(time, value));
        }

        let next_index = if inserted { index + 1 } else { index };
        if let Some(next) = self.changes.get(next_index)
            && next.value == value
        {
            self.changes.remove(next_index);
        }

        replaced || inserted
    }

    /// Removes every change
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    const D: char = 'D';

    fn line(changes: &[(i64, char)]) -> ValueLine<char> {
        let mut line = ValueLine::new(D);
        for &(time, value) in changes {
            line.set_value(time, value);
        }
        line
    }

    fn flat(line: &ValueLine<char>) -> Vec<(i64, char)> {
        line.changes().iter().map(|c| (c.time(), c.value())).collect()
    }

    #[test]
    fn default_value_on_empty_line_is_noop() {
        let mut l = line(&[]);
        assert!(!l.set_value(10, D));
        assert_eq!(flat(&l), vec![]);
    }

    #[test]
    fn repeating_value_in_force_is_noop() {
        let mut l = line(&[(0, 'A'), (10, 'B')]);
        assert!(!l.set_value(20, 'B'));
        assert!(!l.set_value(5, 'A'));
        assert_eq!(flat(&l), vec![(0, 'A'), (10, 'B')]);
    }

    #[test]
    fn later_write_at_same_time_wins() {
        let mut l = line(&[(0, 'A'), (10, 'B')]);
        assert!(l.set_value(10, 'C'));
        assert_eq!(flat(&l), vec![(0, 'A'), (10, 'C')]);
    }

    #[test]
    fn replacing_with_previous_value_removes_change() {
        let mut l = line(&[(0, 'A'), (10, 'B')]);
        assert!(l.set_value(10, 'A'));
        assert_eq!(flat(&l), vec![(0, 'A')]);

        let mut l = line(&[(0, 'A'), (10, 'B')]);
        assert!(l.set_value(0, D));
        assert_eq!(flat(&l), vec![(10, 'B')]);
    }

    #[test]
    fn following_duplicate_is_merged() {
        let mut l = line(&[(0, 'A'), (10, 'B')]);
        assert!(l.set_value(5, 'B'));
        assert_eq!(flat(&l), vec![(0, 'A'), (5, 'B')]);

        let mut l = line(&[(100, 'A')]);
        assert!(l.set_value(10, 'A'));
        assert_eq!(flat(&l), vec![(10, 'A')]);
    }

    #[test]
    fn value_at_uses_latest_change() {
        let l = line(&[(10, 'A'), (100, 'B')]);
        assert_eq!(l.value_at(0), D);
        assert_eq!(l.value_at(9), D);
        assert_eq!(l.value_at(10), 'A');
        assert_eq!(l.value_at(99), 'A');
        assert_eq!(l.value_at(100), 'B');
        assert_eq!(l.value_at(i64::MAX), 'B');
    }
}
