use core::ptr;

use itertools::Either;

use super::{Tempo, TempoMap, TimeSignature, ValueChange, ValueLine};
use crate::{ConvertResult, TimeSpanError, Timing};

#[doc = r#"
A read-only window onto a [`TempoMap`].

A view relates its own tick axis to the map's through an affine reflection.
The view returned by [`TempoMap::view`] is the identity. [`TempoMapView::flip`]
mirrors the axis around a pivot, so that walking *forward* from the pivot in
the view walks *backward* from the pivot in the map. Length subtraction
resolves the subtracted operand this way.

Flipping is `O(1)`: nothing is copied, and a flipped view can be flipped again.

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_time_signature(1920, TimeSignature::new(3, 4)).unwrap();

let flipped = tempo_map.flip(1920);
// right after the pivot the view reads what lies right before it
assert_eq!(flipped.time_signature_at(1920), TimeSignature::new(4, 4));
assert_eq!(flipped.time_signature_at(1919), TimeSignature::new(3, 4));

assert_eq!(flipped.flip(1920), tempo_map.view());
```
"#]
#[derive(Debug, Clone, Copy)]
pub struct TempoMapView<'a> {
    map: &'a TempoMap,
    reversed: bool,
    offset: i64,
}

impl<'a> From<&'a TempoMap> for TempoMapView<'a> {
    fn from(map: &'a TempoMap) -> Self {
        Self {
            map,
            reversed: false,
            offset: 0,
        }
    }
}

impl PartialEq for TempoMapView<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.reversed == other.reversed && self.offset == other.offset
    }
}

impl<'a> TempoMapView<'a> {
    /// The map this view reads from
    pub const fn tempo_map(&self) -> &'a TempoMap {
        self.map
    }

    /// The time division of the underlying map
    pub const fn timing(&self) -> Timing {
        self.map.timing()
    }

    /// True if the view runs against the direction of the map
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Mirrors this view around `pivot`, given in this view's ticks.
    pub const fn flip(&self, pivot: i64) -> Self {
        // x = a*y + b  becomes  x = -a*y + a*(2q - 1) + b
        let mirrored = pivot.saturating_mul(2).saturating_sub(1);
        let offset = if self.reversed {
            self.offset.saturating_sub(mirrored)
        } else {
            self.offset.saturating_add(mirrored)
        };
        Self {
            map: self.map,
            reversed: !self.reversed,
            offset,
        }
    }

    /// Ticks per quarter note, if the division has a nonzero one.
    pub(crate) const fn ticks_per_quarter_note(&self) -> ConvertResult<u16> {
        match self.timing().ticks_per_quarter_note() {
            Some(tpqn) if tpqn > 0 => Ok(tpqn),
            _ => Err(TimeSpanError::UnsupportedTimeDivision(self.timing())),
        }
    }

    /// The map tick that the view tick `time` reads.
    ///
    /// Ticks that land before zero read tick zero.
    const fn source_tick(&self, time: i64) -> i64 {
        let tick = if self.reversed {
            self.offset.saturating_sub(time)
        } else {
            self.offset.saturating_add(time)
        };
        if tick < 0 { 0 } else { tick }
    }

    /// The map position of the boundary in front of view tick `time`.
    fn source_edge(&self, time: i64) -> ConvertResult<i64> {
        let edge = if self.reversed {
            self.offset
                .checked_add(1)
                .and_then(|v| v.checked_sub(time))
        } else {
            self.offset.checked_add(time)
        };
        edge.ok_or(TimeSpanError::Overflow)
    }

    /// The tempo in force at `time`
    pub fn tempo_at(&self, time: i64) -> Tempo {
        self.map.tempo_line.value_at(self.source_tick(time))
    }

    /// The time signature in force at `time`
    pub fn time_signature_at(&self, time: i64) -> TimeSignature {
        self.map.time_signature_line.value_at(self.source_tick(time))
    }

    /// Tempo changes after tick zero, ascending in this view's ticks
    pub fn tempo_changes(&self) -> impl Iterator<Item = ValueChange<Tempo>> + 'a {
        self.changes_of(&self.map.tempo_line)
    }

    /// Time signature changes after tick zero, ascending in this view's ticks
    pub fn time_signature_changes(
        &self,
    ) -> impl Iterator<Item = ValueChange<TimeSignature>> + 'a {
        self.changes_of(&self.map.time_signature_line)
    }

    fn changes_of<T: Copy + PartialEq + 'a>(
        &self,
        line: &'a ValueLine<T>,
    ) -> impl Iterator<Item = ValueChange<T>> + 'a {
        let offset = self.offset;
        let changes = line.changes();
        if !self.reversed {
            Either::Left(
                changes
                    .iter()
                    .filter(|c| c.time() > 0)
                    .filter_map(move |c| {
                        let time = c.time().checked_sub(offset)?;
                        (time > 0).then_some(ValueChange::new(time, c.value()))
                    }),
            )
        } else {
            // Crossing a change backwards restores the value in force before it.
            Either::Right(
                (0..changes.len())
                    .rev()
                    .filter(move |&i| changes[i].time() > 0)
                    .filter_map(move |i| {
                        let previous = match i {
                            0 => line.default_value(),
                            i => changes[i - 1].value(),
                        };
                        let time = offset.checked_add(1)?.checked_sub(changes[i].time())?;
                        (time > 0).then_some(ValueChange::new(time, previous))
                    }),
            )
        }
    }

    /// Microseconds elapsed between view ticks `start` and `end`, `start <= end`.
    pub(crate) fn micros_between(&self, start: i64, end: i64) -> ConvertResult<i64> {
        let cache = self.map.metric_cache()?;
        let from = cache.micros_at(self.source_edge(start)?)?;
        let to = cache.micros_at(self.source_edge(end)?)?;
        let micros = if self.reversed { from - to } else { to - from };
        Ok(micros)
    }

    /// Ticks needed to cover `micros` microseconds starting at view tick `start`.
    pub(crate) fn ticks_covering(&self, start: i64, micros: i64) -> ConvertResult<i64> {
        let cache = self.map.metric_cache()?;
        let edge = self.source_edge(start)?;
        let from = cache.micros_at(edge)?;
        if self.reversed {
            let target = from.checked_sub(micros).ok_or(TimeSpanError::Overflow)?;
            Ok(edge - cache.ticks_at(target)?)
        } else {
            let target = from.checked_add(micros).ok_or(TimeSpanError::Overflow)?;
            Ok(cache.ticks_at(target)? - edge)
        }
    }
}
