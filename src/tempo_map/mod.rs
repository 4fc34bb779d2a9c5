#![doc = r#"
Tempo and time signature timelines over the tick axis.

A [`TempoMap`] is the context every conversion reads. It is cheap to query and
caches the cumulative microsecond offsets of its tempo changes the first time a
metric conversion needs them. Mutating the map drops that cache.
"#]

mod metric;
pub(crate) use metric::*;

mod tempo;
pub use tempo::*;

mod time_signature;
pub use time_signature::*;

mod value_line;
pub use value_line::*;

mod view;
pub use view::*;

use bevy_platform::sync::OnceLock;
use core::fmt;

use crate::{
    ConvertResult, Timing, convert, ensure_non_negative, span::TimeSpan,
};

#[doc = r#"
Tempo and time signature changes of a MIDI file, with its [`Timing`].

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_tempo(960, Tempo::from_bpm(60.).unwrap()).unwrap();
tempo_map.set_time_signature(1920, TimeSignature::new(3, 4)).unwrap();

assert_eq!(tempo_map.tempo_at(959), Tempo::default());
assert_eq!(tempo_map.tempo_at(960).bpm(), 60.);

// one second at 120 bpm is 960 ticks
let one_second = MetricTimeSpan::from_hmsms(0, 0, 1, 0);
assert_eq!(tempo_map.tempo_at_span(&one_second.into()).unwrap().bpm(), 60.);
```
"#]
pub struct TempoMap {
    timing: Timing,
    pub(crate) tempo_line: ValueLine<Tempo>,
    pub(crate) time_signature_line: ValueLine<TimeSignature>,
    metric_cache: OnceLock<MetricValuesCache>,
}

impl Default for TempoMap {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

impl Clone for TempoMap {
    fn clone(&self) -> Self {
        Self {
            timing: self.timing,
            tempo_line: self.tempo_line.clone(),
            time_signature_line: self.time_signature_line.clone(),
            metric_cache: OnceLock::new(),
        }
    }
}

impl PartialEq for TempoMap {
    fn eq(&self, other: &Self) -> bool {
        self.timing == other.timing
            && self.tempo_line == other.tempo_line
            && self.time_signature_line == other.time_signature_line
    }
}

impl fmt::Debug for TempoMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempoMap")
            .field("timing", &self.timing)
            .field("tempo_line", &self.tempo_line)
            .field("time_signature_line", &self.time_signature_line)
            .finish_non_exhaustive()
    }
}

impl TempoMap {
    /// An empty map: 120 bpm and 4/4 throughout.
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            tempo_line: ValueLine::new(Tempo::DEFAULT),
            time_signature_line: ValueLine::new(TimeSignature::DEFAULT),
            metric_cache: OnceLock::new(),
        }
    }

    /// The time division of the file
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Sets the tempo from `time` on. A change already at `time` is replaced.
    pub fn set_tempo(&mut self, time: i64, tempo: Tempo) -> ConvertResult<()> {
        let time = ensure_non_negative("time", time)?;
        if self.tempo_line.set_value(time, tempo) {
            self.metric_cache = OnceLock::new();
        }
        Ok(())
    }

    /// Sets the time signature from `time` on. A change already at `time` is replaced.
    pub fn set_time_signature(
        &mut self,
        time: i64,
        time_signature: TimeSignature,
    ) -> ConvertResult<()> {
        let time = ensure_non_negative("time", time)?;
        self.time_signature_line.set_value(time, time_signature);
        Ok(())
    }

    /// Removes every tempo and time signature change
    pub fn clear(&mut self) {
        self.tempo_line.clear();
        self.time_signature_line.clear();
        self.metric_cache = OnceLock::new();
    }

    /// The tempo timeline
    pub const fn tempo_line(&self) -> &ValueLine<Tempo> {
        &self.tempo_line
    }

    /// The time signature timeline
    pub const fn time_signature_line(&self) -> &ValueLine<TimeSignature> {
        &self.time_signature_line
    }

    /// The tempo in force at `time`
    pub fn tempo_at(&self, time: i64) -> Tempo {
        self.tempo_line.value_at(time)
    }

    /// The time signature in force at `time`
    pub fn time_signature_at(&self, time: i64) -> TimeSignature {
        self.time_signature_line.value_at(time)
    }

    /// The tempo in force at a time given in any representation
    pub fn tempo_at_span(&self, time: &TimeSpan) -> ConvertResult<Tempo> {
        let ticks = convert::time::convert_from(time, self)?;
        Ok(self.tempo_at(ticks))
    }

    /// The time signature in force at a time given in any representation
    pub fn time_signature_at_span(&self, time: &TimeSpan) -> ConvertResult<TimeSignature> {
        let ticks = convert::time::convert_from(time, self)?;
        Ok(self.time_signature_at(ticks))
    }

    /// An unreflected view of this map
    pub fn view(&self) -> TempoMapView<'_> {
        TempoMapView::from(self)
    }

    /// A view of this map mirrored around `pivot`. See [`TempoMapView::flip`].
    pub fn flip(&self, pivot: i64) -> TempoMapView<'_> {
        self.view().flip(pivot)
    }

    pub(crate) fn metric_cache(&self) -> ConvertResult<&MetricValuesCache> {
        let tpqn = self.view().ticks_per_quarter_note()?;
        Ok(self
            .metric_cache
            .get_or_init(|| MetricValuesCache::new(&self.tempo_line, tpqn)))
    }
}
