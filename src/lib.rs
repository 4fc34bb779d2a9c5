#![doc = r#"
Tempo-map aware conversions between MIDI ticks and human time spans.

A Standard MIDI File measures everything in ticks. Ticks are precise, but they
say nothing about seconds, notes or bars until they are read against the
file's [`Timing`](crate::prelude::Timing) and its tempo and time signature
changes. This crate does that reading, in both directions.

# Representations

| Type                        | Meaning                                    | Display     |
|-----------------------------|--------------------------------------------|-------------|
| [`MidiTimeSpan`]            | raw ticks                                  | `480`       |
| [`MetricTimeSpan`]          | wall-clock microseconds                    | `0:0:1:500` |
| [`MusicalTimeSpan`]         | fraction of a whole note, lowest terms     | `3/8`       |
| [`BarBeatTicksTimeSpan`]    | bars, beats and ticks within the beat      | `1.2.60`    |
| [`BarBeatFractionTimeSpan`] | bars and fractional beats                  | `1_2.125`   |
| [`MathTimeSpan`]            | deferred sum or difference of the above    | `(1/4L + 2L)` |

# Time vs. length

A *time* is a position measured from tick zero. A *length* is a distance that
starts somewhere, and its meaning depends on where: two seconds after a tempo
change is a different number of ticks than two seconds before it.
[`convert::time`] anchors everything at zero, [`convert::length`] takes the
anchor explicitly.

# Text form

Every representation parses back from its display format with
[`str::parse`]. Parsing a [`TimeSpan`](crate::prelude::TimeSpan) picks the
representation from the separators used.

```rust
# use midix_timespan::prelude::*;
let span: TimeSpan = "1.2.60".parse().unwrap();
assert_eq!(span, BarBeatTicksTimeSpan::new(1, 2, 60).into());
assert_eq!("(1/4T + 0:0:1:0L)".parse::<TimeSpan>().unwrap().to_string(), "(1/4T + 0:0:1:0L)");
```

# Example
```rust
# use midix_timespan::prelude::*;
let mut tempo_map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
tempo_map.set_time_signature(1920, TimeSignature::new(3, 4)).unwrap();

// one 4/4 bar and one 3/4 bar
let bbt: BarBeatTicksTimeSpan = length::convert_to(1920 + 1440, 0, &tempo_map).unwrap();
assert_eq!(bbt, BarBeatTicksTimeSpan::new(2, 0, 0));

let ticks = length::convert_from(&bbt.into(), 0, &tempo_map).unwrap();
assert_eq!(ticks, 3360);
```

[`MidiTimeSpan`]: crate::prelude::MidiTimeSpan
[`MetricTimeSpan`]: crate::prelude::MetricTimeSpan
[`MusicalTimeSpan`]: crate::prelude::MusicalTimeSpan
[`BarBeatTicksTimeSpan`]: crate::prelude::BarBeatTicksTimeSpan
[`BarBeatFractionTimeSpan`]: crate::prelude::BarBeatFractionTimeSpan
[`MathTimeSpan`]: crate::prelude::MathTimeSpan
"#]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod convert;

mod error;
pub use error::*;

mod micros;
pub use micros::*;

pub mod span;

pub mod tempo_map;

mod timing;
pub use timing::*;

pub(crate) mod num;

/// Everything needed to build tempo maps and convert time spans.
pub mod prelude {
    pub use crate::{
        convert::{Anchor, TimeSpanRoundingPolicy, length, round, time},
        error::*,
        micros::*,
        span::*,
        tempo_map::*,
        timing::*,
    };
}
