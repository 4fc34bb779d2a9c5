#![allow(dead_code)]

use midix_timespan::prelude::*;

pub const TICKS_PER_QUARTER_NOTE: u16 = 480;

/// Ticks at 0:0:10 under the default tempo
pub const TEN_SECONDS: i64 = 9_600;
/// Ticks at 0:1:30 once the tempo drops to 300ms per quarter at ten seconds
pub const NINETY_SECONDS: i64 = TEN_SECONDS + 128_000;
/// Ticks at 0:1:31 with 600ms per quarter after ninety seconds
pub const NINETY_ONE_SECONDS: i64 = NINETY_SECONDS + 800;

fn empty() -> TempoMap {
    TempoMap::new(Timing::new_ticks_per_quarter_note(TICKS_PER_QUARTER_NOTE))
}

fn tempo(millis: u32) -> Tempo {
    Tempo::from_millis_per_quarter_note(millis).unwrap()
}

/// 4/4 at 120bpm throughout
pub fn default_tempo_map() -> TempoMap {
    empty()
}

/// ```text
/// 4/4                 5/8            5/16
///  |----+----+----+----|--+--+--+--+--|-+-+-+-+-|
///  0                   1              2         3
/// ```
pub fn simple_tempo_map() -> TempoMap {
    let mut map = empty();
    map.set_time_signature(1920, TimeSignature::new(5, 8)).unwrap();
    map.set_time_signature(3120, TimeSignature::new(5, 16)).unwrap();
    map.set_tempo(TEN_SECONDS, tempo(300)).unwrap();
    map.set_tempo(NINETY_SECONDS, tempo(600)).unwrap();
    map
}

/// ```text
/// 4/4                                     5/8            5/16                          5/8
///  |----+----+----+----|----+----+----+----|--+--+--+--+--|-+-+-+-+-|-+-+-+-+-|-+-+-+-+-|--+--+--+--+--|
///  0                   1                   2              3         4         5         6              7
/// ```
pub fn complex_tempo_map() -> TempoMap {
    let mut map = empty();
    map.set_time_signature(3840, TimeSignature::new(5, 8)).unwrap();
    map.set_time_signature(5040, TimeSignature::new(5, 16)).unwrap();
    map.set_time_signature(6840, TimeSignature::new(5, 8)).unwrap();
    map.set_tempo(TEN_SECONDS, tempo(300)).unwrap();
    map.set_tempo(NINETY_SECONDS, tempo(600)).unwrap();
    map.set_tempo(NINETY_ONE_SECONDS, tempo(640)).unwrap();
    map
}

pub fn smpte_tempo_map() -> TempoMap {
    TempoMap::new(Timing::new_smpte(SmpteFps::Thirty, 40))
}

/// Ticks spanned by the given note counts at 480 ticks per quarter note.
pub const fn notes(wholes: i64, quarters: i64, eighths: i64, sixteenths: i64) -> i64 {
    wholes * 1920 + quarters * 480 + eighths * 240 + sixteenths * 120
}

/// Checks that `span` is `length` ticks from `anchor`, in both directions.
pub fn assert_length<T>(span: T, length: i64, anchor: i64, tempo_map: &TempoMap)
where
    T: TimeSpanRepr + Into<TimeSpan> + PartialEq + core::fmt::Debug + Clone,
{
    let converted: T = length::convert_to(length, anchor, tempo_map).unwrap();
    pretty_assertions::assert_eq!(converted, span, "{length} ticks at {anchor}");

    let ticks = length::convert_from(&span.clone().into(), anchor, tempo_map).unwrap();
    pretty_assertions::assert_eq!(ticks, length, "{span:?} at {anchor}");
}
