mod common;

use common::*;
use midix_timespan::prelude::{
    TimeSpanRoundingPolicy::{NoRounding, RoundDown, RoundUp},
    *,
};
use pretty_assertions::assert_eq;

fn midi(ticks: i64) -> TimeSpan {
    MidiTimeSpan::new(ticks).into()
}

fn millis(ms: i64) -> TimeSpan {
    MetricTimeSpan::from_hmsms(0, 0, 0, ms).into()
}

fn bbt(bars: i64, beats: i64, ticks: i64) -> TimeSpan {
    BarBeatTicksTimeSpan::new(bars, beats, ticks).into()
}

fn bbf(bars: i64, beats: f64) -> TimeSpan {
    BarBeatFractionTimeSpan::new(bars, beats).into()
}

fn rounded(
    span: TimeSpan,
    policy: TimeSpanRoundingPolicy,
    step: TimeSpan,
    map: &TempoMap,
) -> TimeSpan {
    span.round(policy, 0, &step, map).unwrap()
}

#[test]
fn no_rounding_and_zero_steps_keep_the_span() {
    let map = default_tempo_map();
    for span in [midi(100), millis(1234), bbt(1, 2, 3), bbf(0, 5.5)] {
        assert_eq!(rounded(span.clone(), NoRounding, midi(100), &map), span);
        assert_eq!(rounded(span.clone(), RoundUp, midi(0), &map), span);
        assert_eq!(rounded(span.clone(), RoundDown, bbt(0, 0, 0), &map), span);
    }
}

#[test]
fn ticks_snap_to_the_step() {
    let map = default_tempo_map();
    assert_eq!(rounded(midi(20), RoundUp, midi(15), &map), midi(30));
    assert_eq!(rounded(midi(20), RoundDown, midi(15), &map), midi(15));
    assert_eq!(rounded(midi(10), RoundDown, midi(15), &map), midi(0));
    assert_eq!(rounded(midi(30), RoundUp, midi(15), &map), midi(30));
}

#[test]
fn metric_steps_round_wall_clock_time() {
    let map = default_tempo_map();
    assert_eq!(rounded(millis(2500), RoundUp, millis(2000), &map), millis(4000));
    assert_eq!(rounded(millis(2500), RoundDown, millis(2000), &map), millis(2000));
    assert_eq!(rounded(millis(2500), RoundDown, millis(3000), &map), millis(0));
    assert_eq!(rounded(millis(5000), RoundUp, millis(4000), &map), millis(8000));

    // 1.25 seconds at 120 bpm
    assert_eq!(rounded(midi(1200), RoundUp, millis(1000), &map), millis(2000));
    assert_eq!(rounded(midi(1200), RoundDown, millis(1000), &map), millis(1000));
}

#[test]
fn metric_grids_start_at_the_anchor() {
    let map = simple_tempo_map();
    // half a second before the tempo change, then 520 ticks after it
    let anchor = TEN_SECONDS - 480;
    let up = midi(1000)
        .round(RoundUp, anchor, &millis(500), &map)
        .unwrap();
    assert_eq!(up, millis(1000));
    assert_eq!(length::convert_from(&up, anchor, &map), Ok(1280));

    let down = midi(1000)
        .round(RoundDown, anchor, &millis(500), &map)
        .unwrap();
    assert_eq!(down, millis(500));
}

#[test]
fn musical_steps() {
    let map = default_tempo_map();
    let half: TimeSpan = MusicalTimeSpan::HALF.into();
    let dotted_quarter: TimeSpan = MusicalTimeSpan::new(3, 8).into();
    assert_eq!(
        rounded(half.clone(), RoundUp, dotted_quarter.clone(), &map),
        MusicalTimeSpan::new(3, 4).into()
    );
    assert_eq!(rounded(half.clone(), RoundDown, dotted_quarter.clone(), &map), dotted_quarter);
    assert_eq!(
        rounded(half, RoundDown, MusicalTimeSpan::new(2, 1).into(), &map),
        MusicalTimeSpan::ZERO.into()
    );
}

#[test]
fn bar_beat_steps_without_signature_changes() {
    let map = default_tempo_map();
    assert_eq!(rounded(bbt(1, 0, 10), RoundUp, bbt(1, 0, 0), &map), bbt(2, 0, 0));
    assert_eq!(rounded(bbt(1, 0, 10), RoundDown, bbt(1, 0, 0), &map), bbt(1, 0, 0));
    assert_eq!(rounded(bbt(1, 1, 2), RoundUp, bbt(0, 1, 0), &map), bbt(1, 2, 0));
    assert_eq!(rounded(bbt(1, 1, 2), RoundDown, bbt(0, 1, 0), &map), bbt(1, 1, 0));
    assert_eq!(rounded(bbt(0, 2, 17), RoundUp, bbt(0, 0, 15), &map), bbt(0, 2, 30));
    assert_eq!(rounded(bbt(0, 2, 17), RoundDown, bbt(0, 0, 15), &map), bbt(0, 2, 15));
}

#[test]
fn bar_steps_follow_signature_changes() {
    let map = simple_tempo_map();
    // a 4/4 bar and a 5/8 beat, 2160 ticks
    let span = bbt(1, 1, 0);
    let up = rounded(span.clone(), RoundUp, bbt(1, 0, 0), &map);
    assert_eq!(up, bbt(2, 0, 0));
    assert_eq!(up.to_ticks_as_time(&map), Ok(1920 + 1200));
    assert_eq!(rounded(span.clone(), RoundDown, bbt(1, 0, 0), &map), bbt(1, 0, 0));

    // a tick grid does not know about the shorter bar
    assert_eq!(rounded(span, RoundUp, midi(1920), &map), midi(3840));

    assert_eq!(rounded(bbt(2, 0, 0), RoundUp, bbt(1, 0, 0), &map), bbt(2, 0, 0));

    assert_eq!(rounded(bbf(1, 1.), RoundUp, bbf(1, 0.), &map), bbf(2, 0.));
    assert_eq!(rounded(bbf(1, 1.), RoundDown, bbf(1, 0.), &map), bbf(1, 0.));
}

#[test]
fn fractional_beat_steps_keep_their_precision() {
    let map = default_tempo_map();
    assert_eq!(rounded(bbf(0, 1.3), RoundUp, bbf(0, 0.25), &map), bbf(0, 1.5));
    assert_eq!(rounded(bbf(0, 1.3), RoundDown, bbf(0, 0.25), &map), bbf(0, 1.25));
}

#[test]
fn steps_shorter_than_a_tick_are_rejected() {
    let map = default_tempo_map();
    let err = midi(100)
        .round(RoundUp, 0, &MusicalTimeSpan::new(1, 10_000).into(), &map)
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn expressions_are_not_a_rounding_grid() {
    let map = default_tempo_map();
    let step = midi(10).add(midi(5), TimeSpanMode::LengthLength).unwrap();
    assert!(matches!(
        midi(100).round(RoundUp, 0, &step, &map),
        Err(TimeSpanError::UnsupportedOperation(_))
    ));
}
