mod common;

use common::*;
use midix_timespan::prelude::*;
use pretty_assertions::assert_eq;

fn seconds(s: i64) -> TimeSpan {
    MetricTimeSpan::from_hmsms(0, 0, s, 0).into()
}

#[test]
fn time_plus_length() {
    let map = simple_tempo_map();
    let span = seconds(10)
        .add(MusicalTimeSpan::QUARTER.into(), TimeSpanMode::TimeLength)
        .unwrap();
    assert_eq!(span.to_string(), "(0:0:10:0T + 1/4L)");
    assert_eq!(time::convert_from(&span, &map), Ok(TEN_SECONDS + 480));
}

#[test]
fn subtracting_reads_backwards() {
    let map = simple_tempo_map();
    let span = MidiTimeSpan::new(TEN_SECONDS + 480).into();
    // 0.3s after the tempo change, then 0.7s before it
    let earlier = TimeSpan::subtract(span, seconds(1), TimeSpanMode::TimeLength);
    assert_eq!(time::convert_from(&earlier, &map), Ok(8928));
}

#[test]
fn adding_then_subtracting_returns() {
    let map = simple_tempo_map();
    let there = seconds(10)
        .add(seconds(1), TimeSpanMode::TimeLength)
        .unwrap();
    assert_eq!(time::convert_from(&there, &map), Ok(TEN_SECONDS + 1600));

    let back = there.subtract(seconds(1), TimeSpanMode::TimeLength);
    assert_eq!(time::convert_from(&back, &map), Ok(TEN_SECONDS));

    let metric: MetricTimeSpan = time::convert(&back, &map).unwrap();
    assert_eq!(metric, MetricTimeSpan::from_hmsms(0, 0, 10, 0));
}

#[test]
fn length_plus_length_starts_at_the_anchor() {
    let map = simple_tempo_map();
    let span = TimeSpan::from(MidiTimeSpan::new(480))
        .add(seconds(1), TimeSpanMode::LengthLength)
        .unwrap();
    // the second starts at 0.5s before the tempo change
    assert_eq!(length::convert_from(&span, TEN_SECONDS - 960, &map), Ok(480 + 1280));
    assert_eq!(length::convert_from(&span, 0, &map), Ok(480 + 960));
}

#[test]
fn bars_subtract_across_a_signature_change() {
    let map = simple_tempo_map();
    // half a 5/8 beat into the second bar, back one 5/8 beat
    let span = TimeSpan::from(MidiTimeSpan::new(2040)).subtract(
        BarBeatTicksTimeSpan::new(0, 1, 0).into(),
        TimeSpanMode::TimeLength,
    );
    assert_eq!(time::convert_from(&span, &map), Ok(1800));
}

#[test]
fn time_differences_use_the_left_representation() {
    let map = simple_tempo_map();
    let bars = TimeSpan::from(BarBeatTicksTimeSpan::new(2, 0, 0))
        .subtract(BarBeatTicksTimeSpan::new(1, 0, 0).into(), TimeSpanMode::TimeTime);
    assert_eq!(time::convert_from(&bars, &map), Ok(1920));

    let metric = seconds(11).subtract(MidiTimeSpan::new(TEN_SECONDS).into(), TimeSpanMode::TimeTime);
    assert_eq!(time::convert_from(&metric, &map), Ok(960));

    let musical = TimeSpan::from(MusicalTimeSpan::HALF)
        .subtract(MusicalTimeSpan::QUARTER.into(), TimeSpanMode::TimeTime);
    let quarter: MusicalTimeSpan = time::convert(&musical, &map).unwrap();
    assert_eq!(quarter, MusicalTimeSpan::QUARTER);
}

#[test]
fn negative_differences() {
    let map = default_tempo_map();
    let span = TimeSpan::from(MidiTimeSpan::new(10))
        .subtract(MidiTimeSpan::new(20).into(), TimeSpanMode::TimeTime);
    assert_eq!(span.to_ticks_as_time(&map), Ok(-10));

    let err = time::convert::<MusicalTimeSpan>(&span, &map).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn nested_expressions() {
    let map = default_tempo_map();
    let inner = TimeSpan::from(MusicalTimeSpan::HALF)
        .add(MidiTimeSpan::new(100).into(), TimeSpanMode::LengthLength)
        .unwrap();
    let outer = inner
        .subtract(MusicalTimeSpan::QUARTER.into(), TimeSpanMode::LengthLength)
        .multiply(2.)
        .unwrap();
    // (1/1 + 200) - 1/2
    assert_eq!(length::convert_from(&outer, 0, &map), Ok(1920 + 200 - 960));
}

#[test]
fn adding_times_is_rejected() {
    let err = seconds(1)
        .add(seconds(2), TimeSpanMode::TimeTime)
        .unwrap_err();
    assert!(matches!(err, TimeSpanError::UnsupportedOperation(_)));
}

#[test]
fn mixed_time_differences_need_a_tempo_map() {
    let map = smpte_tempo_map();
    let span = seconds(2).subtract(MidiTimeSpan::new(10).into(), TimeSpanMode::TimeTime);
    assert!(matches!(
        time::convert_from(&span, &map),
        Err(TimeSpanError::UnsupportedTimeDivision(_))
    ));
}

#[test]
fn lengths_cancel_across_tempo_changes() {
    let map = simple_tempo_map();
    let a = seconds(5);
    let b = seconds(2);
    let round_trip = a
        .clone()
        .add(b.clone(), TimeSpanMode::LengthLength)
        .unwrap()
        .subtract(b, TimeSpanMode::LengthLength);

    for anchor in [0, 4800, TEN_SECONDS - 4000, TEN_SECONDS, NINETY_SECONDS - 1000] {
        let expected = length::convert_from(&a, anchor, &map).unwrap();
        let actual = length::convert_from(&round_trip, anchor, &map).unwrap();
        assert!(
            (expected - actual).abs() <= 1,
            "{expected} vs {actual} at {anchor}"
        );
    }
}

#[test]
fn bar_differences_carry_whole_beats_and_bars() {
    let map = default_tempo_map();
    // five beats are a bar and a beat
    let span = TimeSpan::from(BarBeatTicksTimeSpan::new(3, 0, 0))
        .subtract(BarBeatTicksTimeSpan::new(0, 5, 0).into(), TimeSpanMode::TimeTime);
    assert_eq!(time::convert_from(&span, &map), Ok(3360));

    // 600 ticks are a beat and 120
    let span = TimeSpan::from(BarBeatTicksTimeSpan::new(1, 0, 0))
        .subtract(BarBeatTicksTimeSpan::new(0, 0, 600).into(), TimeSpanMode::TimeTime);
    assert_eq!(time::convert_from(&span, &map), Ok(1320));

    let span = TimeSpan::from(BarBeatFractionTimeSpan::new(3, 0.))
        .subtract(BarBeatFractionTimeSpan::new(0, 5.5).into(), TimeSpanMode::TimeTime);
    assert_eq!(time::convert_from(&span, &map), Ok(3120));

    let span = TimeSpan::from(BarBeatTicksTimeSpan::new(1, 0, 0))
        .subtract(BarBeatTicksTimeSpan::new(0, 4, 1).into(), TimeSpanMode::TimeTime);
    assert!(time::convert_from(&span, &map).unwrap_err().is_invalid_argument());
}
