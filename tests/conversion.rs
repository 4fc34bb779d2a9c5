mod common;

use common::*;
use midix_timespan::prelude::*;
use pretty_assertions::assert_eq;

const CONCRETE: [TimeSpanType; 5] = [
    TimeSpanType::Midi,
    TimeSpanType::Metric,
    TimeSpanType::Musical,
    TimeSpanType::BarBeatTicks,
    TimeSpanType::BarBeatFraction,
];

#[test]
fn zero_is_zero_everywhere() {
    let map = complex_tempo_map();
    for ty in CONCRETE {
        let zero = ty.zero().unwrap();
        assert_eq!(length::convert_to_type(0, ty, 5000, &map), Ok(zero.clone()));
        assert_eq!(time::convert_to_type(0, ty, &map), Ok(zero.clone()));
        assert_eq!(length::convert_from(&zero, 5000, &map), Ok(0));
    }
}

#[test]
fn zero_does_not_need_a_tempo_map() {
    let map = smpte_tempo_map();
    let metric: MetricTimeSpan = time::convert_to(0, &map).unwrap();
    assert_eq!(metric, MetricTimeSpan::ZERO);
    assert_eq!(
        time::convert_from(&MusicalTimeSpan::ZERO.into(), &map),
        Ok(0)
    );
}

#[test]
fn midi_is_the_identity() {
    let map = simple_tempo_map();
    let midi: MidiTimeSpan = length::convert_to(1234, 777, &map).unwrap();
    assert_eq!(midi, MidiTimeSpan::new(1234));
    assert_eq!(time::convert_from(&midi.into(), &map), Ok(1234));
}

#[test]
fn metric_times_follow_tempo_changes() {
    let map = complex_tempo_map();
    let at = |ticks| time::convert_to::<MetricTimeSpan>(ticks, &map).unwrap();

    assert_eq!(at(480), MetricTimeSpan::from_hmsms(0, 0, 0, 500));
    assert_eq!(at(TEN_SECONDS), MetricTimeSpan::from_hmsms(0, 0, 10, 0));
    assert_eq!(at(TEN_SECONDS + 480), MetricTimeSpan::from_hmsms(0, 0, 10, 300));
    assert_eq!(at(NINETY_SECONDS), MetricTimeSpan::from_hmsms(0, 1, 30, 0));
    assert_eq!(at(NINETY_ONE_SECONDS), MetricTimeSpan::from_hmsms(0, 1, 31, 0));
    assert_eq!(
        at(NINETY_ONE_SECONDS + 480),
        MetricTimeSpan::from_hmsms(0, 1, 31, 640)
    );

    let ticks = time::convert_from(&MetricTimeSpan::from_hmsms(0, 1, 30, 600).into(), &map);
    assert_eq!(ticks, Ok(NINETY_SECONDS + 480));
}

#[test]
fn metric_lengths_depend_on_the_anchor() {
    let map = simple_tempo_map();
    let second: TimeSpan = MetricTimeSpan::from_hmsms(0, 0, 1, 0).into();

    assert_eq!(length::convert_from(&second, 0, &map), Ok(960));
    assert_eq!(length::convert_from(&second, TEN_SECONDS, &map), Ok(1600));
    // half a second on each side of the change
    assert_eq!(length::convert_from(&second, TEN_SECONDS - 480, &map), Ok(1280));

    let metric: MetricTimeSpan = length::convert_to(1280, TEN_SECONDS - 480, &map).unwrap();
    assert_eq!(metric.total_microseconds(), 1_000_000);
}

#[test]
fn musical_lengths_ignore_tempo() {
    let map = complex_tempo_map();
    let third: MusicalTimeSpan = time::convert_to(640, &map).unwrap();
    assert_eq!(third, MusicalTimeSpan::new(1, 3));

    let dotted: MusicalTimeSpan = length::convert_to(720, NINETY_SECONDS, &map).unwrap();
    assert_eq!(dotted, MusicalTimeSpan::QUARTER.single_dotted().unwrap());
    assert_eq!(dotted.to_string(), "3/8");

    let triplet = MusicalTimeSpan::EIGHTH.triplet().unwrap();
    assert_eq!(length::convert_from(&triplet.into(), 10, &map), Ok(160));
}

#[test]
fn anchors_accept_any_representation() {
    let map = simple_tempo_map();
    let anchor: TimeSpan = BarBeatTicksTimeSpan::new(1, 0, 0).into();
    assert_eq!(anchor.to_ticks_as_time(&map), Ok(1920));

    let bbt: BarBeatTicksTimeSpan = length::convert_to(1200, anchor.clone(), &map).unwrap();
    assert_eq!(bbt, BarBeatTicksTimeSpan::new(1, 0, 0));
    assert_eq!(
        TimeSpan::from(bbt).to_ticks_as_length(&anchor, &map),
        Ok(1200)
    );
}

#[test]
fn same_representation_is_returned_as_is() {
    let map = smpte_tempo_map();
    let bbf = BarBeatFractionTimeSpan::new(3, 1.5);
    let converted: BarBeatFractionTimeSpan = time::convert(&bbf.into(), &map).unwrap();
    assert_eq!(converted, bbf);
}

#[test]
fn tempo_map_lookups_by_time_span() {
    let map = simple_tempo_map();
    let tempo = map
        .tempo_at_span(&MetricTimeSpan::from_hmsms(0, 0, 20, 0).into())
        .unwrap();
    assert_eq!(tempo.micros_per_quarter_note(), 300_000);

    let signature = map
        .time_signature_at_span(&BarBeatTicksTimeSpan::new(1, 2, 0).into())
        .unwrap();
    assert_eq!(signature, TimeSignature::new(5, 8));
}

#[test]
fn negative_arguments_are_rejected() {
    let map = default_tempo_map();
    let err = time::convert_to::<MetricTimeSpan>(-1, &map).unwrap_err();
    assert_eq!(
        err,
        TimeSpanError::InvalidArgument {
            name: "time",
            reason: "value is negative"
        }
    );

    let err = length::convert_to::<MusicalTimeSpan>(-10, 0, &map).unwrap_err();
    assert!(err.is_invalid_argument());

    let err = length::convert_to::<MusicalTimeSpan>(10, -1, &map).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn smpte_timing_is_unsupported() {
    let map = smpte_tempo_map();
    for ty in [
        TimeSpanType::Metric,
        TimeSpanType::Musical,
        TimeSpanType::BarBeatTicks,
        TimeSpanType::BarBeatFraction,
    ] {
        assert!(matches!(
            time::convert_to_type(100, ty, &map),
            Err(TimeSpanError::UnsupportedTimeDivision(_))
        ));
    }
}

#[test]
fn zero_ticks_per_quarter_note_is_unsupported() {
    let map = TempoMap::new(Timing::new_ticks_per_quarter_note(0));
    for ty in [
        TimeSpanType::Metric,
        TimeSpanType::Musical,
        TimeSpanType::BarBeatTicks,
        TimeSpanType::BarBeatFraction,
    ] {
        assert_eq!(
            time::convert_to_type(100, ty, &map),
            Err(TimeSpanError::UnsupportedTimeDivision(map.timing()))
        );
    }
    assert_eq!(
        time::convert_from(&MusicalTimeSpan::QUARTER.into(), &map),
        Err(TimeSpanError::UnsupportedTimeDivision(map.timing()))
    );
    assert_eq!(
        length::convert_from(&MetricTimeSpan::from_hmsms(0, 0, 1, 0).into(), 0, &map),
        Err(TimeSpanError::UnsupportedTimeDivision(map.timing()))
    );
    // raw ticks still pass through
    assert_eq!(time::convert_from(&MidiTimeSpan::new(100).into(), &map), Ok(100));
}

#[test]
fn math_is_not_a_target() {
    let map = default_tempo_map();
    assert!(matches!(
        time::convert_to_type(100, TimeSpanType::Math, &map),
        Err(TimeSpanError::UnsupportedOperation(_))
    ));
    assert!(matches!(
        length::convert_to_type(0, TimeSpanType::Math, 0, &map),
        Err(TimeSpanError::UnsupportedOperation(_))
    ));
}

#[test]
fn huge_spans_overflow() {
    let map = default_tempo_map();
    assert_eq!(
        length::convert_from(&BarBeatTicksTimeSpan::MAX.into(), 0, &map),
        Err(TimeSpanError::Overflow)
    );
    assert_eq!(
        length::convert_from(&MusicalTimeSpan::MAX.into(), 0, &map),
        Err(TimeSpanError::Overflow)
    );
    assert_eq!(
        length::convert_to::<MetricTimeSpan>(i64::MAX, 1, &map),
        Err(TimeSpanError::Overflow)
    );
}
