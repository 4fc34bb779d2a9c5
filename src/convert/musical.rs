use num_rational::Ratio;

use super::TicksConverter;
use crate::{ConvertResult, TimeSpanError, span::MusicalTimeSpan, tempo_map::TempoMapView};

/// Ticks in a whole note
fn whole_note(view: TempoMapView<'_>) -> ConvertResult<i128> {
    Ok(4 * view.ticks_per_quarter_note()? as i128)
}

impl TicksConverter for MusicalTimeSpan {
    fn from_ticks(length: i64, _anchor: i64, view: TempoMapView<'_>) -> ConvertResult<Self> {
        Self::reduce(length as i128, whole_note(view)?)
    }

    fn to_ticks(&self, _anchor: i64, view: TempoMapView<'_>) -> ConvertResult<i64> {
        let ticks = Ratio::new(
            self.numerator() as i128 * whole_note(view)?,
            self.denominator() as i128,
        );
        i64::try_from(ticks.round().to_integer()).map_err(|_| TimeSpanError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Timing, tempo_map::TempoMap};
    use pretty_assertions::assert_eq;

    #[test]
    fn rounds_to_nearest_tick() {
        let map = TempoMap::new(Timing::new_ticks_per_quarter_note(100));
        // a third of a whole note is 133.33 ticks
        let third = MusicalTimeSpan::new(1, 3);
        assert_eq!(third.to_ticks(0, map.view()), Ok(133));
        // 1/8 of 400 / 3 is 16.67
        let triplet = MusicalTimeSpan::new(1, 24);
        assert_eq!(triplet.to_ticks(0, map.view()), Ok(17));
        assert_eq!(MusicalTimeSpan::MAX.to_ticks(0, map.view()), Err(TimeSpanError::Overflow));
    }

    #[test]
    fn fractions_of_a_whole_note() {
        let map = TempoMap::new(Timing::new_ticks_per_quarter_note(480));
        assert_eq!(
            MusicalTimeSpan::from_ticks(720, 0, map.view()),
            Ok(MusicalTimeSpan::new(3, 8))
        );
    }
}
