use super::{
    TicksConverter,
    bar_beat::{self, Landing},
};
use crate::{
    ConvertResult, TimeSpanError, num, span::BarBeatTicksTimeSpan, tempo_map::TempoMapView,
};

impl TicksConverter for BarBeatTicksTimeSpan {
    fn from_ticks(length: i64, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<Self> {
        let tpqn = view.ticks_per_quarter_note()?;
        let parts = bar_beat::decompose(length, anchor, view, tpqn)?;

        let mut beats = parts.beats;
        let mut ticks = parts.before.ticks + parts.after.ticks;
        // only leftovers that began in the first beat can complete it
        if ticks > 0 && parts.before.ticks > 0 && ticks >= parts.before.beat_length {
            beats += 1;
            ticks -= parts.before.beat_length;
        }

        Self::try_new(parts.bars, beats, ticks)
    }

    fn to_ticks(&self, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<i64> {
        let tpqn = view.ticks_per_quarter_note()?;
        let (bars, beats, ticks) = (self.bars(), self.beats(), self.ticks());
        if bars as f64 + beats as f64 + ticks as f64 > i64::MAX as f64 {
            return Err(TimeSpanError::Overflow);
        }

        let (start_bar, start_beat) = bar_beat::lengths(view.time_signature_at(anchor), tpqn)?;
        let estimate = num::add(
            num::add(num::mul(bars, start_bar)?, num::mul(beats, start_beat)?)?,
            ticks,
        )?;

        let mut landing = Landing::walk(bars, estimate, anchor, view, tpqn)?;
        if beats == landing.before.beats && ticks == landing.before.ticks {
            return landing.length();
        }

        landing.balance_beats(beats, view)?;

        let mut ticks_before = landing.before.ticks;
        if ticks_before > ticks && landing.beat_length > 0 {
            landing.time = num::add(landing.time - landing.beat_length, start_beat - ticks_before)?;
            ticks_before = 0;
        }
        if ticks_before < ticks {
            landing.time = num::add(landing.time, ticks - ticks_before)?;
        }

        landing.length()
    }
}
