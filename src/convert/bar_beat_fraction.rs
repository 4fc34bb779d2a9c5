use super::{
    TicksConverter,
    bar_beat::{self, FRACTIONAL_BEATS_EPSILON, Landing},
};
use crate::{
    ConvertResult, TimeSpanError, num, span::BarBeatFractionTimeSpan, tempo_map::TempoMapView,
};

fn fraction_to_ticks(fraction: f64, beat_length: i64) -> ConvertResult<i64> {
    num::round_to_i64(beat_length as f64 * fraction)
}

impl TicksConverter for BarBeatFractionTimeSpan {
    fn from_ticks(length: i64, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<Self> {
        let tpqn = view.ticks_per_quarter_note()?;
        let parts = bar_beat::decompose(length, anchor, view, tpqn)?;

        let mut beats = parts.beats as f64;
        let mut fraction = parts.before.fraction() + parts.after.fraction();
        if fraction + FRACTIONAL_BEATS_EPSILON >= 1. {
            beats += 1.;
            fraction = (fraction - 1.).max(0.);
        }

        Self::try_new(parts.bars, beats + fraction)
    }

    fn to_ticks(&self, anchor: i64, view: TempoMapView<'_>) -> ConvertResult<i64> {
        let tpqn = view.ticks_per_quarter_note()?;
        let bars = self.bars();
        if bars == 0 && self.beats() < FRACTIONAL_BEATS_EPSILON {
            return Ok(0);
        }
        if bars as f64 + self.beats() > i64::MAX as f64 {
            return Err(TimeSpanError::Overflow);
        }

        let whole_beats = num::trunc(self.beats());
        let beats = whole_beats as i64;
        let fraction = self.beats() - whole_beats;

        let (start_bar, start_beat) = bar_beat::lengths(view.time_signature_at(anchor), tpqn)?;
        let estimate = num::add(
            num::add(num::mul(bars, start_bar)?, num::mul(beats, start_beat)?)?,
            fraction_to_ticks(fraction, start_beat)?,
        )?;

        let mut landing = Landing::walk(bars, estimate, anchor, view, tpqn)?;
        let fraction_before = landing.before.ticks as f64 / start_beat as f64;
        if beats == landing.before.beats
            && num::abs(fraction - fraction_before) < FRACTIONAL_BEATS_EPSILON
        {
            return landing.length();
        }

        landing.balance_beats(beats, view)?;

        if fraction_before > fraction && landing.beat_length > 0 {
            let borrowed = fraction_to_ticks(fraction + 1. - fraction_before, landing.beat_length)?;
            landing.time = num::add(landing.time - landing.beat_length, borrowed)?;
        }
        if fraction_before < fraction {
            if landing.beat_length == 0 {
                let signature = view.time_signature_at(landing.time);
                landing.beat_length = bar_beat::lengths(signature, tpqn)?.1;
            }
            let advance = fraction_to_ticks(fraction - fraction_before, landing.beat_length)?;
            landing.time = num::add(landing.time, advance)?;
        }

        landing.length()
    }
}
