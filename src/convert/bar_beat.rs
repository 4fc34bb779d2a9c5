//! Bar and beat bookkeeping shared by both bar/beat representations.

use alloc::vec::Vec;
use itertools::Itertools;

use crate::{
    ConvertResult, TimeSpanError, num,
    tempo_map::{TempoMapView, TimeSignature},
};

/// Below this, two fractional beat counts are the same.
pub(super) const FRACTIONAL_BEATS_EPSILON: f64 = 1e-6;

/// Bar and beat lengths of `signature`, in ticks
pub(super) fn lengths(signature: TimeSignature, tpqn: u16) -> ConvertResult<(i64, i64)> {
    let beat = signature.beat_length(tpqn);
    if beat == 0 {
        return Err(TimeSpanError::invalid(
            "tempo_map",
            "time signature beat is shorter than one tick",
        ));
    }
    Ok((signature.bar_length(tpqn), beat))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct Components {
    pub(super) bars: i64,
    pub(super) beats: i64,
    pub(super) ticks: i64,
}

/// Splits `ticks` into whole bars, whole beats and leftover ticks under one signature.
pub(super) fn components(
    ticks: i64,
    signature: TimeSignature,
    tpqn: u16,
) -> ConvertResult<Components> {
    let (bar, beat) = lengths(signature, tpqn)?;
    let in_bar = ticks % bar;
    Ok(Components {
        bars: ticks / bar,
        beats: in_bar / beat,
        ticks: in_bar % beat,
    })
}

/// Leftover ticks of a partial interval and the beat they are a part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Leftover {
    pub(super) ticks: i64,
    pub(super) beat_length: i64,
}

impl Leftover {
    pub(super) fn fraction(&self) -> f64 {
        self.ticks as f64 / self.beat_length as f64
    }
}

/// Whole bars and beats of a length, leftovers not yet combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Decomposition {
    pub(super) bars: i64,
    pub(super) beats: i64,
    pub(super) before: Leftover,
    pub(super) after: Leftover,
}

/// Decomposes `length` ticks starting at `anchor`.
///
/// Every time signature change strictly inside the length starts a new run
/// of bars. Whole bars between changes are counted under the signature in
/// force. The partial stretches before the first change and after the last one
/// are split into bars, beats and ticks, and their beats are combined into one
/// more bar when they make up the starting signature's numerator.
pub(super) fn decompose(
    length: i64,
    anchor: i64,
    view: TempoMapView<'_>,
    tpqn: u16,
) -> ConvertResult<Decomposition> {
    let end = num::add(anchor, length)?;
    let changes: Vec<_> = view
        .time_signature_changes()
        .skip_while(|c| c.time() <= anchor)
        .take_while(|c| c.time() < end)
        .collect();

    let mut bars = 0;
    for (change, next) in changes.iter().tuple_windows() {
        let (bar, _) = lengths(change.value(), tpqn)?;
        bars += (next.time() - change.time()) / bar;
    }

    let first_signature = view.time_signature_at(anchor);
    let (first_time, last_time, last_signature) = match (changes.first(), changes.last()) {
        (Some(first), Some(last)) => (first.time(), last.time(), last.value()),
        _ => (anchor, anchor, first_signature),
    };

    let before = components(first_time - anchor, first_signature, tpqn)?;
    let after = components(end - last_time, last_signature, tpqn)?;
    bars = num::add(bars, num::add(before.bars, after.bars)?)?;

    let numerator = first_signature.numerator() as i64;
    let mut beats = before.beats + after.beats;
    if beats > 0 && before.beats > 0 && beats >= numerator {
        bars += 1;
        beats -= numerator;
    }

    Ok(Decomposition {
        bars,
        beats,
        before: Leftover {
            ticks: before.ticks,
            beat_length: lengths(first_signature, tpqn)?.1,
        },
        after: Leftover {
            ticks: after.ticks,
            beat_length: lengths(last_signature, tpqn)?.1,
        },
    })
}

/// The position reached after walking whole bars from an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Landing {
    pub(super) anchor: i64,
    pub(super) time: i64,
    pub(super) bar_length: i64,
    pub(super) beat_length: i64,
    /// Beats and ticks already covered between the anchor and the first change
    pub(super) before: Components,
    pub(super) start_signature: TimeSignature,
    pub(super) tpqn: u16,
}

impl Landing {
    /// Walks `bars` bars forward from `anchor`.
    ///
    /// `estimate` is the requested length measured under the starting
    /// signature. Only a change inside it can cut the first stretch short.
    /// Bars are then consumed greedily, as many per signature run as fit
    /// before the next change.
    pub(super) fn walk(
        bars: i64,
        estimate: i64,
        anchor: i64,
        view: TempoMapView<'_>,
        tpqn: u16,
    ) -> ConvertResult<Self> {
        let start_signature = view.time_signature_at(anchor);
        let estimated_end = num::add(anchor, estimate)?;

        let first_change = view
            .time_signature_changes()
            .find(|c| c.time() > anchor)
            .filter(|c| c.time() < estimated_end);
        let (mut last_time, mut last_signature) = match first_change {
            Some(change) => (change.time(), change.value()),
            None => (anchor, start_signature),
        };

        let before = components(last_time - anchor, start_signature, tpqn)?;
        let mut bars = bars - before.bars;
        let mut bar_length = 0;
        let mut beat_length = 0;

        let from = last_time;
        for change in view.time_signature_changes().skip_while(|c| c.time() <= from) {
            (bar_length, beat_length) = lengths(last_signature, tpqn)?;

            let available = (change.time() - last_time) / bar_length;
            let current = available.min(bars);
            bars -= current;
            last_time = num::add(last_time, num::mul(current, bar_length)?)?;

            if bars <= 0 {
                break;
            }
            last_signature = change.value();
        }

        if bars > 0 {
            (bar_length, beat_length) = lengths(last_signature, tpqn)?;
            last_time = num::add(last_time, num::mul(bars, bar_length)?)?;
        }

        Ok(Self {
            anchor,
            time: last_time,
            bar_length,
            beat_length,
            before,
            start_signature,
            tpqn,
        })
    }

    /// Moves from the landing to `beats` whole beats into the final bar.
    ///
    /// Borrows a bar back when more beats were already covered than requested.
    pub(super) fn balance_beats(&mut self, beats: i64, view: TempoMapView<'_>) -> ConvertResult<()> {
        if self.before.beats > beats && self.bar_length > 0 {
            let numerator = self.start_signature.numerator() as i64;
            let rest = num::mul(numerator - self.before.beats, self.beat_length)?;
            self.time = num::add(self.time - self.bar_length, rest)?;
            self.before.beats = 0;
        }

        if self.before.beats < beats {
            let (_, beat_length) = lengths(view.time_signature_at(self.time), self.tpqn)?;
            self.beat_length = beat_length;
            let advance = num::mul(beats - self.before.beats, beat_length)?;
            self.time = num::add(self.time, advance)?;
        }
        Ok(())
    }

    /// Ticks from the anchor to the landing
    pub(super) fn length(&self) -> ConvertResult<i64> {
        num::sub(self.time, self.anchor)
    }
}
