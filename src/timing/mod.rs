use core::fmt;

mod smpte;
pub use smpte::*;

/// The default resolution used when none is given.
pub const DEFAULT_TICKS_PER_QUARTER_NOTE: u16 = 96;

/// The time division of a MIDI file.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. Only the former relates ticks to notes,
/// so every conversion other than raw ticks requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Default for Timing {
    fn default() -> Self {
        Self::new_ticks_per_quarter_note(DEFAULT_TICKS_PER_QUARTER_NOTE)
    }
}

impl Timing {
    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// The leading bit of the u16 is disregarded, so 1-32767
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote(tpqn & 0x7FFF))
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TicksPerQuarterNote(t) => {
                write!(f, "{} ticks per quarter note", t.ticks_per_quarter_note())
            }
            Self::Smpte(s) => write!(f, "{}, {} ticks per frame", s.fps(), s.ticks_per_frame()),
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote(u16);

impl TicksPerQuarterNote {
    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.0
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    fps: SmpteFps,
    ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

#[test]
fn leading_bit_is_ignored() {
    use pretty_assertions::assert_eq;
    let timing = Timing::new_ticks_per_quarter_note(0x8000 | 480);
    assert_eq!(timing.ticks_per_quarter_note(), Some(480));

    let smpte = Timing::new_smpte(SmpteFps::TwentyFive, 40);
    assert_eq!(smpte.ticks_per_quarter_note(), None);
    assert_eq!(
        alloc::format!("{smpte}"),
        "25 fps, 40 ticks per frame"
    );
}
