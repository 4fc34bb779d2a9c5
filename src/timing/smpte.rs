use core::fmt;

/// The possible FPS (Frames Per Second) for SMPTE based timing.
///
/// The MIDI specification defines only four possible frame types:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
///
/// A file timed this way has no notion of quarter notes, so it can only be
/// converted to and from raw ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal rate used in the file header.
    ///
    /// Drop-frame 29.97 fps returns 30 here.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The actual frame rate, including the fractional drop-frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;

impl fmt::Display for SmpteFps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwentyNine => write!(f, "{:.2} fps", self.as_f64()),
            _ => write!(f, "{} fps", self.as_division()),
        }
    }
}

#[test]
fn drop_frame_rate() {
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;
    assert_eq!(SmpteFps::TwentyNine.as_division(), 30);
    assert!((SmpteFps::TwentyNine.as_f64() - 29.97).abs() < 0.001);
    assert_eq!(SmpteFps::TwentyNine.to_string(), "29.97 fps");
    assert_eq!(SmpteFps::TwentyFour.to_string(), "24 fps");
}
