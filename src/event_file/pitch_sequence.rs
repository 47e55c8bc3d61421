/// Sequence characters that mark something other than a pitch: pickoff
/// throws, runners going, catcher blocks and play interruptions.
const NOT_PITCHES: [char; 7] = ['+', '*', '.', '1', '2', '3', '>'];

/// A PA with no recorded sequence and an `00` count was decided on the first pitch.
const FIRST_PITCH_COUNT: &str = "00";

pub fn is_pitch(c: char) -> bool {
    !NOT_PITCHES.contains(&c)
}

pub fn count_pitches(pitch_sequence: &str, final_count: &str) -> u32 {
    if pitch_sequence.is_empty() && final_count == FIRST_PITCH_COUNT {
        return 1;
    }
    let pitches = pitch_sequence.chars().filter(|c| is_pitch(*c)).count();
    u32::try_from(pitches).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sequence() {
        assert_eq!(count_pitches("CBFFX", "32"), 5);
    }

    #[test]
    fn empty_first_pitch() {
        assert_eq!(count_pitches("", "00"), 1);
        assert_eq!(count_pitches("", "??"), 0);
        assert_eq!(count_pitches("", "12"), 0);
    }

    #[test]
    fn markers_are_not_pitches() {
        assert_eq!(count_pitches("C1>B+1*BX", "21"), 4);
        assert_eq!(count_pitches("BC.FX", "12"), 4);
        assert_eq!(count_pitches("123", "00"), 0);
    }
}
