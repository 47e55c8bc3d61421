use serde::Serialize;

use crate::event_file::play::DecodedEvent;
use crate::util::count_matches;

const STOLEN_BASE: &str = "SB";
const DOUBLE_PLAY: &str = "DP";
const UNEARNED_RUN: &str = "UR";
const NO_RBI: &str = "NR";
// Both count as a run scored on an advance
const RUN_SCORED_MARKERS: [&str; 2] = ["-H", "-B"];

/// Everything derived about a plate appearance from its event string.
/// The flags come from prefix rules on the basic play; the last four are
/// combinations of the others and are never set directly.
#[derive(Debug, Default, Eq, PartialEq, Clone, Copy, Serialize)]
pub struct PlayOutcome {
    pub single: bool,
    pub double: bool,
    pub triple: bool,
    pub home_run: bool,
    pub ground_rule_double: bool,
    pub strike_out: bool,
    pub walk: bool,
    pub intentional_walk: bool,
    pub fielders_choice: bool,
    pub reached_on_error: bool,
    pub hit_by_pitch: bool,
    pub double_play: bool,
    pub steals: u32,
    pub double_plays: u32,
    pub runs: u32,
    pub unearned_runs: u32,
    pub rbi: i32,
    pub hit: bool,
    pub on_base: bool,
    pub at_bat: bool,
    pub in_play: bool,
}

fn count(haystack: &str, needle: &str) -> u32 {
    u32::try_from(count_matches(haystack, needle)).unwrap_or(u32::MAX)
}

impl PlayOutcome {
    fn is_home_run(basic_play: &str) -> bool {
        basic_play.starts_with('H') && !Self::is_hit_by_pitch(basic_play)
    }

    fn is_hit_by_pitch(basic_play: &str) -> bool {
        basic_play.starts_with("HP") || basic_play.starts_with("HB")
    }

    fn runs(home_run: bool, advances: &[String]) -> u32 {
        let advance_runs: u32 = advances
            .iter()
            .flat_map(|a| RUN_SCORED_MARKERS.iter().map(move |m| count(a, m)))
            .sum();
        u32::from(home_run) + advance_runs
    }

    fn with_derived(mut self) -> Self {
        self.hit = self.single || self.double || self.triple || self.home_run;
        self.on_base = self.hit || self.walk || self.hit_by_pitch;
        self.at_bat =
            !(self.hit_by_pitch || self.walk || self.intentional_walk || self.reached_on_error);
        self.in_play = !(self.home_run
            || self.walk
            || self.intentional_walk
            || self.hit_by_pitch
            || self.strike_out);
        self
    }
}

impl From<&DecodedEvent> for PlayOutcome {
    fn from(event: &DecodedEvent) -> Self {
        let play = event.basic_play.as_str();
        let counting_string = event.counting_string();

        let home_run = Self::is_home_run(play);
        let intentional_walk = play.starts_with('I');
        let double_plays = count(play, DOUBLE_PLAY);
        let runs = Self::runs(home_run, &event.advances);
        let no_rbi = count(&counting_string, NO_RBI);

        Self {
            single: play.starts_with('S'),
            double: play.starts_with('D'),
            triple: play.starts_with('T'),
            home_run,
            ground_rule_double: play.starts_with("DGR"),
            strike_out: play.starts_with('K'),
            walk: intentional_walk || play.starts_with('W'),
            intentional_walk,
            fielders_choice: play.starts_with("FC"),
            reached_on_error: play.starts_with('E'),
            hit_by_pitch: Self::is_hit_by_pitch(play),
            double_play: double_plays > 0,
            steals: count(play, STOLEN_BASE),
            double_plays,
            runs,
            unearned_runs: count(&counting_string, UNEARNED_RUN),
            rbi: i32::try_from(runs).unwrap_or(i32::MAX) - i32::try_from(no_rbi).unwrap_or(0),
            ..Self::default()
        }
        .with_derived()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(event: &str) -> PlayOutcome {
        PlayOutcome::from(&DecodedEvent::from(event))
    }

    #[test]
    fn single() {
        let o = outcome("S7");
        assert!(o.single && o.hit && o.on_base && o.at_bat && o.in_play);
        assert!(!o.double && !o.home_run);
        assert_eq!(o.runs, 0);
        assert_eq!(o.rbi, 0);
    }

    #[test]
    fn home_run() {
        let o = outcome("HR");
        assert!(o.home_run && o.hit && o.on_base && o.at_bat);
        assert!(!o.in_play && !o.hit_by_pitch);
        assert_eq!(o.runs, 1);
        assert_eq!(o.rbi, 1);

        let o = outcome("H/F78XD.2-H;1-H");
        assert!(o.home_run);
        assert_eq!(o.runs, 3);
        assert_eq!(o.rbi, 3);
    }

    #[test]
    fn strike_out() {
        let o = outcome("K");
        assert!(o.strike_out && o.at_bat);
        assert!(!o.hit && !o.on_base && !o.in_play);
    }

    #[test]
    fn hit_by_pitch() {
        for event in ["HP", "HB.1-2"] {
            let o = outcome(event);
            assert!(o.hit_by_pitch && o.on_base, "{event}");
            assert!(!o.home_run && !o.hit && !o.at_bat && !o.in_play, "{event}");
        }
    }

    #[test]
    fn walks() {
        let o = outcome("W.1-2");
        assert!(o.walk && !o.intentional_walk && o.on_base && !o.at_bat && !o.in_play);

        let o = outcome("IW");
        assert!(o.walk && o.intentional_walk && !o.at_bat && !o.in_play);
    }

    #[test]
    fn ground_rule_double_is_also_double() {
        let o = outcome("DGR/L9LS.2-H");
        assert!(o.ground_rule_double && o.double && o.hit && o.in_play);
        assert_eq!(o.runs, 1);

        let o = outcome("D8/F8D");
        assert!(o.double && !o.ground_rule_double);
    }

    #[test]
    fn triple_fielders_choice_error() {
        assert!(outcome("T9/F9LD").triple);

        let o = outcome("FC5/G5.3XH(52)");
        assert!(o.fielders_choice && o.at_bat && o.in_play && !o.hit);
        assert_eq!(o.runs, 0);

        let o = outcome("E6/G6.B-1");
        assert!(o.reached_on_error && !o.at_bat && !o.on_base && o.in_play);
    }

    #[test]
    fn steals_and_double_plays_are_counts() {
        let o = outcome("SB2;SB3");
        assert_eq!(o.steals, 2);

        let o = outcome("64(1)3DP");
        assert_eq!(o.double_plays, 1);
        assert!(o.double_play);

        // Only the basic play is searched, not the modifiers
        let o = outcome("64(1)3/GDP/G6");
        assert_eq!(o.double_plays, 0);
        assert!(!o.double_play);
    }

    #[test]
    fn runs_from_advances() {
        let o = outcome("S9/L9S.3-H;2-H;B-2");
        assert_eq!(o.runs, 2);
        assert_eq!(outcome("WP.3-B").runs, 1);
    }

    #[test]
    fn run_markers_in_advances_are_not_counted() {
        // Only the separators of advances reach the counting string
        let o = outcome("S8/G.3-H(UR);2-H(NR)");
        assert_eq!(o.runs, 2);
        assert_eq!(o.unearned_runs, 0);
        assert_eq!(o.rbi, 2);
    }

    #[test]
    fn run_markers_in_modifiers_are_counted() {
        let o = outcome("HR/UR/NR");
        assert_eq!(o.unearned_runs, 1);
        assert_eq!(o.rbi, 0);
    }
}
