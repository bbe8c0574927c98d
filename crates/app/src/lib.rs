pub mod app_loop;
pub mod audio;
pub mod seed;
pub mod settings_file;

use chase_core::{DefeatCause, RunOutcome};

pub const APP_NAME: &str = "Chase";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Short code for a finished run, shown on the end screen and in the run log line.
pub fn outcome_code(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Victory => "WIN_EXIT",
        RunOutcome::Defeat(DefeatCause::Caught) => "LOSE_CAUGHT",
        RunOutcome::Defeat(DefeatCause::OutOfLives) => "LOSE_NO_LIVES",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
    }

    #[test]
    fn outcome_codes_are_distinct() {
        assert_eq!(outcome_code(&RunOutcome::Victory), "WIN_EXIT");
        assert_eq!(outcome_code(&RunOutcome::Defeat(DefeatCause::Caught)), "LOSE_CAUGHT");
        assert_eq!(outcome_code(&RunOutcome::Defeat(DefeatCause::OutOfLives)), "LOSE_NO_LIVES");
    }
}
