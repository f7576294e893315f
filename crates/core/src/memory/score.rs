/// Floor of the memory-game score, however slow the player was.
pub const MIN_MEMORY_SCORE: u32 = 100;

const BASE_SCORE: i64 = 1_000;
const MOVE_PENALTY: i64 = 10;

/// `max(100, 1000 - moves * 10 - elapsed_secs / 2)`, halving rounded down.
#[must_use]
pub fn memory_score(moves: u32, elapsed_secs: u64) -> u32 {
    let move_penalty = i64::from(moves).saturating_mul(MOVE_PENALTY);
    let time_penalty = i64::try_from(elapsed_secs / 2).unwrap_or(i64::MAX);
    let raw = BASE_SCORE
        .saturating_sub(move_penalty)
        .saturating_sub(time_penalty);
    u32::try_from(raw).map_or(MIN_MEMORY_SCORE, |score| score.max(MIN_MEMORY_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(memory_score(0, 0), 1000);
        assert_eq!(memory_score(200, 0), 100);
        assert_eq!(memory_score(10, 20), 890);
    }

    #[test]
    fn odd_seconds_round_down() {
        assert_eq!(memory_score(0, 3), 999);
        assert_eq!(memory_score(8, 45), 898);
    }

    #[test]
    fn never_drops_below_floor() {
        assert_eq!(memory_score(u32::MAX, u64::MAX), MIN_MEMORY_SCORE);
        assert_eq!(memory_score(95, 0), 100);
        assert_eq!(memory_score(89, 0), 110);
    }
}
