//! Heuristic importance scoring for chat messages.

use engram_models::ChatRole;

const BASE_SCORE: f32 = 0.5;
const LENGTH_BONUS: f32 = 0.1;
const QUESTION_BONUS: f32 = 0.1;
const USER_BONUS: f32 = 0.1;

/// Estimate how worth-remembering a message is, in [0, 1].
///
/// Starts at 0.5. Both length thresholds are additive (a 600-character
/// message earns 0.2 from length alone); questions and user messages add
/// 0.1 each. The sum is clamped at 1.0.
pub fn score(text: &str, role: ChatRole) -> f32 {
    let mut score = BASE_SCORE;

    if text.len() > 100 {
        score += LENGTH_BONUS;
    }
    if text.len() > 500 {
        score += LENGTH_BONUS;
    }
    if text.contains('?') {
        score += QUESTION_BONUS;
    }
    if role.is_user() {
        score += USER_BONUS;
    }

    score.min(1.0)
}
