//! Prompt templates for the coaching backend.

use repcoach_exercise::MetricsSnapshot;

use crate::agent::CoachingStyle;

/// System prompt for the coach
pub const COACH_SYSTEM_PROMPT: &str = r#"You are a fitness coach watching a live workout through pose tracking. You receive the exercise, the repetition count, the current movement stage, any form warnings and the key joint angles.

Your task is to give ONE short spoken cue:
- Under 20 words
- Correct form warnings first
- Otherwise motivate rep progress or comment on the angles
- Never repeat a previous message word for word"#;

/// Template for a single coaching request
pub fn format_coach_input(snapshot: &MetricsSnapshot, style: CoachingStyle, history: &[String]) -> String {
    let warnings = if snapshot.warnings.is_empty() {
        "None".to_string()
    } else {
        snapshot.warnings.join(", ")
    };

    let previous = if history.is_empty() {
        "None".to_string()
    } else {
        history.join(" | ")
    };

    format!(
        r#"=== LIVE WORKOUT ===

Exercise: {}
Current Reps: {}
Current Stage: {}
Form Warnings: {}
Key Angles: {}

Previous Feedback: {}

Task: Provide a short feedback message (under 20 words).
Style: {}

Priority:
1. If there are Form Warnings, correct them immediately.
2. If Reps are increasing, motivate them.
3. If nothing special, comment on their form or angles.

Do not repeat previous feedback exactly."#,
        snapshot.name(),
        snapshot.reps,
        snapshot.stage_label(),
        warnings,
        snapshot.angle_summary(),
        previous,
        style.description()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcoach_exercise::{ExerciseKind, RepState};

    #[test]
    fn test_prompt_without_warnings_or_history() {
        let snapshot = MetricsSnapshot::from_state(ExerciseKind::FrontRaise, &RepState::new());
        let prompt = format_coach_input(&snapshot, CoachingStyle::Technical, &[]);

        assert!(prompt.contains("Exercise: Front Raise"));
        assert!(prompt.contains("Form Warnings: None"));
        assert!(prompt.contains("Previous Feedback: None"));
        assert!(prompt.contains("technical and precise"));
    }

    #[test]
    fn test_prompt_lists_warnings_and_history() {
        let mut state = RepState::new();
        state.warn("Keep your back straight!");
        let snapshot = MetricsSnapshot::from_state(ExerciseKind::PushUp, &state);
        let history = vec!["Nice pace!".to_string(), "Two more!".to_string()];

        let prompt = format_coach_input(&snapshot, CoachingStyle::DrillSergeant, &history);
        assert!(prompt.contains("Form Warnings: Keep your back straight!"));
        assert!(prompt.contains("Nice pace! | Two more!"));
    }
}
