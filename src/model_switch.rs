//! Model-switch confirmation policy.
//!
//! Pure decision logic with no cache or persistence dependency: given the
//! session's current model id and a candidate, decide whether the switch
//! applies silently or needs user confirmation.

/// Outcome of proposing a model switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDecision {
    /// Candidate is already the current model.
    NoChange,

    /// Apply immediately, no confirmation needed.
    Apply,

    /// Ask the user before switching.
    NeedsConfirmation,
}

/// Decide how to handle a proposed model switch.
///
/// Switching within one provider (the segment before the first `/`) applies
/// immediately; crossing providers asks first. Ids without a provider
/// prefix compare as a whole, so any unprefixed switch asks first.
#[must_use]
pub fn decide_model_switch(current: &str, candidate: &str) -> SwitchDecision {
    if current == candidate {
        return SwitchDecision::NoChange;
    }
    if provider(current) == provider(candidate) {
        SwitchDecision::Apply
    } else {
        SwitchDecision::NeedsConfirmation
    }
}

fn provider(model: &str) -> &str {
    model.split_once('/').map_or(model, |(prefix, _)| prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_model_is_no_change() {
        assert_eq!(
            decide_model_switch("anthropic/claude-sonnet-4", "anthropic/claude-sonnet-4"),
            SwitchDecision::NoChange
        );
    }

    #[test]
    fn same_provider_applies_immediately() {
        assert_eq!(
            decide_model_switch("anthropic/claude-sonnet-4", "anthropic/claude-haiku-4"),
            SwitchDecision::Apply
        );
    }

    #[test]
    fn cross_provider_needs_confirmation() {
        assert_eq!(
            decide_model_switch("anthropic/claude-sonnet-4", "openai/gpt-5"),
            SwitchDecision::NeedsConfirmation
        );
    }

    #[test]
    fn unprefixed_ids_need_confirmation() {
        assert_eq!(
            decide_model_switch("sonnet", "haiku"),
            SwitchDecision::NeedsConfirmation
        );
    }

    #[test]
    fn unprefixed_identical_ids_are_no_change() {
        assert_eq!(
            decide_model_switch("sonnet", "sonnet"),
            SwitchDecision::NoChange
        );
    }
}
