//! Progress steps shown while a chat reply is pending

use super::models::{LoadingStep, StepIcon};
use super::rules::Keywords;

const ICONS: [StepIcon; 4] = [
    StepIcon::Search,
    StepIcon::Brain,
    StepIcon::Sparkles,
    StepIcon::Check,
];

static STEP_SETS: &[(Keywords, [&str; 4])] = &[
    (
        Keywords::any(&["win rate", "losing"]),
        [
            "Analyzing RFP database...",
            "Processing win/loss data...",
            "Identifying competitive patterns...",
            "Generating insights and recommendations...",
        ],
    ),
    (
        Keywords::any(&["safety", "violations"]),
        [
            "Scanning camera feeds...",
            "Analyzing safety compliance data...",
            "Identifying violation patterns...",
            "Preparing safety report...",
        ],
    ),
    (
        Keywords::any(&["staff", "shift"]),
        [
            "Accessing workforce management system...",
            "Analyzing current staffing levels...",
            "Calculating optimal distribution...",
            "Generating staffing recommendations...",
        ],
    ),
    (
        Keywords::any(&["dock", "truck"]),
        [
            "Checking dock management system...",
            "Analyzing queue and wait times...",
            "Optimizing dock assignments...",
            "Preparing dock status report...",
        ],
    ),
    (
        Keywords::any(&["compliance"]),
        [
            "Scanning regulatory databases...",
            "Cross-referencing compliance requirements...",
            "Identifying violations and risks...",
            "Compiling compliance report...",
        ],
    ),
    (
        Keywords::any(&["overall", "operations"]),
        [
            "Connecting to all operational systems...",
            "Aggregating real-time metrics...",
            "Analyzing cross-functional data...",
            "Building comprehensive dashboard...",
        ],
    ),
];

const GENERIC_STEPS: [&str; 4] = [
    "Routing to appropriate agent...",
    "Analyzing your request...",
    "Processing operational data...",
    "Preparing response...",
];

/// Steps to display for a pending reply to `message`
pub fn loading_steps(message: &str) -> Vec<LoadingStep> {
    let lowered = message.to_lowercase();
    let texts = STEP_SETS
        .iter()
        .find(|(keywords, _)| keywords.matches(&lowered))
        .map(|(_, texts)| texts)
        .unwrap_or(&GENERIC_STEPS);

    texts
        .iter()
        .zip(ICONS)
        .enumerate()
        .map(|(i, (text, icon))| LoadingStep {
            id: (i + 1).to_string(),
            text: text.to_string(),
            completed: false,
            icon,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_steps() {
        let steps = loading_steps("Show me all PPE violations in the last hour");
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].text, "Scanning camera feeds...");
        assert_eq!(steps[3].icon, StepIcon::Check);
        assert!(steps.iter().all(|s| !s.completed));
    }

    #[test]
    fn test_win_rate_checked_first() {
        let steps = loading_steps("why is our win rate dropping on safety bids");
        assert_eq!(steps[0].text, "Analyzing RFP database...");
    }

    #[test]
    fn test_generic_steps() {
        let steps = loading_steps("hello");
        assert_eq!(steps[0].text, "Routing to appropriate agent...");
        assert_eq!(steps[0].id, "1");
    }
}
