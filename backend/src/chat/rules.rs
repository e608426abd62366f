//! Keyword routing for the master chat
//!
//! An ordered table of topic rules, evaluated top to bottom. The first topic
//! whose keywords appear in the lowercased message wins, then the first reply
//! inside that topic whose own keywords match (or the topic fallback).
//! Routing is a pure function of the message text.

use super::models::{ChatAction, ChatReply};
use chrono::Local;

/// Substring tests against a lowercased message
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    /// Matches if any of these occurs
    pub any: &'static [&'static str],
    /// Matches if the head occurs together with at least one of the tails
    pub all_of: &'static [(&'static str, &'static [&'static str])],
}

impl Keywords {
    /// Keywords that match on any single term
    pub const fn any(any: &'static [&'static str]) -> Self {
        Self { any, all_of: &[] }
    }

    /// Test a message that has already been lowercased
    pub fn matches(&self, lowered: &str) -> bool {
        self.any.iter().any(|k| lowered.contains(k))
            || self.all_of.iter().any(|(head, tails)| {
                lowered.contains(head) && tails.iter().any(|t| lowered.contains(t))
            })
    }
}

/// Static form of a suggested action
#[derive(Debug, Clone, Copy)]
pub struct ActionTemplate {
    /// Machine name
    pub kind: &'static str,
    /// Caption
    pub label: &'static str,
    /// What it would do
    pub description: &'static str,
}

const fn action(
    kind: &'static str,
    label: &'static str,
    description: &'static str,
) -> ActionTemplate {
    ActionTemplate {
        kind,
        label,
        description,
    }
}

/// One canned answer
#[derive(Debug, Clone, Copy)]
pub struct CannedReply {
    /// `None` marks the topic fallback
    pub when: Option<Keywords>,
    /// Display name of the answering agent
    pub handled_by: &'static str,
    /// Id of the answering agent
    pub agent_id: &'static str,
    /// Reply text; `{today}` is replaced with the current date
    pub text: &'static str,
    /// Suggested follow-ups
    pub actions: &'static [ActionTemplate],
}

impl CannedReply {
    /// Render into a wire reply
    pub fn render(&self) -> ChatReply {
        let response = if self.text.contains("{today}") {
            let today = Local::now().format("%A, %B %-d, %Y").to_string();
            self.text.replace("{today}", &today)
        } else {
            self.text.to_string()
        };

        ChatReply {
            response,
            handled_by: self.handled_by.to_string(),
            agent_id: self.agent_id.to_string(),
            actions: self
                .actions
                .iter()
                .map(|a| ChatAction {
                    action_type: a.kind.to_string(),
                    label: a.label.to_string(),
                    description: a.description.to_string(),
                })
                .collect(),
        }
    }
}

/// Topic families, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// PPE, incidents, hazards
    Safety,
    /// Staffing and shifts
    Labour,
    /// Proposals and win rate
    Rfp,
    /// Docks and trucks
    Dock,
    /// Regulatory and retailer compliance
    Compliance,
    /// Cross-functional and executive questions
    Operations,
    /// Nothing matched
    General,
}

/// A topic with its trigger keywords and ordered replies
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    /// Topic family
    pub topic: Topic,
    /// Trigger
    pub keywords: Keywords,
    /// Replies; the last one should have `when: None`
    pub replies: &'static [CannedReply],
}

impl TopicRule {
    /// First reply matching the message, falling back to the first `when: None`
    pub fn select(&self, lowered: &str) -> Option<&'static CannedReply> {
        self.replies.iter().find(|r| match r.when {
            Some(keywords) => keywords.matches(lowered),
            None => true,
        })
    }
}

const SAFETY: &str = "Safety Agent";
const LABOUR: &str = "Labour Planner";
const RFP: &str = "RFP Response Agent";
const DOCK: &str = "Dock Scheduler";
const RETAIL: &str = "Retail Compliance Agent";
const MASTER: &str = "Master Agent";

/// Topic rules in priority order
pub static RULES: &[TopicRule] = &[
    TopicRule {
        topic: Topic::Safety,
        keywords: Keywords::any(&["ppe", "safety", "violations", "accident", "incident", "hazard"]),
        replies: &[
            CannedReply {
                when: Some(Keywords::any(&["last hour", "recent", "violations in"])),
                handled_by: SAFETY,
                agent_id: "safety",
                text: "I've detected 3 PPE violations in the last hour:\n\
                       • Zone B-12: worker without hard hat near crane operation (10:42 AM)\n\
                       • Dock 4: missing safety vest during truck unloading (10:55 AM)\n\
                       • Zone A-7: improper footwear in wet area (11:15 AM)",
                actions: &[
                    action("alert", "Send Alert", "Immediate notification to zone supervisors"),
                    action("report", "Generate Report", "Detailed incident report with camera footage"),
                    action("assign", "Auto-Assign", "Deploy safety officer to location"),
                    action("view", "View Live Feed", "Open camera view of incident location"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["predict", "tomorrow"])),
                handled_by: SAFETY,
                agent_id: "safety",
                text: "Risk assessment for tomorrow:\n\
                       • Docks 2-3 during the 6 AM shift change (fatigue pattern)\n\
                       • Zone C forklift operations (new operator scheduled)\n\
                       • Rain expected: slip hazards in outdoor loading areas",
                actions: &[
                    action("preventive", "Preventive Measures", "Deploy anti-slip mats and additional signage"),
                    action("staff", "Staff Adjustment", "Pair the new operator with an experienced buddy"),
                    action("alerts", "Pre-Shift Alerts", "Send safety reminders to all workers"),
                ],
            },
            CannedReply {
                when: None,
                handled_by: SAFETY,
                agent_id: "safety",
                text: "Zone analysis for this week:\n\
                       1. Zone B (Loading): 18 violations, up 45% week over week\n\
                       2. Dock area 3-5: 12 violations, mainly PPE compliance\n\
                       3. Zone F (Cold Storage): 8 violations, temperature gear",
                actions: &[
                    action("analysis", "Deep Dive Analysis", "Breakdown by violation type"),
                    action("training", "Schedule Training", "Safety refresher for high-risk zones"),
                    action("trend", "Trend Report", "Predictive analysis for next week"),
                ],
            },
        ],
    },
    TopicRule {
        topic: Topic::Labour,
        keywords: Keywords::any(&["staff", "labour", "labor", "shift", "worker"]),
        replies: &[
            CannedReply {
                when: Some(Keywords::any(&["evening", "adequately", "tonight"])),
                handled_by: LABOUR,
                agent_id: "labour",
                text: "Evening shift analysis (6 PM - 2 AM):\n\
                       • Current staff: 47 workers\n\
                       • Predicted need: 52 workers for 3,200 expected packages\n\
                       • Gap: 5 workers short in Zones B and D\n\
                       • Risk: 35-minute delay in outbound processing without intervention",
                actions: &[
                    action("call", "Call Additional Staff", "Auto-dial qualified workers from the standby pool"),
                    action("redistribute", "Redistribute Teams", "Optimize current staff allocation"),
                    action("extend", "Extend Shifts", "Offer overtime to the current shift"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["overtime"])),
                handled_by: LABOUR,
                agent_id: "labour",
                text: "Overtime alert: 8 workers are approaching weekly limits.\n\
                       The closest is at 39 of 40 hours.",
                actions: &[
                    action("schedule", "Auto-Schedule", "Suggest replacement workers"),
                    action("cost", "Cost Analysis", "Overtime cost against new staff"),
                    action("plan", "Plan Next Week", "Balance next week's hours"),
                ],
            },
            CannedReply {
                when: None,
                handled_by: LABOUR,
                agent_id: "labour",
                text: "Team productivity:\n\
                       • Team A (Picking): 98% efficiency\n\
                       • Team B (Packing): 76% efficiency, below target\n\
                       • Team C (Loading): 82% efficiency, bottleneck identified",
                actions: &[
                    action("rotate", "Rotate Staff", "Move 2 experienced packers to Team B"),
                    action("training", "Training Module", "Assign specific skills training"),
                ],
            },
        ],
    },
    TopicRule {
        topic: Topic::Rfp,
        keywords: Keywords {
            any: &[
                "rfp",
                "proposal",
                "executive summary",
                "logistics rfp",
                "win rate",
                "losing",
                "lost",
                "deal",
                "bid",
                "contract",
            ],
            all_of: &[("quarter", &["win", "loss"])],
        },
        replies: &[
            CannedReply {
                when: Some(Keywords::any(&["win rate", "losing", "why are we"])),
                handled_by: RFP,
                agent_id: "rfp",
                text: "Win/loss analysis for the quarter:\n\
                       • Win rate: 34% (17 of 50 RFPs)\n\
                       • Top loss reasons: price (24%), missing real-time tracking API (21%), \
                       coverage gaps in the Southeast (18%)",
                actions: &[
                    action("detailed", "Detailed Analysis", "Deal-by-deal breakdown"),
                    action("strategy", "Win Strategy", "Improvement recommendations"),
                    action("comparison", "Competitor Intel", "Deep dive on competitor advantages"),
                ],
            },
            CannedReply {
                when: None,
                handled_by: RFP,
                agent_id: "rfp",
                text: "Executive summary generated:\n\
                       • Client: major retail chain (500 stores)\n\
                       • Scope: last-mile delivery optimization\n\
                       • Win probability: 73%\n\
                       • Recommended price: $4.7M (15% margin)",
                actions: &[
                    action("proposal", "Full Proposal", "Generate the complete response"),
                    action("pricing", "Pricing Models", "Run different scenarios"),
                ],
            },
        ],
    },
    TopicRule {
        topic: Topic::Dock,
        keywords: Keywords::any(&["dock", "truck", "waiting", "queue", "loading", "unloading"]),
        replies: &[CannedReply {
            when: None,
            handled_by: DOCK,
            agent_id: "dock",
            text: "Current dock status:\n\
                   • 7 trucks in queue (average wait 47 minutes)\n\
                   • Dock 2: crane down, 2 trucks waiting\n\
                   • Dock 4: understaffed, 3 trucks waiting\n\
                   • Estimated detention charges: $3,400",
            actions: &[
                action("reroute", "Re-route Trucks", "Optimize dock assignments"),
                action("repair", "Emergency Repair", "Dispatch maintenance to Dock 2"),
                action("deploy", "Deploy Team", "Move idle staff from Dock 5 to Dock 4"),
            ],
        }],
    },
    TopicRule {
        topic: Topic::Compliance,
        keywords: Keywords::any(&[
            "compliance",
            "violation",
            "regulations",
            "gs1",
            "label",
            "audit",
            "checklist",
            "ab-701",
        ]),
        replies: &[
            CannedReply {
                when: Some(Keywords::any(&["gs1", "label error"])),
                handled_by: RETAIL,
                agent_id: "retail",
                text: "GS1 label errors this week: 27 across 4 retailers.\n\
                       Barcode print quality accounts for 11, missing batch data for 8.\n\
                       Chargeback impact: $4,200.",
                actions: &[
                    action("download", "Download Error Images", "Photos of all non-compliant labels"),
                    action("autofix", "Auto-Fix Templates", "Update label templates"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["regulatory audit", "audit probability"])),
                handled_by: RETAIL,
                agent_id: "retail",
                text: "Regulatory audit risk forecast:\n\
                       • CA-LAX-01: HIGH\n\
                       • NJ-EWR-01: HIGH\n\
                       • TX-DFW-03: MEDIUM\n\
                       • IL-ORD-02: LOW",
                actions: &[
                    action("prep", "Generate Audit Prep Kit", "Checklist and documentation package"),
                    action("simulate", "Run Mock Audit", "Schedule an internal audit simulation"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["checklist", "ab-701"])),
                handled_by: RETAIL,
                agent_id: "retail",
                text: "AB-701 compliance checklist:\n\
                       1. Document productivity quotas\n\
                       2. Track work speed data\n\
                       3. Enforce mandated breaks\n\
                       4. File injury correlation reports\n\
                       5. Post written worker notices",
                actions: &[
                    action("autorun", "Schedule Auto-Run", "Daily compliance report generation"),
                    action("template", "Download Templates", "Required forms and notices"),
                ],
            },
            CannedReply {
                when: None,
                handled_by: RETAIL,
                agent_id: "retail",
                text: "Compliance alert: 4 locations with open violations.\n\
                       Total risk exposure: $340,000 in potential fines.",
                actions: &[
                    action("fix", "Fix Critical", "Dispatch immediate corrections"),
                    action("notify", "Notify Teams", "Alert site managers"),
                ],
            },
        ],
    },
    TopicRule {
        topic: Topic::Operations,
        keywords: Keywords {
            any: &[
                "overall health",
                "operations",
                "health of operations",
                "inbound volume",
                "break first",
                "exec dashboard",
                "executive dashboard",
                "investor slide",
                "ai savings",
                "rule change",
                "cost us most",
            ],
            all_of: &[("status", &["operation"])],
        },
        replies: &[
            CannedReply {
                when: Some(Keywords::any(&["inbound volume", "25%", "break first"])),
                handled_by: MASTER,
                agent_id: "master",
                text: "Surge analysis for a 25% inbound increase:\n\
                       1. Receiving docks hit capacity in 2.5 hours\n\
                       2. Unloading labour is 12 workers short in 3 hours\n\
                       3. Staging area reaches critical density in 4 hours",
                actions: &[
                    action("surge", "Create Surge Plan", "Immediate action plan with assignments"),
                    action("simulate", "Run Full Simulation", "Model exact breaking points"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["exec dashboard", "executive dashboard"])),
                handled_by: MASTER,
                agent_id: "master",
                text: "Executive dashboard for {today}:\n\
                       • Overall efficiency: 87.2%\n\
                       • On-time shipments: 94.5%\n\
                       • PPE compliance: 96.5%",
                actions: &[
                    action("export", "Export Dashboard", "Download as PDF"),
                    action("schedule", "Schedule Daily", "Generate and send at 6 AM"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["investor slide", "ai savings"])),
                handled_by: "Master Agent + RFP Response Agent",
                agent_id: "master",
                text: "AI impact slide:\n\
                       • Total savings: $3.2M\n\
                       • ROI on AI investment: 287%\n\
                       • Payback period: 4.2 months",
                actions: &[
                    action("download", "Download PPTX", "Formatted slide deck"),
                    action("notes", "Add Speaker Notes", "Detailed talking points"),
                ],
            },
            CannedReply {
                when: Some(Keywords::any(&["rule change", "cost us most"])),
                handled_by: "Retail Compliance Agent + Labour Planner",
                agent_id: "master",
                text: "Highest-cost rule changes next year:\n\
                       1. Heat protection rules: $2.4M annually\n\
                       2. Ergonomics standard update: $1.8M annually\n\
                       3. Forklift emissions: $1.2M one-time",
                actions: &[
                    action("model", "Cost Model", "Breakdown by facility and timeline"),
                    action("mitigate", "Mitigation Plan", "Strategies to reduce compliance costs"),
                ],
            },
            CannedReply {
                when: None,
                handled_by: MASTER,
                agent_id: "master",
                text: "Operations status:\n\
                       • Overall efficiency: 87% (target 90%)\n\
                       • Dock utilization: 78%\n\
                       • Staff availability: 96%\n\
                       • All systems operational",
                actions: &[
                    action("detail", "Detailed View", "Drill into any metric"),
                    action("report", "Status Report", "Generate executive summary"),
                ],
            },
        ],
    },
];

/// Reply used when no topic matches
pub static FALLBACK: CannedReply = CannedReply {
    when: None,
    handled_by: MASTER,
    agent_id: "master",
    text: "I'm analyzing your request across all operational systems:\n\
           • Safety systems: all zones monitoring\n\
           • Labour: capacity at 92%\n\
           • Docks: 12 trucks scheduled today\n\
           Would you like me to dive deeper into a specific area?",
    actions: &[
        action("dive", "Deep Dive", "Select an area for detailed analysis"),
        action("agents", "Agent Status", "View all agent performance"),
    ],
};

/// Pick the topic and canned reply for a message
pub fn select_reply(message: &str) -> (Topic, &'static CannedReply) {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .filter(|rule| rule.keywords.matches(&lowered))
        .find_map(|rule| rule.select(&lowered).map(|reply| (rule.topic, reply)))
        .unwrap_or((Topic::General, &FALLBACK))
}

/// Build the structured reply for a message
pub fn respond(message: &str) -> ChatReply {
    select_reply(message).1.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_a_fallback() {
        for rule in RULES {
            assert!(
                rule.replies.last().map(|r| r.when.is_none()).unwrap_or(false),
                "{:?} has no fallback reply",
                rule.topic
            );
        }
    }

    #[test]
    fn test_keywords_pairs() {
        let keywords = Keywords {
            any: &[],
            all_of: &[("quarter", &["win", "loss"])],
        };
        assert!(keywords.matches("what did we win this quarter"));
        assert!(!keywords.matches("quarter results"));
        assert!(!keywords.matches("a big win"));
    }

    #[test]
    fn test_priority_order() {
        // "violations" belongs to safety even though compliance also lists "violation"
        assert_eq!(select_reply("violations at dock 4").0, Topic::Safety);
        assert_eq!(select_reply("any violation in labels?").0, Topic::Compliance);
        // staffing beats dock
        assert_eq!(select_reply("dock staff levels").0, Topic::Labour);
        // pair rule
        assert_eq!(select_reply("status of each operation").0, Topic::Operations);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(select_reply("RFP DRAFTS").0, Topic::Rfp);
    }

    #[test]
    fn test_fallback() {
        let (topic, reply) = select_reply("hello there");
        assert_eq!(topic, Topic::General);
        assert_eq!(reply.handled_by, "Master Agent");
        assert_eq!(respond("hello there").agent_id, "master");
    }

    #[test]
    fn test_today_placeholder_is_rendered() {
        let reply = respond("Show me the executive dashboard");
        assert!(!reply.response.contains("{today}"));
        assert_eq!(reply.handled_by, "Master Agent");
    }

    #[test]
    fn test_sub_reply_selection() {
        assert!(respond("predict safety risk for tomorrow")
            .response
            .starts_with("Risk assessment"));
        assert!(respond("GS1 label errors by retailer")
            .response
            .starts_with("GS1 label errors"));
    }
}
