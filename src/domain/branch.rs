//! Branch naming grammar and the advisory merge-policy table.
//!
//! Classification walks [`rules`] in priority order and returns the class of
//! the first rule whose pattern matches. Every pattern carries its literal
//! prefix, so `hotfix/`, `fix/` and `refact/` names with identical suffix
//! shapes never collide.

use std::fmt;

use regex::Regex;

/// The taxonomy bucket a branch name falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchClass {
    Main,
    Dev,
    Feature,
    Release,
    Hotfix,
    Fix,
    Refact,
    Unrecognized,
}

impl BranchClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchClass::Main => "main",
            BranchClass::Dev => "dev",
            BranchClass::Feature => "feature",
            BranchClass::Release => "release",
            BranchClass::Hotfix => "hotfix",
            BranchClass::Fix => "fix",
            BranchClass::Refact => "refact",
            BranchClass::Unrecognized => "unrecognized",
        }
    }

    /// How the class is written when it appears as a merge target or source.
    fn as_ref_name(&self) -> &'static str {
        match self {
            BranchClass::Main => "main",
            BranchClass::Dev => "dev",
            BranchClass::Feature => "feature/*",
            BranchClass::Release => "release/*",
            BranchClass::Hotfix => "hotfix/*",
            BranchClass::Fix => "fix/*",
            BranchClass::Refact => "refact/*",
            BranchClass::Unrecognized => "?",
        }
    }
}

impl fmt::Display for BranchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition attached to a permitted merge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeQualifier {
    Always,
    Conditional(&'static str),
    CherryPickOnly,
}

/// One permitted merge direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeTarget {
    pub class: BranchClass,
    pub qualifier: MergeQualifier,
}

impl MergeTarget {
    const fn always(class: BranchClass) -> Self {
        MergeTarget {
            class,
            qualifier: MergeQualifier::Always,
        }
    }

    const fn when(class: BranchClass, condition: &'static str) -> Self {
        MergeTarget {
            class,
            qualifier: MergeQualifier::Conditional(condition),
        }
    }

    const fn cherry_pick(class: BranchClass) -> Self {
        MergeTarget {
            class,
            qualifier: MergeQualifier::CherryPickOnly,
        }
    }
}

impl fmt::Display for MergeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            MergeQualifier::Always => write!(f, "{}", self.class.as_ref_name()),
            MergeQualifier::Conditional(condition) => {
                write!(f, "{} ({})", self.class.as_ref_name(), condition)
            }
            MergeQualifier::CherryPickOnly => {
                write!(f, "{} (cherry-picked)", self.class.as_ref_name())
            }
        }
    }
}

/// Hand-authored merge guidance for one branch class.
///
/// Purely advisory: nothing here inspects history or rejects a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    pub summary: &'static str,
    pub merges_into: &'static [MergeTarget],
    pub receives_from: &'static [MergeTarget],
    pub caveats: &'static [&'static str],
    pub creation_source: Option<BranchClass>,
}

impl MergePolicy {
    /// Render the policy as the bullet lines printed by `validate-branch`.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![self.summary.to_string()];

        if !self.merges_into.is_empty() {
            lines.push(format!("Merges to: {}", join_targets(self.merges_into)));
        }
        if !self.receives_from.is_empty() {
            lines.push(format!(
                "Can receive merges from: {}",
                join_targets(self.receives_from)
            ));
        }
        lines.extend(self.caveats.iter().map(|c| c.to_string()));
        if let Some(source) = self.creation_source {
            lines.push(format!("Created from: {}", source.as_ref_name()));
        }

        lines
    }
}

fn join_targets(targets: &[MergeTarget]) -> String {
    targets
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single grammar entry: the name shape of a class plus its policy.
#[derive(Debug, Clone, Copy)]
pub struct BranchRule {
    pub class: BranchClass,
    /// Anchored regular expression a name of this class must match.
    pub name_pattern: &'static str,
    /// Human-readable shape, e.g. `release/DDMMYY[-n]-description`.
    pub shape: &'static str,
    pub example: &'static str,
    pub policy: MergePolicy,
}

impl BranchRule {
    pub fn matches(&self, branch_name: &str) -> bool {
        Regex::new(self.name_pattern)
            .map(|re| re.is_match(branch_name))
            .unwrap_or(false)
    }
}

static RULES: [BranchRule; 7] = [
    BranchRule {
        class: BranchClass::Main,
        name_pattern: r"^main$",
        shape: "main (protected)",
        example: "main",
        policy: MergePolicy {
            summary: "Protected branch",
            merges_into: &[],
            receives_from: &[
                MergeTarget::always(BranchClass::Release),
                MergeTarget::always(BranchClass::Hotfix),
                MergeTarget::always(BranchClass::Fix),
            ],
            caveats: &["Requires PR approval"],
            creation_source: None,
        },
    },
    BranchRule {
        class: BranchClass::Dev,
        name_pattern: r"^dev$",
        shape: "dev (integration)",
        example: "dev",
        policy: MergePolicy {
            summary: "Integration branch",
            merges_into: &[],
            receives_from: &[
                MergeTarget::always(BranchClass::Feature),
                MergeTarget::always(BranchClass::Fix),
                MergeTarget::always(BranchClass::Refact),
            ],
            caveats: &["Never merges to release branches"],
            creation_source: None,
        },
    },
    BranchRule {
        class: BranchClass::Feature,
        name_pattern: r"^feature/[a-z0-9-]+$",
        shape: "feature/ticket-description",
        example: "feature/add-payment-gateway",
        policy: MergePolicy {
            summary: "Feature branch",
            merges_into: &[
                MergeTarget::always(BranchClass::Dev),
                MergeTarget::when(BranchClass::Release, "if targeted"),
            ],
            receives_from: &[],
            caveats: &[],
            creation_source: Some(BranchClass::Main),
        },
    },
    BranchRule {
        class: BranchClass::Release,
        name_pattern: r"^release/[0-9]{6}(-[0-9]+)?-[a-z0-9-]+$",
        shape: "release/DDMMYY[-n]-description",
        example: "release/091025-v2-payments",
        policy: MergePolicy {
            summary: "Release branch",
            merges_into: &[MergeTarget::when(BranchClass::Main, "when ready")],
            receives_from: &[
                MergeTarget::cherry_pick(BranchClass::Feature),
                MergeTarget::cherry_pick(BranchClass::Fix),
            ],
            caveats: &[
                "Never receives merges from dev",
                "Remember to create/update release.json",
            ],
            creation_source: Some(BranchClass::Main),
        },
    },
    BranchRule {
        class: BranchClass::Hotfix,
        name_pattern: r"^hotfix/[a-z0-9]+-[a-z0-9-]+$",
        shape: "hotfix/ticket-critical-description",
        example: "hotfix/t123-critical-auth-bug",
        policy: MergePolicy {
            summary: "Emergency fix branch",
            merges_into: &[
                MergeTarget::when(BranchClass::Main, "direct"),
                MergeTarget::when(BranchClass::Dev, "backport"),
                MergeTarget::when(BranchClass::Release, "backport to active releases"),
            ],
            receives_from: &[],
            caveats: &[],
            creation_source: Some(BranchClass::Main),
        },
    },
    BranchRule {
        class: BranchClass::Fix,
        name_pattern: r"^fix/[a-z0-9]+-[a-z0-9-]+$",
        shape: "fix/ticket-description",
        example: "fix/bug456-validation-error",
        policy: MergePolicy {
            summary: "Bug fix branch",
            merges_into: &[
                MergeTarget::when(BranchClass::Dev, "based on urgency"),
                MergeTarget::when(BranchClass::Release, "based on urgency"),
                MergeTarget::when(BranchClass::Main, "based on urgency"),
            ],
            receives_from: &[],
            caveats: &[],
            creation_source: Some(BranchClass::Dev),
        },
    },
    BranchRule {
        class: BranchClass::Refact,
        name_pattern: r"^refact/[a-z0-9-]+-[a-z0-9-]+$",
        shape: "refact/component-description",
        example: "refact/auth-service-cleanup",
        policy: MergePolicy {
            summary: "Code refactoring branch",
            merges_into: &[
                MergeTarget::always(BranchClass::Dev),
                MergeTarget::when(BranchClass::Release, "if needed"),
            ],
            receives_from: &[],
            caveats: &[],
            creation_source: Some(BranchClass::Dev),
        },
    },
];

/// The grammar in priority order.
pub fn rules() -> &'static [BranchRule] {
    &RULES
}

/// Look up the grammar entry of a recognized class.
pub fn rule_for(class: BranchClass) -> Option<&'static BranchRule> {
    RULES.iter().find(|rule| rule.class == class)
}

/// Classify a branch name. Total: anything outside the grammar is
/// [`BranchClass::Unrecognized`].
pub fn classify(branch_name: &str) -> BranchClass {
    RULES
        .iter()
        .find(|rule| rule.matches(branch_name))
        .map(|rule| rule.class)
        .unwrap_or(BranchClass::Unrecognized)
}

/// Merge guidance for a class; `None` for unrecognized names.
pub fn merge_policy(class: BranchClass) -> Option<&'static MergePolicy> {
    rule_for(class).map(|rule| &rule.policy)
}
