use bevy::reflect::{Reflect, std_traits::ReflectDefault};
use serde::{Deserialize, Serialize};

/// How the keywords of a [`NameRule`] are matched against a clip name
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameFilterKind {
    /// No keyword may appear anywhere in the name
    NotAny,
    /// At least one keyword must appear in the name
    LeastOne,
    /// Every keyword must appear in the name
    HaveAll,
    /// The name must not start with any keyword
    NotStart,
    /// The name must start with at least one keyword
    StartWith,
    /// The name must not end with any keyword
    NotEnd,
    /// The name must end with at least one keyword
    EndWith,
}

/// A single keyword rule of a [`NameRuleSet`]
#[derive(Debug, Reflect, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    pub kind: NameFilterKind,
    pub keywords: Vec<String>,
}

impl NameRule {
    pub fn new(
        kind: NameFilterKind,
        keywords: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            kind,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the given clip name satisfies this rule
    pub fn matches(&self, name: &str) -> bool {
        match self.kind {
            NameFilterKind::NotAny => !self.any_keyword(|key| name.contains(key)),
            NameFilterKind::LeastOne => self.any_keyword(|key| name.contains(key)),
            NameFilterKind::HaveAll => self.keywords.iter().all(|key| name.contains(key.as_str())),
            NameFilterKind::NotStart => !self.any_keyword(|key| name.starts_with(key)),
            NameFilterKind::StartWith => self.any_keyword(|key| name.starts_with(key)),
            NameFilterKind::NotEnd => !self.any_keyword(|key| name.ends_with(key)),
            NameFilterKind::EndWith => self.any_keyword(|key| name.ends_with(key)),
        }
    }

    fn any_keyword(&self, mut check: impl FnMut(&str) -> bool) -> bool {
        self.keywords.iter().any(|key| check(key))
    }
}

/// Conjunction of keyword rules applied to clip names: a name passes only if
/// every rule accepts it.
///
/// The default rule set keeps first-person locomotion clips and drops
/// transition poses and blend-space assets.
#[derive(Debug, Reflect, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
pub struct NameRuleSet {
    pub rules: Vec<NameRule>,
}

impl Default for NameRuleSet {
    fn default() -> Self {
        Self {
            rules: vec![
                NameRule::new(NameFilterKind::LeastOne, ["_1P_", "_1p_", "_IP_"]),
                NameRule::new(NameFilterKind::LeastOne, ["Crouch", "Walk", "Run", "Sprint"]),
                NameRule::new(
                    NameFilterKind::NotAny,
                    ["Idle", "Offset", "Wounded", "Prone", "Dying", "Start", "Stop"],
                ),
                NameRule::new(NameFilterKind::NotStart, ["BS_"]),
            ],
        }
    }
}

impl NameRuleSet {
    /// Whether the given clip name passes every rule
    pub fn matches(&self, name: &str) -> bool {
        self.rules.iter().all(|rule| rule.matches(name))
    }
}
