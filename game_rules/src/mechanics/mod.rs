//! Relationship mechanics: standing tiers and what each tier unlocks.

use serde::{Deserialize, Serialize};

/// Standing with an NPC, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipTier {
    Hostile,
    Unfriendly,
    Neutral,
    Friendly,
    Trusted,
    Devoted,
}

/// Interactions an NPC may offer depending on standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Trade,
    Quests,
    Gossip,
    Discount,
    Secrets,
    Gifts,
}

/// Lowest score that reaches each tier, best tier first.
const TIER_THRESHOLDS: [(i64, RelationshipTier); 5] = [
    (80, RelationshipTier::Devoted),
    (50, RelationshipTier::Trusted),
    (25, RelationshipTier::Friendly),
    (0, RelationshipTier::Neutral),
    (-50, RelationshipTier::Unfriendly),
];

const HOSTILE_CAPABILITIES: &[Capability] = &[];
const UNFRIENDLY_CAPABILITIES: &[Capability] = &[Capability::Trade];
const NEUTRAL_CAPABILITIES: &[Capability] = &[Capability::Trade, Capability::Quests];
const FRIENDLY_CAPABILITIES: &[Capability] =
    &[Capability::Trade, Capability::Quests, Capability::Gossip];
const TRUSTED_CAPABILITIES: &[Capability] = &[
    Capability::Trade,
    Capability::Quests,
    Capability::Gossip,
    Capability::Discount,
    Capability::Secrets,
];
const DEVOTED_CAPABILITIES: &[Capability] = &[
    Capability::Trade,
    Capability::Quests,
    Capability::Gossip,
    Capability::Discount,
    Capability::Secrets,
    Capability::Gifts,
];

impl RelationshipTier {
    /// Tier for a relationship score.
    pub fn from_score(score: i64) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(RelationshipTier::Hostile)
    }

    /// Everything this tier unlocks. Each tier lists its full set.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            RelationshipTier::Hostile => HOSTILE_CAPABILITIES,
            RelationshipTier::Unfriendly => UNFRIENDLY_CAPABILITIES,
            RelationshipTier::Neutral => NEUTRAL_CAPABILITIES,
            RelationshipTier::Friendly => FRIENDLY_CAPABILITIES,
            RelationshipTier::Trusted => TRUSTED_CAPABILITIES,
            RelationshipTier::Devoted => DEVOTED_CAPABILITIES,
        }
    }

    /// Whether this tier grants `capability`.
    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RelationshipTier::from_score(-51), RelationshipTier::Hostile);
        assert_eq!(RelationshipTier::from_score(-50), RelationshipTier::Unfriendly);
        assert_eq!(RelationshipTier::from_score(-1), RelationshipTier::Unfriendly);
        assert_eq!(RelationshipTier::from_score(0), RelationshipTier::Neutral);
        assert_eq!(RelationshipTier::from_score(25), RelationshipTier::Friendly);
        assert_eq!(RelationshipTier::from_score(50), RelationshipTier::Trusted);
        assert_eq!(RelationshipTier::from_score(80), RelationshipTier::Devoted);
        assert_eq!(RelationshipTier::from_score(i64::MAX), RelationshipTier::Devoted);
    }

    #[test]
    fn test_capabilities_grow_with_tier() {
        assert!(!RelationshipTier::Hostile.allows(Capability::Trade));
        assert!(RelationshipTier::Unfriendly.allows(Capability::Trade));
        assert!(!RelationshipTier::Friendly.allows(Capability::Secrets));
        assert!(RelationshipTier::Trusted.allows(Capability::Secrets));
        assert!(RelationshipTier::Devoted.allows(Capability::Gifts));
    }

    #[test]
    fn test_higher_tier_keeps_lower_capabilities() {
        let tiers = [
            RelationshipTier::Hostile,
            RelationshipTier::Unfriendly,
            RelationshipTier::Neutral,
            RelationshipTier::Friendly,
            RelationshipTier::Trusted,
            RelationshipTier::Devoted,
        ];

        for pair in tiers.windows(2) {
            for capability in pair[0].capabilities() {
                assert!(pair[1].allows(*capability), "{:?} lost {:?}", pair[1], capability);
            }
        }
    }
}
