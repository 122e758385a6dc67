//! Subscription tiers and terms
//!
//! This module defines the plan vocabulary: which tier a subscription
//! grants and on what term it renews.

use serde::{Deserialize, Serialize};

/// Subscription tier.
///
/// Tiers are ordered from `Basic` up to `ProPlus`.
///
/// # Examples
///
/// ```
/// use tessera_billing::Tier;
///
/// assert!(Tier::Pro > Tier::Basic);
/// assert_eq!(Tier::parse("pro-plus"), Some(Tier::ProPlus));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Entry tier
    Basic,

    /// Mid tier
    Advanced,

    /// Professional tier
    Pro,

    /// Professional tier with everything enabled
    ProPlus,
}

impl Tier {
    /// Parse tier from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Tier)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "basic" => Some(Tier::Basic),
            "advanced" => Some(Tier::Advanced),
            "pro" => Some(Tier::Pro),
            "proplus" => Some(Tier::ProPlus),
            _ => None,
        }
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Advanced => "advanced",
            Tier::Pro => "pro",
            Tier::ProPlus => "pro-plus",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Basic => "Basic",
            Tier::Advanced => "Advanced",
            Tier::Pro => "Pro",
            Tier::ProPlus => "Pro Plus",
        }
    }
}

/// Billing term of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// Renews every month
    Monthly,

    /// Renews every year
    Annually,
}

impl Term {
    /// Parse term from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Term)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monthly" => Some(Term::Monthly),
            "annually" => Some(Term::Annually),
            _ => None,
        }
    }

    /// Get string representation of the term.
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Monthly => "monthly",
            Term::Annually => "annually",
        }
    }

    /// Get a human-readable display name for the term.
    pub fn display_name(&self) -> &'static str {
        match self {
            Term::Monthly => "Monthly",
            Term::Annually => "Annually",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::parse("basic"), Some(Tier::Basic));
        assert_eq!(Tier::parse("Advanced"), Some(Tier::Advanced));
        assert_eq!(Tier::parse("pro-plus"), Some(Tier::ProPlus));
        assert_eq!(Tier::parse("pro_plus"), Some(Tier::ProPlus));
        assert_eq!(Tier::parse("platinum"), None);
    }

    #[test]
    fn test_tier_wire_strings() {
        assert_eq!(serde_json::to_string(&Tier::ProPlus).unwrap(), "\"pro-plus\"");
        assert_eq!(serde_json::to_string(&Tier::Basic).unwrap(), "\"basic\"");

        let tier: Tier = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(tier, Tier::Advanced);

        assert!(serde_json::from_str::<Tier>("\"platinum\"").is_err());
    }

    #[test]
    fn test_tier_hierarchy() {
        assert!(Tier::Advanced > Tier::Basic);
        assert!(Tier::Pro > Tier::Advanced);
        assert!(Tier::ProPlus > Tier::Pro);
    }

    #[test]
    fn test_term_parsing() {
        assert_eq!(Term::parse("monthly"), Some(Term::Monthly));
        assert_eq!(Term::parse("Annually"), Some(Term::Annually));
        assert_eq!(Term::parse("weekly"), None);
    }

    #[test]
    fn test_term_round_trip() {
        for term in [Term::Monthly, Term::Annually] {
            assert_eq!(Term::parse(term.as_str()), Some(term));
        }
    }
}
