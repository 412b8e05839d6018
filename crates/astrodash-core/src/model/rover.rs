use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A Mars rover the proxy can serve photos and manifests for.
///
/// `Display` / `FromStr` use the lower-case wire form (`curiosity`);
/// [`label`](Self::label) gives the capitalized UI name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rover {
    Curiosity,
    Opportunity,
    Spirit,
    Perseverance,
}

impl Rover {
    /// Rovers offered when none are configured.
    pub const DEFAULT_ROSTER: [Rover; 3] = [Self::Curiosity, Self::Opportunity, Self::Spirit];

    /// Path segment used by the proxy (`/rovers/{segment}`).
    pub fn as_path(self) -> &'static str {
        self.into()
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Curiosity => "Curiosity",
            Self::Opportunity => "Opportunity",
            Self::Spirit => "Spirit",
            Self::Perseverance => "Perseverance",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Rover::from_str("Curiosity").unwrap(), Rover::Curiosity);
        assert_eq!(Rover::from_str("SPIRIT").unwrap(), Rover::Spirit);
        assert!(Rover::from_str("sojourner").is_err());
    }

    #[test]
    fn wire_form_is_lowercase() {
        assert_eq!(Rover::Opportunity.to_string(), "opportunity");
        assert_eq!(Rover::Opportunity.as_path(), "opportunity");
        assert_eq!(Rover::Opportunity.label(), "Opportunity");
    }
}
