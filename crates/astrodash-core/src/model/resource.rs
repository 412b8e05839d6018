use std::fmt;

use serde::Serialize;

use super::Rover;

/// Identifies one remotely fetched resource.
///
/// `Display` doubles as the cache key and matches the proxy path without
/// its leading slash: `apod`, `rovers/curiosity`, `manifests/spirit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "rover", rename_all = "lowercase")]
pub enum ResourceKey {
    Apod,
    Photos(Rover),
    Manifest(Rover),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apod => f.write_str("apod"),
            Self::Photos(r) => write!(f, "rovers/{r}"),
            Self::Manifest(r) => write!(f, "manifests/{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_proxy_paths() {
        assert_eq!(ResourceKey::Apod.to_string(), "apod");
        assert_eq!(
            ResourceKey::Photos(Rover::Curiosity).to_string(),
            "rovers/curiosity"
        );
        assert_eq!(
            ResourceKey::Manifest(Rover::Spirit).to_string(),
            "manifests/spirit"
        );
    }
}
