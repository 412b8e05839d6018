use std::fmt;

/// Top-level screens, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Apod,
    Rovers,
}

impl ScreenId {
    pub const ALL: [ScreenId; 2] = [Self::Apod, Self::Rovers];

    pub fn number(self) -> u8 {
        match self {
            Self::Apod => 1,
            Self::Rovers => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Apod => "Picture of the Day",
            Self::Rovers => "Rovers",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(3), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Apod.next(), ScreenId::Rovers);
        assert_eq!(ScreenId::Rovers.next(), ScreenId::Apod);
        assert_eq!(ScreenId::Apod.prev(), ScreenId::Rovers);
    }
}
