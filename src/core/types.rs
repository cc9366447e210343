use serde::{Deserialize, Serialize};

/// Identity of a calibration line: its 0-based position in the catalog.
///
/// Names are not unique in general, so ratio pairs carry this id and resolve
/// wavelengths through it instead of searching by name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LineId(pub usize);

impl LineId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Medium the rest-frame wavelengths of a line list are given in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    Air,
    Vacuum,
    #[default]
    Unspecified,
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Air => write!(f, "air"),
            Self::Vacuum => write!(f, "vacuum"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}
