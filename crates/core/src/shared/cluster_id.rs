use std::fmt;

/// Identity cluster assigned to one embedding.
///
/// Indices are only meaningful within a single clustering call; two runs
/// over the same photos may number the same person differently.
/// `Noise` orders before every cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterId {
    Noise,
    Cluster(usize),
}

impl ClusterId {
    /// Integer form used in logs and prompts: `-1` for noise.
    pub fn as_raw(&self) -> i64 {
        match self {
            ClusterId::Noise => -1,
            ClusterId::Cluster(idx) => *idx as i64,
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self, ClusterId::Noise)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}
