//! Narrowing the corpus down to the layouts compatible with an observation

use crate::codec::Layout;
use crate::io::error::Result;
use crate::matching::pattern::{ConstraintPattern, Observation};
use crate::storage::store::LayoutStore;
use tracing::debug;

/// What the corpus says about a partially observed layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No stored layout is compatible with the observation
    NoMatch,
    /// Several stored layouts remain compatible
    Ambiguous(usize),
    /// Exactly one stored layout is compatible
    Resolved(Layout),
}

impl Resolution {
    /// Number of compatible layouts
    pub const fn match_count(&self) -> usize {
        match self {
            Self::NoMatch => 0,
            Self::Ambiguous(count) => *count,
            Self::Resolved(_) => 1,
        }
    }

    /// The fully determined layout, if the observation pinned one down
    pub const fn layout(&self) -> Option<&Layout> {
        match self {
            Self::Resolved(layout) => Some(layout),
            Self::NoMatch | Self::Ambiguous(_) => None,
        }
    }
}

/// Compile `observed` and look it up in `store`
///
/// A single surviving candidate is decoded into a full layout.
///
/// # Errors
///
/// Returns an error if the observation cannot be compiled, the store cannot be read,
/// or the single matching row fails to decode.
pub fn resolve(
    store: &LayoutStore,
    observed: &Layout,
    observation: Observation,
) -> Result<Resolution> {
    let pattern = ConstraintPattern::compile(observed, observation)?;
    let mut candidates = store.find_matching(&pattern)?;

    let resolution = match candidates.len() {
        0 => Resolution::NoMatch,
        1 => match candidates.pop() {
            Some(encoded) => Resolution::Resolved(Layout::decode(&encoded)?),
            None => Resolution::NoMatch,
        },
        count => Resolution::Ambiguous(count),
    };

    debug!(
        known = observed.known_count(),
        matches = resolution.match_count(),
        "resolved observation"
    );
    Ok(resolution)
}
