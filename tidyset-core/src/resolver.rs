use crate::engine::split_name;
use std::collections::HashSet;

/// Outcome of resolving one candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub final_name: String,
    /// Whether at least one collision probe was needed.
    pub collided: bool,
}

/// Assign a final, unique name to one entry.
///
/// A self-mapping (`candidate == original`) is never a collision. Otherwise a
/// candidate collides when it was already claimed earlier in this batch
/// (`used`) or exists on disk under a different entry (`preexisting`); the
/// resolver then probes `root_1.ext`, `root_2.ext`, ... until a free name is
/// found. Callers must insert every accepted name into `used` before
/// resolving the next entry, so iteration order decides tie-breaks.
pub fn resolve(
    original: &str,
    candidate: &str,
    used: &HashSet<String>,
    preexisting: &HashSet<String>,
) -> Resolution {
    if candidate == original {
        return Resolution {
            final_name: candidate.to_string(),
            collided: false,
        };
    }

    let taken = |name: &str| {
        used.contains(name) || (preexisting.contains(name) && name != original)
    };

    if !taken(candidate) {
        return Resolution {
            final_name: candidate.to_string(),
            collided: false,
        };
    }

    let (root, ext) = split_name(candidate);
    let mut counter: u64 = 1;
    loop {
        let probe = format!("{root}_{counter}{ext}");
        if !taken(&probe) {
            return Resolution {
                final_name: probe,
                collided: true,
            };
        }
        counter += 1;
    }
}
