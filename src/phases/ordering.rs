//! Dependency Ordering
//!
//! Orders data sources so that each one runs after the data sources it
//! depends on. The ordering is total and never fails:
//!
//! 1.  **Cleanup**: each entry's dependencies are reduced to handles that
//!     are themselves entries. References to unknown handles are dropped.
//!
//! 2.  **Seeding**: entries left without dependencies are emitted first, in
//!     their original order.
//!
//! 3.  **Passes**: the remaining entries are scanned in order, and an entry
//!     whose dependencies have all been emitted is emitted immediately.
//!     Scanning repeats until a pass emits nothing.
//!
//! 4.  **Fallback**: entries that can never be satisfied (a cycle, or an
//!     entry depending on itself) are emitted last in their original order.

use std::collections::HashSet;

/// Handles paired with the handles they depend on, in declaration order
pub type DependencyList = Vec<(String, Vec<String>)>;

/// Order `entries` so that dependencies come first. Duplicate handles keep
/// their first occurrence.
pub fn order(entries: &[(String, Vec<String>)]) -> Vec<String> {
    let mut seen = HashSet::new();
    let entries: Vec<&(String, Vec<String>)> = entries
        .iter()
        .filter(|entry| seen.insert(entry.0.as_str()))
        .collect();
    let known: HashSet<&str> = entries
        .iter()
        .copied()
        .map(|(handle, _)| handle.as_str())
        .collect();

    let mut ordered: Vec<String> = Vec::with_capacity(entries.len());
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut remaining: Vec<(&str, Vec<&str>)> = Vec::new();

    for (handle, dependencies) in entries.iter().copied() {
        let dependencies: Vec<&str> = dependencies
            .iter()
            .map(String::as_str)
            .filter(|dependency| known.contains(dependency))
            .collect();
        if dependencies.is_empty() {
            ordered.push(handle.clone());
            emitted.insert(handle.as_str());
        } else {
            remaining.push((handle.as_str(), dependencies));
        }
    }

    loop {
        let before = remaining.len();
        let mut index = 0;
        while index < remaining.len() {
            let ready = remaining[index]
                .1
                .iter()
                .all(|dependency| emitted.contains(dependency));
            if ready {
                let (handle, _) = remaining.remove(index);
                ordered.push(handle.to_string());
                emitted.insert(handle);
            } else {
                index += 1;
            }
        }
        if remaining.is_empty() || remaining.len() == before {
            break;
        }
    }

    ordered.extend(remaining.into_iter().map(|(handle, _)| handle.to_string()));
    ordered
}
