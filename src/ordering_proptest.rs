//! Property-based tests for data source ordering.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use crate::phases::ordering::{order, DependencyList};
    use proptest::prelude::*;

    /// Entries `h0..hN` where each may depend only on earlier entries,
    /// shuffled so declaration order is not already a valid order.
    fn acyclic() -> impl Strategy<Value = DependencyList> {
        (1usize..12)
            .prop_flat_map(|n| {
                let deps = (0..n)
                    .map(|i| prop::collection::vec(0..i.max(1), 0..3))
                    .collect::<Vec<_>>();
                (Just(n), deps)
            })
            .prop_map(|(n, deps)| {
                (0..n)
                    .map(|i| {
                        let dependencies = deps[i]
                            .iter()
                            .filter(|d| **d < i)
                            .map(|d| format!("h{}", d))
                            .collect();
                        (format!("h{}", i), dependencies)
                    })
                    .collect::<DependencyList>()
            })
            .prop_shuffle()
    }

    /// Entries with arbitrary dependencies, cycles and unknown handles
    /// included
    fn arbitrary() -> impl Strategy<Value = DependencyList> {
        prop::collection::vec(prop::collection::vec(0usize..10, 0..4), 0..10).prop_map(|deps| {
            deps.iter()
                .enumerate()
                .map(|(i, d)| {
                    (
                        format!("h{}", i),
                        d.iter().map(|d| format!("h{}", d)).collect(),
                    )
                })
                .collect()
        })
    }

    proptest! {
        /// Property: without cycles every entry follows its dependencies
        #[test]
        fn acyclic_order_is_topological(entries in acyclic()) {
            let ordered = order(&entries);
            prop_assert_eq!(ordered.len(), entries.len());
            for (handle, dependencies) in &entries {
                let at = ordered.iter().position(|h| h == handle).unwrap();
                for dependency in dependencies {
                    let dep_at = ordered.iter().position(|h| h == dependency).unwrap();
                    prop_assert!(dep_at < at, "{} ordered before {}", handle, dependency);
                }
            }
        }

        /// Property: any input, cyclic or not, yields every entry exactly once
        #[test]
        fn every_entry_appears_once(entries in arbitrary()) {
            let ordered = order(&entries);
            let expected: HashSet<&str> = entries.iter().map(|(h, _)| h.as_str()).collect();
            let seen: HashSet<&str> = ordered.iter().map(String::as_str).collect();
            prop_assert_eq!(ordered.len(), entries.len());
            prop_assert_eq!(seen, expected);
        }
    }
}
