//! Property-based tests for view path helpers.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{handle, join, lift, normalize, parent, segments};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9-]{0,8}"
    }

    proptest! {
        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(input in "[a-z/]{0,24}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: normalized paths never start or end with a slash
        #[test]
        fn normalize_strips_outer_slashes(input in "[a-z/]{0,24}") {
            let result = normalize(&input);
            prop_assert!(!result.starts_with('/'));
            prop_assert!(!result.ends_with('/'));
            prop_assert!(!result.contains("//"));
        }

        /// Property: joining a parent and a handle and splitting it again
        /// gives back both parts
        #[test]
        fn parent_and_handle_invert_join(
            bits in prop::collection::vec(segment(), 1..5),
            leaf in segment(),
        ) {
            let parent_path = bits.join("/");
            let path = join(&parent_path, &leaf);
            prop_assert_eq!(handle(&path), leaf.as_str());
            prop_assert_eq!(parent(&path), Some(parent_path));
        }

        /// Property: walking parent() from any path terminates after exactly
        /// one step per segment
        #[test]
        fn parent_chain_terminates(bits in prop::collection::vec(segment(), 1..6)) {
            let mut current = Some(bits.join("/"));
            let mut steps = 0;
            while let Some(path) = current {
                current = parent(&path);
                steps += 1;
            }
            prop_assert_eq!(steps, bits.len());
        }

        /// Property: lifting a nested path drops exactly one segment
        #[test]
        fn lift_drops_one_segment(bits in prop::collection::vec(segment(), 2..6)) {
            let path = bits.join("/");
            let lifted = lift(&path);
            prop_assert_eq!(segments(&lifted).len(), bits.len() - 1);
            prop_assert_eq!(handle(&lifted), handle(&path));
        }
    }
}
