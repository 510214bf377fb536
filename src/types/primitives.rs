// Primitives - Fundamental types shared by the document model and the adapter
use std::collections::BTreeMap;

pub use alloy_primitives::{address, Address, Bytes, B256, B64, U256};

/// Block number
pub type BlockNumber = u64;

/// Activation block of a protocol feature.
///
/// `None` means the feature never activates; `Some(0)` means it is active
/// from genesis. The two must never be conflated.
pub type Transition = Option<BlockNumber>;

/// Contract storage of a genesis account
pub type Storage = BTreeMap<B256, B256>;

/// 10^18 wei
pub const ETHER: u64 = 1_000_000_000_000_000_000;

/// Is a feature with the given transition active at `block`?
///
/// False whenever either side is unknown; otherwise monotonic in `block`.
pub fn is_forked(transition: Transition, block: Option<BlockNumber>) -> bool {
    match (transition, block) {
        (Some(activation), Some(block)) => activation <= block,
        _ => false,
    }
}

/// Amount of ether expressed in wei
pub fn ether(amount: u64) -> U256 {
    U256::from(amount) * U256::from(ETHER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_is_forked_absent() {
        assert!(!is_forked(None, Some(10)));
        assert!(!is_forked(Some(10), None));
        assert!(!is_forked(None, None));
    }

    #[test]
    fn test_is_forked_genesis() {
        assert!(is_forked(Some(0), Some(0)));
        assert!(is_forked(Some(0), Some(u64::MAX)));
    }

    #[test]
    fn test_ether_units() {
        assert_eq!(ether(3), U256::from(3_000_000_000_000_000_000u64));
        assert_eq!(ether(0), U256::ZERO);
    }

    proptest! {
        #[test]
        fn prop_is_forked_monotonic(activation in 0u64..10_000_000, block in 0u64..10_000_000) {
            prop_assert_eq!(is_forked(Some(activation), Some(block)), block >= activation);
            if is_forked(Some(activation), Some(block)) {
                prop_assert!(is_forked(Some(activation), Some(block.saturating_add(1))));
            }
        }
    }
}
