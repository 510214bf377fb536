// Bomb - Difficulty bomb delay and block reward schedule inference
//
// The document only stores the cumulative `difficultyBombDelays` and
// `blockReward` maps. EIP-649 (Byzantium) and EIP-1234 (Constantinople) each
// move both, so their activation blocks have to be recovered from the
// combined values, and writes have to keep the running delay total exact:
//
//   same block        {n: 5M}             reward 2 ETH
//   649 before 1234   {a: 3M, b: 2M}      rewards {a: 3 ETH, b: 2 ETH}
//   1234 before 649   {b: 5M}             649 is subsumed

use crate::spec::ChainSpec;
use crate::types::{BlockNumber, Schedule, Transition, ETHER, U256};
use tracing::debug;

/// Bomb delay and block reward set by one upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombAdjustment {
    /// Cumulative delay once the upgrade is active
    pub delay: U256,
    /// Block reward once the upgrade is active
    pub reward: U256,
}

impl BombAdjustment {
    /// Share of `self.delay` not already contributed by `earlier`
    pub fn isolated_delay(&self, earlier: &BombAdjustment) -> U256 {
        self.delay.saturating_sub(earlier.delay)
    }
}

/// EIP-649: 3M block delay, 3 ETH reward
pub const EIP649: BombAdjustment = BombAdjustment {
    delay: U256::from_limbs([3_000_000, 0, 0, 0]),
    reward: U256::from_limbs([3 * ETHER, 0, 0, 0]),
};

/// EIP-1234: 5M block delay in total, 2 ETH reward
pub const EIP1234: BombAdjustment = BombAdjustment {
    delay: U256::from_limbs([5_000_000, 0, 0, 0]),
    reward: U256::from_limbs([2 * ETHER, 0, 0, 0]),
};

/// The two interacting bomb upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombUpgrade {
    Eip649,
    Eip1234,
}

impl BombUpgrade {
    pub fn adjustment(self) -> &'static BombAdjustment {
        match self {
            BombUpgrade::Eip649 => &EIP649,
            BombUpgrade::Eip1234 => &EIP1234,
        }
    }

    /// Upgrades whose delay may already be folded into this one's entry
    fn siblings(self) -> &'static [BombAdjustment] {
        match self {
            BombUpgrade::Eip649 => &[],
            BombUpgrade::Eip1234 => &[EIP649],
        }
    }

    fn other(self) -> BombUpgrade {
        match self {
            BombUpgrade::Eip649 => BombUpgrade::Eip1234,
            BombUpgrade::Eip1234 => BombUpgrade::Eip649,
        }
    }
}

/// Recover the activation block of `target` from cumulative schedules
///
/// A block matches when its reward equals the target reward and its delay is
/// either the target delay or the target delay minus a sibling's delay, with
/// that sibling's own entry present at an earlier block. Ambiguous or partial
/// matches are reported as absent.
pub fn infer(
    delays: &Schedule,
    rewards: &Schedule,
    target: &BombAdjustment,
    siblings: &[BombAdjustment],
) -> Transition {
    delays.iter().find_map(|(block, delay)| {
        if rewards.get(block) != Some(target.reward) {
            return None;
        }
        if delay == target.delay {
            return Some(block);
        }
        let combined = siblings.iter().any(|sibling| {
            target.delay.checked_sub(sibling.delay) == Some(delay)
                && scheduled_before(delays, rewards, sibling, block)
        });
        combined.then_some(block)
    })
}

fn scheduled_before(
    delays: &Schedule,
    rewards: &Schedule,
    adjustment: &BombAdjustment,
    block: BlockNumber,
) -> bool {
    delays
        .before(block)
        .any(|(at, delay)| delay == adjustment.delay && rewards.get(at) == Some(adjustment.reward))
}

/// Write both upgrades' entries so the running delay total is exact
pub fn rebalance(
    delays: &mut Schedule,
    rewards: &mut Schedule,
    (earlier, earlier_at): (&BombAdjustment, Transition),
    (later, later_at): (&BombAdjustment, Transition),
) {
    match (earlier_at, later_at) {
        (Some(a), Some(b)) if a == b => {
            delays.insert(a, later.delay);
            rewards.insert(a, later.reward);
        }
        (Some(a), Some(b)) if a < b => {
            delays.insert(a, earlier.delay);
            rewards.insert(a, earlier.reward);
            delays.insert(b, later.isolated_delay(earlier));
            rewards.insert(b, later.reward);
        }
        (Some(a), Some(b)) => {
            delays.insert(b, later.delay);
            rewards.insert(b, later.reward);
            clear_adjustment(delays, rewards, a, earlier, later);
        }
        (Some(a), None) => {
            delays.insert(a, earlier.delay);
            rewards.insert(a, earlier.reward);
        }
        (None, Some(b)) => {
            delays.insert(b, later.delay);
            rewards.insert(b, later.reward);
        }
        (None, None) => {}
    }
}

/// Remove entries at `block` that still carry values written for the pair
fn clear_adjustment(
    delays: &mut Schedule,
    rewards: &mut Schedule,
    block: BlockNumber,
    earlier: &BombAdjustment,
    later: &BombAdjustment,
) {
    let written_delays = [earlier.delay, later.delay, later.isolated_delay(earlier)];
    if delays.get(block).is_some_and(|d| written_delays.contains(&d)) {
        delays.remove(block);
    }
    if rewards
        .get(block)
        .is_some_and(|r| r == earlier.reward || r == later.reward)
    {
        rewards.remove(block);
    }
}

/// Cached transition of one upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Memo {
    #[default]
    Pending,
    Resolved(Transition),
}

/// Explicit cache of inferred bomb transitions owned by the document
///
/// Filled when a document is loaded and by explicit writes. Reads never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BombMemo {
    eip649: Memo,
    eip1234: Memo,
}

impl BombMemo {
    pub fn get(&self, upgrade: BombUpgrade) -> Memo {
        match upgrade {
            BombUpgrade::Eip649 => self.eip649,
            BombUpgrade::Eip1234 => self.eip1234,
        }
    }

    pub fn resolve(&mut self, upgrade: BombUpgrade, transition: Transition) {
        let slot = match upgrade {
            BombUpgrade::Eip649 => &mut self.eip649,
            BombUpgrade::Eip1234 => &mut self.eip1234,
        };
        *slot = Memo::Resolved(transition);
    }

    pub fn reset(&mut self) {
        *self = BombMemo::default();
    }
}

impl ChainSpec {
    /// Inference from the current schedules, ignoring the memo
    pub fn infer_bomb_transition(&self, upgrade: BombUpgrade) -> Transition {
        let ethash = self.ethash()?;
        infer(
            &ethash.difficulty_bomb_delays,
            &ethash.block_reward,
            upgrade.adjustment(),
            upgrade.siblings(),
        )
    }

    /// Memoized transition, inferred when not yet resolved
    pub(crate) fn bomb_transition(&self, upgrade: BombUpgrade) -> Transition {
        self.ethash()?;
        match self.bomb_memo.get(upgrade) {
            Memo::Resolved(transition) => transition,
            Memo::Pending => self.infer_bomb_transition(upgrade),
        }
    }

    /// Resolve both upgrades from the schedules and cache the result
    pub fn resolve_bomb_memo(&mut self) {
        for upgrade in [BombUpgrade::Eip649, BombUpgrade::Eip1234] {
            let transition = self.infer_bomb_transition(upgrade);
            debug!("Inferred {:?} transition: {:?}", upgrade, transition);
            self.bomb_memo.resolve(upgrade, transition);
        }
    }

    /// Configure one bomb upgrade and rewrite both schedules consistently
    pub(crate) fn set_bomb_transition(&mut self, upgrade: BombUpgrade, transition: Transition) {
        let previous = self.bomb_transition(upgrade);
        let other = upgrade.other();
        let other_at = self.bomb_transition(other);

        let Some(ethash) = self.ethash_params_mut(transition.is_some()) else {
            return;
        };

        if let Some(stale) = previous.filter(|block| Some(*block) != transition && Some(*block) != other_at) {
            clear_adjustment(
                &mut ethash.difficulty_bomb_delays,
                &mut ethash.block_reward,
                stale,
                &EIP649,
                &EIP1234,
            );
        }

        let (eip649_at, eip1234_at) = match upgrade {
            BombUpgrade::Eip649 => (transition, other_at),
            BombUpgrade::Eip1234 => (other_at, transition),
        };
        debug!(
            "Rebalancing bomb schedule: EIP-649 at {:?}, EIP-1234 at {:?}",
            eip649_at, eip1234_at
        );
        rebalance(
            &mut ethash.difficulty_bomb_delays,
            &mut ethash.block_reward,
            (&EIP649, eip649_at),
            (&EIP1234, eip1234_at),
        );

        self.bomb_memo.resolve(upgrade, transition);
        self.bomb_memo.resolve(other, other_at);
    }
}
