use soroban_sdk::contracttype;

use crate::{
    error::ContractError,
    storage::{Pool, UserInfo},
};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Fixed point scale of the reward-per-share accumulators
pub const SHARES_SCALE: u128 = 1 << 32;

/// Injected rewards of one kind and what became of them.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardLedger {
    /// Everything ever injected
    pub injected: i128,
    /// Injected while nothing was staked, waiting for the next stakers
    pub held_back: i128,
    /// Paid out to stakers so far
    pub claimed: i128,
    /// Reward per staked unit, scaled by `SHARES_SCALE`
    pub reward_per_share: u128,
}

impl RewardLedger {
    /// Credits `amount` to the current stakers, or holds it back when there
    /// are none.
    pub fn inject(&mut self, amount: i128, total_staked: i128) -> Result<(), ContractError> {
        self.injected = self
            .injected
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        self.held_back = self
            .held_back
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        self.distribute(total_staked)
    }

    /// Hands whatever is held back to the current stakers.
    pub fn distribute(&mut self, total_staked: i128) -> Result<(), ContractError> {
        if total_staked <= 0 || self.held_back <= 0 {
            return Ok(());
        }

        let increase = (self.held_back as u128)
            .checked_mul(SHARES_SCALE)
            .ok_or(ContractError::ContractMathError)?
            / total_staked as u128;
        self.reward_per_share = self
            .reward_per_share
            .checked_add(increase)
            .ok_or(ContractError::ContractMathError)?;
        self.held_back = 0;

        Ok(())
    }

    pub fn record_claim(&mut self, amount: i128) -> Result<(), ContractError> {
        self.claimed = self
            .claimed
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        Ok(())
    }

    /// Injected funds not paid out yet. Base rewards can never be paid from it.
    pub fn reserve(&self) -> i128 {
        self.injected - self.claimed
    }
}

/// Share of the accumulator growth since `paid` owed to `staked`.
pub fn pending_share(
    staked: i128,
    reward_per_share: u128,
    paid: u128,
) -> Result<i128, ContractError> {
    if staked <= 0 || reward_per_share <= paid {
        return Ok(0);
    }

    let owed = (staked as u128)
        .checked_mul(reward_per_share - paid)
        .ok_or(ContractError::ContractMathError)?
        / SHARES_SCALE;
    i128::try_from(owed).map_err(|_| ContractError::ContractMathError)
}

/// Base reward accrued by `user` between its last checkpoint and `now`,
/// limited to the pool's accrual window and to what is left of the reward cap.
pub fn base_reward(pool: &Pool, user: &UserInfo, now: u64) -> Result<i128, ContractError> {
    if user.staked <= 0 || pool.reward_rate_bps <= 0 {
        return Ok(0);
    }

    let window_end = pool
        .duration_days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|length| pool.start_time.checked_add(length))
        .ok_or(ContractError::ContractMathError)?;
    let from = user.last_update.max(pool.start_time);
    let to = now.min(window_end);
    if to <= from {
        return Ok(0);
    }

    let earned = user
        .staked
        .checked_mul(pool.reward_rate_bps as i128)
        .and_then(|scaled| scaled.checked_mul((to - from) as i128))
        .ok_or(ContractError::ContractMathError)?
        / (BPS_DENOMINATOR * SECONDS_PER_YEAR as i128);

    let cap_left = (pool.reward_cap - user.base_earned).max(0);
    Ok(earned.min(cap_left))
}

/// Reward checkpoint: credits the user with its share of both ledgers and, if
/// token rewards are on, with the base reward. Held back rewards must already
/// be distributed.
pub fn accrue(
    pool: &Pool,
    user: &mut UserInfo,
    token_ledger: &RewardLedger,
    native_ledger: &RewardLedger,
    now: u64,
) -> Result<(), ContractError> {
    let token_share = pending_share(
        user.staked,
        token_ledger.reward_per_share,
        user.token_reward_per_share_paid,
    )?;
    let native_share = pending_share(
        user.staked,
        native_ledger.reward_per_share,
        user.native_reward_per_share_paid,
    )?;
    let base = if pool.token_reward_enabled {
        base_reward(pool, user, now)?
    } else {
        0
    };

    user.token_reward = user
        .token_reward
        .checked_add(token_share)
        .ok_or(ContractError::ContractMathError)?;
    user.native_reward = user
        .native_reward
        .checked_add(native_share)
        .ok_or(ContractError::ContractMathError)?;
    user.base_reward = user
        .base_reward
        .checked_add(base)
        .ok_or(ContractError::ContractMathError)?;
    user.base_earned = user
        .base_earned
        .checked_add(base)
        .ok_or(ContractError::ContractMathError)?;
    user.token_reward_per_share_paid = token_ledger.reward_per_share;
    user.native_reward_per_share_paid = native_ledger.reward_per_share;
    user.last_update = now;

    Ok(())
}
