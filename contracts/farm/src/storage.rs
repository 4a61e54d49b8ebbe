use lexa::ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL};
use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use crate::{distribution::RewardLedger, error::ContractError};

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token users stake in the farm
    pub staking_token: Address,
    /// Token paid out as token reward; may be the staking token itself
    pub reward_token: Address,
    /// Token contract of the network's native currency
    pub native_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Upper bound of all stakes together
    pub max_pool_stake: i128,
    /// Upper bound of a single user's stake
    pub max_user_stake: i128,
    /// Annual base reward rate, paid in the reward token
    pub reward_rate_bps: i64,
    /// Maximum base reward a single staker can earn
    pub reward_cap: i128,
    /// Number of days after creation during which base reward accrues
    pub duration_days: u64,
    /// Cadence in days at which the operator plans to inject rewards; injections
    /// themselves are credited to the stakers at once
    pub reward_cycle_days: u64,
    pub token_reward_enabled: bool,
    pub native_reward_enabled: bool,
    /// Ledger timestamp of the pool creation
    pub start_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    /// Currently staked amount
    pub staked: i128,
    /// Share of injected token rewards, not yet claimed
    pub token_reward: i128,
    /// Share of injected native rewards, not yet claimed
    pub native_reward: i128,
    /// Base reward accrued and not yet paid out
    pub base_reward: i128,
    /// Base reward earned over the whole lifetime, bounded by the pool's reward cap
    pub base_earned: i128,
    /// Value of the token reward accumulator at the last checkpoint
    pub token_reward_per_share_paid: u128,
    /// Value of the native reward accumulator at the last checkpoint
    pub native_reward_per_share_paid: u128,
    /// Timestamp of the last reward checkpoint
    pub last_update: u64,
    pub token_claimed: i128,
    pub native_claimed: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardKind {
    Token,
    Native,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Pool,
    TotalStaked,
    Ledger(RewardKind),
    User(Address),
}

pub fn get_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Farm: Config not set");
            panic_with_error!(env, ContractError::ConfigNotSet)
        })
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_pool(env: &Env) -> Option<Pool> {
    env.storage().instance().get(&DataKey::Pool)
}

pub fn save_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&DataKey::Pool, pool);
}

pub fn get_reward_ledger(env: &Env, kind: RewardKind) -> RewardLedger {
    env.storage()
        .instance()
        .get(&DataKey::Ledger(kind))
        .unwrap_or_default()
}

pub fn save_reward_ledger(env: &Env, kind: RewardKind, ledger: &RewardLedger) {
    env.storage().instance().set(&DataKey::Ledger(kind), ledger);
}

pub fn get_user_info(env: &Env, user: &Address) -> UserInfo {
    let key = DataKey::User(user.clone());
    let user_info = env
        .storage()
        .persistent()
        .get::<_, UserInfo>(&key)
        .unwrap_or_default();
    env.storage().persistent().has(&key).then(|| {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    });

    user_info
}

pub fn save_user_info(env: &Env, user: &Address, user_info: &UserInfo) {
    let key = DataKey::User(user.clone());
    env.storage().persistent().set(&key, user_info);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub mod utils {
    use super::*;

    use lexa::{
        ttl::{INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL},
        utils::AdminChange,
    };

    pub fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn save_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&ADMIN, admin);
    }

    pub fn get_admin(env: &Env) -> Address {
        env.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(env, "Farm: Admin not set");
            panic_with_error!(env, ContractError::AdminNotSet)
        })
    }

    pub fn save_pending_admin(env: &Env, admin_change: &AdminChange) {
        env.storage().instance().set(&PENDING_ADMIN, admin_change);
    }

    pub fn get_pending_admin(env: &Env) -> Option<AdminChange> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn remove_pending_admin(env: &Env) {
        env.storage().instance().remove(&PENDING_ADMIN);
    }

    pub fn init_total_staked(env: &Env) {
        env.storage().instance().set(&DataKey::TotalStaked, &0i128);
    }

    pub fn get_total_staked(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0)
    }

    pub fn save_total_staked(env: &Env, total_staked: i128) {
        env.storage()
            .instance()
            .set(&DataKey::TotalStaked, &total_staked);
    }
}
