use lexa::{utils::AdminChange, validate_bps, validate_int_parameters};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, token, Address, BytesN, Env,
};

use crate::{
    distribution::{accrue, RewardLedger},
    error::ContractError,
    storage::{
        get_config, get_pool, get_reward_ledger, get_user_info, save_config, save_pool,
        save_reward_ledger, save_user_info,
        utils::{self, get_admin, get_pending_admin, get_total_staked},
        Config, Pool, RewardKind, UserInfo,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Lexa token farm: stake tokens, earn token and native rewards"
);

#[contract]
pub struct TokenFarm;

pub trait FarmTrait {
    // Creates the farm's only pool, admin only
    #[allow(clippy::too_many_arguments)]
    fn add_pool(
        env: Env,
        sender: Address,
        max_pool_stake: i128,
        max_user_stake: i128,
        reward_rate_bps: i64,
        reward_cap: i128,
        duration_days: u64,
        reward_cycle_days: u64,
        token_reward_enabled: bool,
        native_reward_enabled: bool,
    ) -> Result<(), ContractError>;

    fn stake_tokens(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    // Returns the whole stake to the sender
    fn unstake_tokens(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn add_reward(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn add_native_reward(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn claim_native_reward(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn claimable_rewards(env: Env, user: Address) -> Result<i128, ContractError>;

    fn claimable_native_reward(env: Env, user: Address) -> Result<i128, ContractError>;

    fn query_user_info(env: Env, user: Address) -> UserInfo;

    fn query_pool(env: Env) -> Result<Pool, ContractError>;

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;

    fn query_total_staked(env: Env) -> i128;

    fn query_reward_ledger(env: Env, kind: RewardKind) -> RewardLedger;

    // Reward tokens held by the farm that base rewards can be paid from
    fn query_reward_liquidity(env: Env) -> i128;
}

#[contractimpl]
impl FarmTrait for TokenFarm {
    #[allow(clippy::too_many_arguments)]
    fn add_pool(
        env: Env,
        sender: Address,
        max_pool_stake: i128,
        max_user_stake: i128,
        reward_rate_bps: i64,
        reward_cap: i128,
        duration_days: u64,
        reward_cycle_days: u64,
        token_reward_enabled: bool,
        native_reward_enabled: bool,
    ) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_admin(&env, &sender)?;
        utils::extend_instance_ttl(&env);

        if get_pool(&env).is_some() {
            log!(&env, "Farm: Add pool: the pool is already configured");
            return Err(ContractError::PoolAlreadyExists);
        }

        validate_int_parameters!(max_pool_stake, max_user_stake);
        validate_bps!(reward_rate_bps);

        if max_user_stake > max_pool_stake {
            log!(
                &env,
                "Farm: Add pool: user limit {} is above the pool limit {}",
                max_user_stake,
                max_pool_stake
            );
            return Err(ContractError::InvalidStakeLimits);
        }
        if reward_cap < 0 {
            log!(&env, "Farm: Add pool: reward cap can not be negative");
            return Err(ContractError::InvalidRewardCap);
        }
        if duration_days == 0 {
            log!(&env, "Farm: Add pool: pool duration must be at least a day");
            return Err(ContractError::InvalidPoolDuration);
        }
        if reward_cycle_days == 0 {
            log!(&env, "Farm: Add pool: reward cycle must be at least a day");
            return Err(ContractError::InvalidRewardCycle);
        }

        let pool = Pool {
            max_pool_stake,
            max_user_stake,
            reward_rate_bps,
            reward_cap,
            duration_days,
            reward_cycle_days,
            token_reward_enabled,
            native_reward_enabled,
            start_time: env.ledger().timestamp(),
        };
        save_pool(&env, &pool);

        env.events()
            .publish(("add_pool", "max_pool_stake"), max_pool_stake);
        env.events()
            .publish(("add_pool", "max_user_stake"), max_user_stake);
        env.events()
            .publish(("add_pool", "reward_rate_bps"), reward_rate_bps);
        env.events().publish(("add_pool", "reward_cap"), reward_cap);

        Ok(())
    }

    fn stake_tokens(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        utils::extend_instance_ttl(&env);

        if amount <= 0 {
            log!(&env, "Farm: Stake: amount must be positive, got {}", amount);
            return Err(ContractError::InvalidAmount);
        }

        let pool = load_pool(&env)?;
        let config = get_config(&env);
        let mut user_info = get_user_info(&env, &sender);
        let total_staked = get_total_staked(&env);

        let new_stake = user_info
            .staked
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        if new_stake > pool.max_user_stake {
            log!(
                &env,
                "Farm: Stake: {} would exceed the user limit {}",
                new_stake,
                pool.max_user_stake
            );
            return Err(ContractError::UserStakeLimitExceeded);
        }
        let new_total = total_staked
            .checked_add(amount)
            .ok_or(ContractError::ContractMathError)?;
        if new_total > pool.max_pool_stake {
            log!(
                &env,
                "Farm: Stake: {} would exceed the pool limit {}",
                new_total,
                pool.max_pool_stake
            );
            return Err(ContractError::PoolStakeLimitExceeded);
        }

        checkpoint(&env, &pool, &mut user_info)?;

        token::Client::new(&env, &config.staking_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        user_info.staked = new_stake;
        save_user_info(&env, &sender, &user_info);
        utils::save_total_staked(&env, new_total);

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn unstake_tokens(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();
        utils::extend_instance_ttl(&env);

        let pool = load_pool(&env)?;
        let config = get_config(&env);
        let mut user_info = get_user_info(&env, &sender);

        let amount = user_info.staked;
        if amount == 0 {
            log!(&env, "Farm: Unstake: nothing staked");
            return Err(ContractError::NothingStaked);
        }

        checkpoint(&env, &pool, &mut user_info)?;

        token::Client::new(&env, &config.staking_token).transfer(
            &env.current_contract_address(),
            &sender,
            &amount,
        );

        let new_total = get_total_staked(&env)
            .checked_sub(amount)
            .ok_or(ContractError::ContractMathError)?;
        user_info.staked = 0;
        save_user_info(&env, &sender, &user_info);
        utils::save_total_staked(&env, new_total);

        env.events().publish(("unstake", "user"), &sender);
        env.events().publish(("unstake", "amount"), amount);

        Ok(amount)
    }

    fn add_reward(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_admin(&env, &sender)?;
        utils::extend_instance_ttl(&env);

        let pool = load_pool(&env)?;
        if !pool.token_reward_enabled {
            log!(&env, "Farm: Add reward: token rewards are disabled");
            return Err(ContractError::TokenRewardsDisabled);
        }

        let config = get_config(&env);
        inject_reward(
            &env,
            &sender,
            &config.reward_token,
            RewardKind::Token,
            amount,
        )?;

        env.events().publish(("add_reward", "token"), &config.reward_token);
        env.events().publish(("add_reward", "amount"), amount);

        Ok(())
    }

    fn add_native_reward(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_admin(&env, &sender)?;
        utils::extend_instance_ttl(&env);

        let pool = load_pool(&env)?;
        if !pool.native_reward_enabled {
            log!(&env, "Farm: Add native reward: native rewards are disabled");
            return Err(ContractError::NativeRewardsDisabled);
        }

        let config = get_config(&env);
        inject_reward(
            &env,
            &sender,
            &config.native_token,
            RewardKind::Native,
            amount,
        )?;

        env.events()
            .publish(("add_native_reward", "token"), &config.native_token);
        env.events().publish(("add_native_reward", "amount"), amount);

        Ok(())
    }

    fn claim_rewards(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();
        utils::extend_instance_ttl(&env);

        let pool = load_pool(&env)?;
        let config = get_config(&env);
        let mut user_info = get_user_info(&env, &sender);
        let (mut token_ledger, native_ledger) = checkpoint(&env, &pool, &mut user_info)?;

        let share = user_info.token_reward;
        let base = payable_base_reward(&env, &config, &token_ledger, &native_ledger, &user_info);
        let reward = share
            .checked_add(base)
            .ok_or(ContractError::ContractMathError)?;
        pay_out(&env, &config, &config.reward_token, &sender, reward)?;

        user_info.token_reward = 0;
        user_info.base_reward = user_info
            .base_reward
            .checked_sub(base)
            .ok_or(ContractError::ContractMathError)?;
        user_info.token_claimed = user_info
            .token_claimed
            .checked_add(reward)
            .ok_or(ContractError::ContractMathError)?;
        save_user_info(&env, &sender, &user_info);

        token_ledger.record_claim(share)?;
        save_reward_ledger(&env, RewardKind::Token, &token_ledger);

        env.events().publish(("claim_rewards", "user"), &sender);
        env.events().publish(("claim_rewards", "amount"), reward);

        Ok(reward)
    }

    fn claim_native_reward(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();
        utils::extend_instance_ttl(&env);

        let pool = load_pool(&env)?;
        let config = get_config(&env);
        let mut user_info = get_user_info(&env, &sender);
        let (_, mut native_ledger) = checkpoint(&env, &pool, &mut user_info)?;

        let reward = user_info.native_reward;
        pay_out(&env, &config, &config.native_token, &sender, reward)?;

        user_info.native_reward = 0;
        user_info.native_claimed = user_info
            .native_claimed
            .checked_add(reward)
            .ok_or(ContractError::ContractMathError)?;
        save_user_info(&env, &sender, &user_info);

        native_ledger.record_claim(reward)?;
        save_reward_ledger(&env, RewardKind::Native, &native_ledger);

        env.events().publish(("claim_native_reward", "user"), &sender);
        env.events()
            .publish(("claim_native_reward", "amount"), reward);

        Ok(reward)
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Farm: Propose admin: new admin is the current admin");
            return Err(ContractError::SameAdmin);
        }

        utils::save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("Farm: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Farm: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env);
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Farm: Revoke admin change: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }

        utils::remove_pending_admin(&env);

        env.events()
            .publish(("Farm: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let Some(admin_change) = get_pending_admin(&env) else {
            log!(&env, "Farm: Accept admin: no admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        };

        if let Some(time_limit) = admin_change.time_limit {
            if env.ledger().timestamp() > time_limit {
                log!(&env, "Farm: Accept admin: admin change expired");
                return Err(ContractError::AdminChangeExpired);
            }
        }

        admin_change.new_admin.require_auth();

        utils::remove_pending_admin(&env);
        utils::save_admin(&env, &admin_change.new_admin);

        env.events().publish(
            ("Farm: ", "Accepted new admin: "),
            &admin_change.new_admin,
        );

        Ok(admin_change.new_admin)
    }

    fn claimable_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        utils::extend_instance_ttl(&env);
        let config = get_config(&env);
        let (user_info, token_ledger, native_ledger) = projected_user_info(&env, &user)?;
        let base = payable_base_reward(&env, &config, &token_ledger, &native_ledger, &user_info);

        user_info
            .token_reward
            .checked_add(base)
            .ok_or(ContractError::ContractMathError)
    }

    fn claimable_native_reward(env: Env, user: Address) -> Result<i128, ContractError> {
        utils::extend_instance_ttl(&env);
        let (user_info, _, _) = projected_user_info(&env, &user)?;
        Ok(user_info.native_reward)
    }

    fn query_user_info(env: Env, user: Address) -> UserInfo {
        utils::extend_instance_ttl(&env);
        get_user_info(&env, &user)
    }

    fn query_pool(env: Env) -> Result<Pool, ContractError> {
        utils::extend_instance_ttl(&env);
        load_pool(&env)
    }

    fn query_config(env: Env) -> Config {
        utils::extend_instance_ttl(&env);
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        utils::extend_instance_ttl(&env);
        get_admin(&env)
    }

    fn query_total_staked(env: Env) -> i128 {
        utils::extend_instance_ttl(&env);
        get_total_staked(&env)
    }

    fn query_reward_ledger(env: Env, kind: RewardKind) -> RewardLedger {
        utils::extend_instance_ttl(&env);
        get_reward_ledger(&env, kind)
    }

    fn query_reward_liquidity(env: Env) -> i128 {
        utils::extend_instance_ttl(&env);
        let config = get_config(&env);
        base_reward_liquidity(
            &env,
            &config,
            &get_reward_ledger(&env, RewardKind::Token),
            &get_reward_ledger(&env, RewardKind::Native),
        )
    }
}

#[contractimpl]
impl TokenFarm {
    pub fn __constructor(
        env: Env,
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        native_token: Address,
    ) {
        utils::save_admin(&env, &admin);
        save_config(
            &env,
            &Config {
                staking_token: staking_token.clone(),
                reward_token,
                native_token,
            },
        );
        utils::init_total_staked(&env);

        env.events()
            .publish(("initialize", "Lexa token farm"), &staking_token);
    }

    #[allow(dead_code)]
    pub fn update(env: Env, new_wasm_hash: BytesN<32>) {
        let admin = get_admin(&env);
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }
}

fn ensure_admin(env: &Env, sender: &Address) -> Result<(), ContractError> {
    if *sender != get_admin(env) {
        log!(env, "Farm: {} is not the admin", sender);
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn load_pool(env: &Env) -> Result<Pool, ContractError> {
    get_pool(env).ok_or_else(|| {
        log!(env, "Farm: Pool not found");
        ContractError::PoolNotFound
    })
}

/// Hands rewards held back while nobody was staked to the current stakers
/// and stores both ledgers.
fn settle_ledgers(env: &Env) -> Result<(RewardLedger, RewardLedger), ContractError> {
    let total_staked = get_total_staked(env);

    let mut token_ledger = get_reward_ledger(env, RewardKind::Token);
    token_ledger.distribute(total_staked)?;
    save_reward_ledger(env, RewardKind::Token, &token_ledger);

    let mut native_ledger = get_reward_ledger(env, RewardKind::Native);
    native_ledger.distribute(total_staked)?;
    save_reward_ledger(env, RewardKind::Native, &native_ledger);

    Ok((token_ledger, native_ledger))
}

fn checkpoint(
    env: &Env,
    pool: &Pool,
    user_info: &mut UserInfo,
) -> Result<(RewardLedger, RewardLedger), ContractError> {
    let (token_ledger, native_ledger) = settle_ledgers(env)?;
    accrue(
        pool,
        user_info,
        &token_ledger,
        &native_ledger,
        env.ledger().timestamp(),
    )?;
    Ok((token_ledger, native_ledger))
}

/// What `user` would hold after a checkpoint right now, without storing anything.
fn projected_user_info(
    env: &Env,
    user: &Address,
) -> Result<(UserInfo, RewardLedger, RewardLedger), ContractError> {
    let mut user_info = get_user_info(env, user);
    let total_staked = get_total_staked(env);
    let mut token_ledger = get_reward_ledger(env, RewardKind::Token);
    token_ledger.distribute(total_staked)?;
    let mut native_ledger = get_reward_ledger(env, RewardKind::Native);
    native_ledger.distribute(total_staked)?;

    if let Some(pool) = get_pool(env) {
        accrue(
            &pool,
            &mut user_info,
            &token_ledger,
            &native_ledger,
            env.ledger().timestamp(),
        )?;
    }
    Ok((user_info, token_ledger, native_ledger))
}

fn inject_reward(
    env: &Env,
    sender: &Address,
    asset: &Address,
    kind: RewardKind,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "Farm: Add reward: amount must be positive, got {}", amount);
        return Err(ContractError::InvalidAmount);
    }

    token::Client::new(env, asset).transfer(sender, &env.current_contract_address(), &amount);

    let (token_ledger, native_ledger) = settle_ledgers(env)?;
    let mut ledger = match kind {
        RewardKind::Token => token_ledger,
        RewardKind::Native => native_ledger,
    };
    ledger.inject(amount, get_total_staked(env))?;
    save_reward_ledger(env, kind, &ledger);

    Ok(())
}

/// Balance of `asset` held by the farm that is not staked principal.
fn reward_liquidity(env: &Env, config: &Config, asset: &Address) -> i128 {
    let balance = token::Client::new(env, asset).balance(&env.current_contract_address());
    let principal = if *asset == config.staking_token {
        get_total_staked(env)
    } else {
        0
    };
    (balance - principal).max(0)
}

/// Reward tokens left once staked principal and every unclaimed injection are
/// set aside. Base rewards are paid from this alone.
fn base_reward_liquidity(
    env: &Env,
    config: &Config,
    token_ledger: &RewardLedger,
    native_ledger: &RewardLedger,
) -> i128 {
    let mut reserved = token_ledger.reserve();
    if config.reward_token == config.native_token {
        reserved = reserved.saturating_add(native_ledger.reserve());
    }
    reward_liquidity(env, config, &config.reward_token)
        .saturating_sub(reserved)
        .max(0)
}

/// Part of the user's base reward the farm can pay right now.
fn payable_base_reward(
    env: &Env,
    config: &Config,
    token_ledger: &RewardLedger,
    native_ledger: &RewardLedger,
    user_info: &UserInfo,
) -> i128 {
    if user_info.base_reward <= 0 {
        return 0;
    }
    user_info
        .base_reward
        .min(base_reward_liquidity(env, config, token_ledger, native_ledger))
}

fn pay_out(
    env: &Env,
    config: &Config,
    asset: &Address,
    recipient: &Address,
    reward: i128,
) -> Result<(), ContractError> {
    if reward == 0 {
        log!(env, "Farm: Claim: No rewards available");
        return Err(ContractError::NoRewardsAvailable);
    }

    let available = reward_liquidity(env, config, asset);
    if reward > available {
        log!(
            env,
            "Farm: Claim: reward {} exceeds the available liquidity {}",
            reward,
            available
        );
        return Err(ContractError::InsufficientRewardLiquidity);
    }

    token::Client::new(env, asset).transfer(&env.current_contract_address(), recipient, &reward);
    Ok(())
}
