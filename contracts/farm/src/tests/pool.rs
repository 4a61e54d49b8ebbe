use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};

use super::setup::{
    add_pool, deploy_farm_contract, deploy_token_contract, MAX_POOL_STAKE, MAX_USER_STAKE,
    POOL_DURATION_DAYS, REWARD_CYCLE_DAYS,
};
use crate::{
    error::ContractError,
    storage::{Config, Pool},
};

#[test]
fn initialize_farm_contract() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let staking_token = deploy_token_contract(&env, &admin);
    let reward_token = deploy_token_contract(&env, &admin);
    let native_token = deploy_token_contract(&env, &admin);

    let farm = deploy_farm_contract(
        &env,
        &admin,
        &staking_token.address,
        &reward_token.address,
        &native_token.address,
    );

    assert_eq!(
        farm.query_config(),
        Config {
            staking_token: staking_token.address,
            reward_token: reward_token.address,
            native_token: native_token.address,
        }
    );
    assert_eq!(farm.query_admin(), admin);
    assert_eq!(farm.query_total_staked(), 0);
    assert_eq!(farm.try_query_pool(), Err(Ok(ContractError::PoolNotFound)));
}

#[test]
fn add_pool_stores_configuration() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_000);

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    add_pool(&farm, &admin, 50, 100);

    assert_eq!(
        farm.query_pool(),
        Pool {
            max_pool_stake: MAX_POOL_STAKE,
            max_user_stake: MAX_USER_STAKE,
            reward_rate_bps: 50,
            reward_cap: 100,
            duration_days: POOL_DURATION_DAYS,
            reward_cycle_days: REWARD_CYCLE_DAYS,
            token_reward_enabled: true,
            native_reward_enabled: true,
            start_time: 1_000,
        }
    );
}

#[test]
fn add_pool_twice_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    add_pool(&farm, &admin, 50, 100);

    assert_eq!(
        farm.try_add_pool(
            &admin,
            &MAX_POOL_STAKE,
            &MAX_USER_STAKE,
            &50,
            &100,
            &POOL_DURATION_DAYS,
            &REWARD_CYCLE_DAYS,
            &true,
            &true,
        ),
        Err(Ok(ContractError::PoolAlreadyExists))
    );
}

#[test]
fn add_pool_by_non_admin_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let stranger = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    assert_eq!(
        farm.try_add_pool(
            &stranger,
            &MAX_POOL_STAKE,
            &MAX_USER_STAKE,
            &50,
            &100,
            &POOL_DURATION_DAYS,
            &REWARD_CYCLE_DAYS,
            &true,
            &true,
        ),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn add_pool_validates_parameters() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    // user limit above the pool limit
    assert_eq!(
        farm.try_add_pool(&admin, &1_000, &1_001, &50, &100, &100, &10, &true, &true),
        Err(Ok(ContractError::InvalidStakeLimits))
    );
    assert_eq!(
        farm.try_add_pool(&admin, &1_000, &1_000, &50, &-1, &100, &10, &true, &true),
        Err(Ok(ContractError::InvalidRewardCap))
    );
    assert_eq!(
        farm.try_add_pool(&admin, &1_000, &1_000, &50, &100, &0, &10, &true, &true),
        Err(Ok(ContractError::InvalidPoolDuration))
    );
    assert_eq!(
        farm.try_add_pool(&admin, &1_000, &1_000, &50, &100, &100, &0, &true, &true),
        Err(Ok(ContractError::InvalidRewardCycle))
    );

    // nothing got stored along the way
    assert_eq!(farm.try_query_pool(), Err(Ok(ContractError::PoolNotFound)));
}

#[test]
#[should_panic(expected = "value cannot be less than or equal zero")]
fn add_pool_with_zero_stake_limit() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    farm.add_pool(&admin, &0, &0, &50, &100, &100, &10, &true, &true);
}

#[test]
#[should_panic(expected = "The value 10001 is out of range. Must be between 0 and 10000 bps.")]
fn add_pool_with_too_high_rate() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let token = deploy_token_contract(&env, &admin);
    let native = deploy_token_contract(&env, &admin);
    let farm = deploy_farm_contract(&env, &admin, &token.address, &token.address, &native.address);

    farm.add_pool(&admin, &1_000, &1_000, &10_001, &100, &100, &10, &true, &true);
}
