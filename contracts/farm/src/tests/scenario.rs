use lexa::units::{from_wei, to_wei};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env, String,
};

use super::setup::{deploy_car_rent_token, deploy_farm_contract, deploy_token_contract, mint, DAY};
use crate::{contract::TokenFarmClient, error::ContractError};

fn wei(value: &str) -> i128 {
    to_wei(value).unwrap()
}

/// Claims the token reward and checks that exactly the claimable amount moved
/// from the farm to the user.
fn check_claim(farm: &TokenFarmClient, token: &token::Client, user: &Address) {
    let user_before = token.balance(user);
    let farm_before = token.balance(&farm.address);
    let claimable = farm.claimable_rewards(user);
    if claimable == 0 {
        assert_eq!(
            farm.try_claim_rewards(user),
            Err(Ok(ContractError::NoRewardsAvailable))
        );
        return;
    }

    assert_eq!(farm.claim_rewards(user), claimable);
    assert_eq!(token.balance(user), user_before + claimable);
    assert_eq!(token.balance(&farm.address), farm_before - claimable);
    assert_eq!(farm.claimable_rewards(user), 0);
}

/// Same for the native reward. Fees are not charged to balances in the test
/// environment, so the user gets exactly the claimable amount.
fn check_native_claim(farm: &TokenFarmClient, native: &token::Client, user: &Address) {
    let user_before = native.balance(user);
    let claimable = farm.claimable_native_reward(user);
    if claimable == 0 {
        assert_eq!(
            farm.try_claim_native_reward(user),
            Err(Ok(ContractError::NoRewardsAvailable))
        );
        return;
    }

    assert_eq!(farm.claim_native_reward(user), claimable);
    assert_eq!(native.balance(user), user_before + claimable);
    assert_eq!(farm.claimable_native_reward(user), 0);
}

#[test]
fn stake_earn_claim_and_leave() {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);
    let user3 = Address::generate(&env);

    let car_rent = deploy_car_rent_token(&env, &owner);
    let token = token::Client::new(&env, &car_rent.address);
    let native = deploy_token_contract(&env, &owner);
    let farm = deploy_farm_contract(&env, &owner, &token.address, &token.address, &native.address);

    farm.add_pool(
        &owner,
        &wei("100000000"),
        &wei("1000000"),
        &50,
        &wei("100"),
        &100,
        &10,
        &true,
        &true,
    );

    car_rent.mint(&owner, &wei("1000000"));
    for user in [&user1, &user2, &user3] {
        token.transfer(&owner, user, &wei("1000"));
    }
    // reward liquidity for the base rate
    token.transfer(&owner, &farm.address, &wei("10000"));

    for user in [&user1, &user2, &user3] {
        farm.stake_tokens(user, &wei("100"));
    }
    assert_eq!(farm.query_total_staked(), wei("300"));

    env.ledger().set_timestamp(10 * DAY);
    farm.add_reward(&owner, &wei("100"));

    // a third of the injection plus ten days of base rate
    let reward1 = farm.claimable_rewards(&user1);
    let reward2 = farm.claimable_rewards(&user2);
    let reward3 = farm.claimable_rewards(&user3);
    assert!(reward1 > wei("33"));
    assert_eq!(reward1, reward2);
    assert_eq!(reward1, reward3);
    assert_eq!(from_wei(&env, reward1), String::from_str(&env, "33.347031955709298179"));

    check_claim(&farm, &token, &user1);
    check_claim(&farm, &token, &user2);

    farm.stake_tokens(&user1, &wei("100"));
    farm.stake_tokens(&user2, &wei("100"));

    mint(&env, &native.address, &owner, wei("9"));
    farm.add_native_reward(&owner, &wei("9"));

    env.ledger().set_timestamp(20 * DAY);

    let native1 = farm.claimable_native_reward(&user1);
    let native2 = farm.claimable_native_reward(&user2);
    let native3 = farm.claimable_native_reward(&user3);
    assert!(native3 > 0);
    assert_eq!(native1, native2);
    // double the stake, double the reward, up to rounding
    assert!((native1 - 2 * native3).abs() <= 1);
    assert!(native1 + native2 + native3 <= wei("9"));

    for user in [&user1, &user2, &user3] {
        check_native_claim(&farm, &native, user);
        check_claim(&farm, &token, user);
    }

    assert_eq!(farm.unstake_tokens(&user1), wei("200"));
    assert_eq!(farm.unstake_tokens(&user2), wei("200"));
    assert_eq!(farm.unstake_tokens(&user3), wei("100"));
    assert_eq!(farm.query_total_staked(), 0);

    for user in [&user1, &user2, &user3] {
        assert!(token.balance(user) > wei("1000"));
        assert_eq!(farm.query_user_info(user).staked, 0);
    }
}
