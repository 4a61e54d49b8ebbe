use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};

use super::setup::single_asset_farm;
use crate::{error::ContractError, storage::PENDING_ADMIN};

use lexa::utils::AdminChange;

#[test]
fn propose_admin() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    let result = setup.farm.propose_admin(&new_admin, &None);
    assert_eq!(result, new_admin.clone());

    let pending_admin: AdminChange = env.as_contract(&setup.farm.address, || {
        env.storage().instance().get(&PENDING_ADMIN).unwrap()
    });

    assert_eq!(setup.farm.query_admin(), setup.admin);
    assert_eq!(pending_admin.new_admin, new_admin);
    assert_eq!(pending_admin.time_limit, None);
}

#[test]
fn replace_admin_fails_when_new_admin_is_same_as_current() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);

    assert_eq!(
        setup.farm.try_propose_admin(&setup.admin, &None),
        Err(Ok(ContractError::SameAdmin))
    );
}

#[test]
fn accept_admin_successfully() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    setup.farm.propose_admin(&new_admin, &None);

    let result = setup.farm.accept_admin();
    assert_eq!(result, new_admin.clone());
    assert_eq!(setup.farm.query_admin(), new_admin);

    let pending_admin: Option<AdminChange> = env.as_contract(&setup.farm.address, || {
        env.storage().instance().get(&PENDING_ADMIN)
    });
    assert!(pending_admin.is_none());
}

#[test]
fn new_admin_takes_over_admin_calls() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    setup.farm.propose_admin(&new_admin, &None);
    setup.farm.accept_admin();

    assert_eq!(
        setup.farm.try_add_reward(&setup.admin, &1_000),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn accept_admin_fails_when_no_pending_admin() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);

    assert_eq!(
        setup.farm.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}

#[test]
fn accept_admin_fails_when_time_limit_expired() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    let time_limit = 1000u64;
    setup.farm.propose_admin(&new_admin, &Some(time_limit));
    env.ledger().set_timestamp(time_limit + 100);

    assert_eq!(
        setup.farm.try_accept_admin(),
        Err(Ok(ContractError::AdminChangeExpired))
    );
}

#[test]
fn accept_admin_successfully_on_time_limit() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    let time_limit = 1500u64;
    setup.farm.propose_admin(&new_admin, &Some(time_limit));
    env.ledger().set_timestamp(time_limit);

    let result = setup.farm.accept_admin();
    assert_eq!(result, new_admin);
}

#[test]
fn propose_admin_then_revoke() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);
    let new_admin = Address::generate(&env);

    setup.farm.propose_admin(&new_admin, &None);
    setup.farm.revoke_admin_change();

    let pending_admin: Option<AdminChange> = env.as_contract(&setup.farm.address, || {
        env.storage().instance().get(&PENDING_ADMIN)
    });
    assert!(pending_admin.is_none());
    assert_eq!(
        setup.farm.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}

#[test]
fn revoke_admin_should_fail_when_no_admin_change_in_place() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = single_asset_farm(&env, 50, 100);

    assert_eq!(
        setup.farm.try_revoke_admin_change(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}
