use soroban_sdk::{vec, Address, BytesN, Env, IntoVal, String, Val, Vec};

/// Everything a farm instance is bound to at construction. The staking and
/// the reward token may be the same asset.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmDeployment {
    pub admin: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub native_token: Address,
}

impl FarmDeployment {
    pub fn new(
        admin: Address,
        staking_token: Address,
        reward_token: Address,
        native_token: Address,
    ) -> Self {
        Self {
            admin,
            staking_token,
            reward_token,
            native_token,
        }
    }

    /// Farm that pays token rewards in the staked token itself.
    pub fn single_asset(admin: Address, token: Address, native_token: Address) -> Self {
        Self::new(admin, token.clone(), token, native_token)
    }

    /// Deployment from hardcoded strkey addresses (`G...` or `C...`).
    pub fn from_strkeys(
        env: &Env,
        admin: &str,
        staking_token: &str,
        reward_token: &str,
        native_token: &str,
    ) -> Self {
        let parse = |strkey: &str| Address::from_string(&String::from_str(env, strkey));
        Self::new(
            parse(admin),
            parse(staking_token),
            parse(reward_token),
            parse(native_token),
        )
    }

    /// Arguments of the farm's constructor, in order.
    pub fn constructor_args(&self, env: &Env) -> Vec<Val> {
        vec![
            env,
            self.admin.into_val(env),
            self.staking_token.into_val(env),
            self.reward_token.into_val(env),
            self.native_token.into_val(env),
        ]
    }

    /// Instantiates the farm from already uploaded wasm, deployed by the
    /// current contract under `salt`.
    pub fn deploy(&self, env: &Env, wasm_hash: BytesN<32>, salt: BytesN<32>) -> Address {
        env.deployer()
            .with_current_contract(salt)
            .deploy_v2(wasm_hash, self.constructor_args(env))
    }
}
