use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    Unauthorized = 800,
    PoolAlreadyExists = 801,
    PoolNotFound = 802,
    InvalidStakeLimits = 803,
    InvalidRewardCap = 804,
    InvalidPoolDuration = 805,
    InvalidRewardCycle = 806,
    InvalidAmount = 807,
    UserStakeLimitExceeded = 808,
    PoolStakeLimitExceeded = 809,
    NothingStaked = 810,
    TokenRewardsDisabled = 811,
    NativeRewardsDisabled = 812,
    NoRewardsAvailable = 813,
    InsufficientRewardLiquidity = 814,
    ContractMathError = 815,
    ConfigNotSet = 816,
    AdminNotSet = 817,
    SameAdmin = 818,
    NoAdminChangeInPlace = 819,
    AdminChangeExpired = 820,
}
