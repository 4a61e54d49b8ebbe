#![no_std]
mod contract;
mod deployment;
mod distribution;
mod error;
mod storage;

pub use contract::{TokenFarm, TokenFarmClient};
pub use deployment::FarmDeployment;
pub use distribution::RewardLedger;
pub use error::ContractError;
pub use storage::{Config, Pool, RewardKind, UserInfo};
