#![no_std]

pub mod ttl;
pub mod units;
pub mod utils;
