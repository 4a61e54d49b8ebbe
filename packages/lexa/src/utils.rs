use soroban_sdk::{contracttype, Address};

pub const MIN_BPS: i64 = 0;
pub const MAX_BPS: i64 = 10_000;

// Validate if int value is bigger then 0
#[macro_export]
macro_rules! validate_int_parameters {
    ($($arg:expr),*) => {
        {
            $(
                let value: Option<i128> = Into::<Option<_>>::into($arg);
                if let Some(val) = value {
                    if val <= 0 {
                        panic!("value cannot be less than or equal zero")
                    }
                }
            )*
        }
    };
}

// Validate that every value is a basis point amount between 0% and 100%
#[macro_export]
macro_rules! validate_bps {
    ($($value:expr),+) => {
        {
            $(
                let bps: i64 = $value;
                if !($crate::utils::MIN_BPS..=$crate::utils::MAX_BPS).contains(&bps) {
                    panic!(
                        "The value {} is out of range. Must be between {} and {} bps.",
                        bps,
                        $crate::utils::MIN_BPS,
                        $crate::utils::MAX_BPS
                    );
                }
            )+
        }
    };
}

/// Pending two step admin rotation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    /// Ledger timestamp after which the proposal can no longer be accepted
    pub time_limit: Option<u64>,
}
