use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    NegativeAmount = 700,
    InsufficientBalance = 701,
    InsufficientAllowance = 702,
    ExpirationLedgerInPast = 703,
    DecimalTooLarge = 704,
    AdminNotSet = 705,
}
