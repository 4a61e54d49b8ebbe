// Ledgers close roughly every 5 seconds
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance storage (config, pool, reward ledgers) is bumped back to a week
// whenever it drops under six days.
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// Per user records and token balances live for a month after the last touch.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;
