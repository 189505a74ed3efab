use crate::state::ResourceId;

/// How a defender's balance reacts when net damage exceeds it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BalancePolicy {
    /// `balance_after = max(0, balance - net_damage)`.
    #[default]
    FloorAtZero,
    /// Balance may go negative and is tracked as debt.
    AllowDebt,
}

impl BalancePolicy {
    /// Applies `net_damage` to `balance` under this policy.
    pub fn apply(self, balance: i64, net_damage: u64) -> i64 {
        let damage = i64::try_from(net_damage).unwrap_or(i64::MAX);
        let after = balance.saturating_sub(damage);
        match self {
            Self::FloorAtZero => after.max(0),
            Self::AllowDebt => after,
        }
    }
}

/// Ledger configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LedgerConfig {
    /// Resource whose charges are spent when an attack is scheduled.
    pub attack_resource: ResourceId,
    pub balance_policy: BalancePolicy,
    /// Balance granted to entities initialized without an explicit amount.
    pub starting_balance: i64,
}

impl LedgerConfig {
    // ===== compile-time constants =====
    /// Upper bound on `quantity` for a single scheduled attack.
    pub const MAX_QUANTITY_PER_ATTACK: u32 = 1_000;
    /// Upper bound on a resource's capacity (`max + bonus`), whatever the
    /// definition and inventory say.
    pub const MAX_CAPACITY: u32 = 10_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_RESOURCE: ResourceId = ResourceId(0);
    pub const DEFAULT_STARTING_BALANCE: i64 = 0;

    pub fn new() -> Self {
        Self {
            attack_resource: Self::DEFAULT_ATTACK_RESOURCE,
            balance_policy: BalancePolicy::default(),
            starting_balance: Self::DEFAULT_STARTING_BALANCE,
        }
    }

    pub fn with_attack_resource(mut self, resource: ResourceId) -> Self {
        self.attack_resource = resource;
        self
    }

    pub fn with_balance_policy(mut self, policy: BalancePolicy) -> Self {
        self.balance_policy = policy;
        self
    }

    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new()
    }
}
