use crate::modifiers::ModifierKind;
use crate::state::{ItemId, ResourceId};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition>;
}

/// Static bonus an item grants per owned unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemModifier {
    /// Targeted resource, or `None` for modifiers that apply to the entity as a whole.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: Option<ResourceId>,
    pub kind: ModifierKind,
    pub amount: i64,
}

impl ItemModifier {
    pub fn new(attribute: Option<ResourceId>, kind: ModifierKind, amount: i64) -> Self {
        Self {
            attribute,
            kind,
            amount,
        }
    }

    /// Permanent capacity bonus for `resource`.
    pub fn add_max(resource: ResourceId, amount: i64) -> Self {
        Self::new(Some(resource), ModifierKind::AddMax, amount)
    }
}

/// Item definition as seen by the ledger.
///
/// `attack_value` marks an item usable in attacks; `defense_value` makes it
/// count toward its holder's mitigation. Consumables are depleted when used in
/// a resolved attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_value: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense_value: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<ItemModifier>,
}

impl ItemDefinition {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            consumable: false,
            attack_value: None,
            defense_value: None,
            modifiers: Vec::new(),
        }
    }

    pub fn as_consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    pub fn with_attack(mut self, value: u32) -> Self {
        self.attack_value = Some(value);
        self
    }

    pub fn with_defense(mut self, value: u32) -> Self {
        self.defense_value = Some(value);
        self
    }

    pub fn with_modifier(mut self, modifier: ItemModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}
