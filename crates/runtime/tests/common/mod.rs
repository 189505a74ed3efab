#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ledger_core::{
    EntityId, GuildId, GuildState, ItemDefinition, ItemId, ItemModifier, LedgerConfig,
    ResourceDefinition, ResourceId, Timestamp,
};
use ledger_runtime::repository::Result as RepoResult;
use ledger_runtime::{
    GuildRepository, InMemoryGuildRepo, ItemOracleImpl, LedgerEngine, ManualClock, OracleManager,
    RepositoryError, ResourceRegistryImpl, RuntimeConfig,
};
use tracing_subscriber::EnvFilter;

pub const HOUR: u64 = 60 * 60 * 1000;
pub const START: Timestamp = Timestamp(1_700_000_000_000);

pub const GUILD: GuildId = GuildId(42);

pub const ATTACKS: ResourceId = ResourceId(0);
pub const STARS: ResourceId = ResourceId(1);
pub const RAGE: ResourceId = ResourceId(2);

pub const SWORD: ItemId = ItemId(1);
pub const SHIELD: ItemId = ItemId(2);
pub const BOMB: ItemId = ItemId(3);
pub const RING: ItemId = ItemId(4);
pub const TALISMAN: ItemId = ItemId(5);
pub const TOTEM: ItemId = ItemId(6);

pub const ALICE: EntityId = EntityId(1);
pub const BOB: EntityId = EntityId(2);
pub const CAROL: EntityId = EntityId(3);
pub const DAVE: EntityId = EntityId(4);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn oracles() -> OracleManager {
    let resources = ResourceRegistryImpl::from_definitions([
        ResourceDefinition::per_charge(ATTACKS, "attacks", 3, HOUR),
        ResourceDefinition::per_charge(STARS, "stars", 1, 12 * HOUR),
        ResourceDefinition::full_reset(RAGE, "rage", 2, HOUR),
    ]);
    let items = ItemOracleImpl::from_definitions([
        ItemDefinition::new(SWORD, "sword").with_attack(50),
        ItemDefinition::new(SHIELD, "shield").with_defense(30),
        ItemDefinition::new(BOMB, "bomb").as_consumable().with_attack(120),
        ItemDefinition::new(RING, "ring").with_modifier(ItemModifier::add_max(ATTACKS, 1)),
        ItemDefinition::new(TALISMAN, "talisman").with_modifier(ItemModifier::add_max(STARS, 3)),
        ItemDefinition::new(TOTEM, "totem").with_modifier(ItemModifier::add_max(RAGE, 1)),
    ]);
    OracleManager::new(Arc::new(resources), Arc::new(items))
}

pub fn engine_with(
    ledger: LedgerConfig,
    repository: Arc<dyn GuildRepository>,
) -> (LedgerEngine, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(START));
    let engine = LedgerEngine::builder()
        .config(RuntimeConfig::new(ledger))
        .shared_repository(repository)
        .oracles(oracles())
        .clock(clock.clone())
        .build()
        .expect("engine should build");
    (engine, clock)
}

pub fn engine() -> (LedgerEngine, Arc<ManualClock>) {
    engine_with(LedgerConfig::default(), Arc::new(InMemoryGuildRepo::new()))
}

/// Repository whose saves can be switched to fail.
#[derive(Default)]
pub struct FlakyRepo {
    inner: InMemoryGuildRepo,
    fail_saves: AtomicBool,
}

impl FlakyRepo {
    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl GuildRepository for FlakyRepo {
    async fn load(&self, guild: GuildId) -> RepoResult<Option<GuildState>> {
        self.inner.load(guild).await
    }

    async fn save(&self, guild: GuildId, state: &GuildState) -> RepoResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io(io::Error::other("disk full")));
        }
        self.inner.save(guild, state).await
    }

    async fn delete(&self, guild: GuildId) -> RepoResult<()> {
        self.inner.delete(guild).await
    }

    async fn exists(&self, guild: GuildId) -> RepoResult<bool> {
        self.inner.exists(guild).await
    }
}

/// Repository that yields for a while on every load.
#[derive(Default)]
pub struct SlowRepo {
    inner: InMemoryGuildRepo,
}

#[async_trait]
impl GuildRepository for SlowRepo {
    async fn load(&self, guild: GuildId) -> RepoResult<Option<GuildState>> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.inner.load(guild).await
    }

    async fn save(&self, guild: GuildId, state: &GuildState) -> RepoResult<()> {
        self.inner.save(guild, state).await
    }

    async fn delete(&self, guild: GuildId) -> RepoResult<()> {
        self.inner.delete(guild).await
    }

    async fn exists(&self, guild: GuildId) -> RepoResult<bool> {
        self.inner.exists(guild).await
    }
}
