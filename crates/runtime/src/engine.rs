//! High-level ledger facade.
//!
//! [`LedgerEngine`] owns the repository, oracles and clock and exposes one
//! async method per ledger operation. Every mutating method follows the same
//! shape: read the clock once, load the guild, compute on the loaded copy with
//! the pure functions of `ledger-core`, then save. Errors before the save
//! leave the stored state untouched, and a failed save commits nothing.

use std::sync::Arc;

use ledger_content::ContentBundle;
use ledger_core::{
    AttackRecord, AttackRequest, CombatResult, EntityId, GuildId, GuildState, InventoryStore,
    ItemId, LedgerConfig, ModifierKind, ResourceDefinition, ResourceId, ResourceLedger,
    ResourceRegistry, ResourceState, RoundId, RoundOutcome, RoundScope, StateError, Timestamp,
    next_ready_at, permanent_boost, regenerate, resize, resolve_round, schedule_attack,
    sum_modifiers,
};

use crate::api::{Clock, Result, RuntimeError, SystemClock};
use crate::guard::RoundGuard;
use crate::oracle::OracleManager;
use crate::repository::GuildRepository;

/// Runtime configuration shared by every engine operation.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub ledger: LedgerConfig,
    /// Scope used by [`LedgerEngine::process_round`].
    pub default_scope: RoundScope,
}

impl RuntimeConfig {
    pub fn new(ledger: LedgerConfig) -> Self {
        Self {
            ledger,
            default_scope: RoundScope::All,
        }
    }

    pub fn with_default_scope(mut self, scope: RoundScope) -> Self {
        self.default_scope = scope;
        self
    }
}

/// Cloneable facade over one guild repository.
///
/// Clones share the repository, oracles, clock and round guard.
#[derive(Clone)]
pub struct LedgerEngine {
    config: RuntimeConfig,
    repository: Arc<dyn GuildRepository>,
    oracles: OracleManager,
    clock: Arc<dyn Clock>,
    guard: RoundGuard,
}

impl LedgerEngine {
    pub fn builder() -> LedgerEngineBuilder {
        LedgerEngineBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    /// Returns a copy of the stored state, or an empty state for unknown guilds.
    pub async fn snapshot(&self, guild: GuildId) -> Result<GuildState> {
        self.load(guild).await
    }

    /// Creates the entity with the configured starting balance.
    ///
    /// See [`initialize_entity_with_balance`](Self::initialize_entity_with_balance).
    pub async fn initialize_entity(&self, guild: GuildId, entity: EntityId) -> Result<bool> {
        let balance = self.config.ledger.starting_balance;
        self.initialize_entity_with_balance(guild, entity, balance)
            .await
    }

    /// Creates the entity's ledger entry with a full state for every
    /// registered resource, sized by its current permanent boosts.
    ///
    /// Returns `false` and changes nothing if the entity already exists.
    pub async fn initialize_entity_with_balance(
        &self,
        guild: GuildId,
        entity: EntityId,
        balance: i64,
    ) -> Result<bool> {
        let mut state = self.load(guild).await?;
        if state.contains(entity) {
            return Ok(false);
        }

        let resources: Vec<_> = self
            .oracles
            .resources()
            .all_definitions()
            .into_iter()
            .map(|definition| {
                let boost =
                    permanent_boost(&state, self.oracles.items(), entity, definition.id);
                (
                    definition.id,
                    ResourceState::for_definition(&definition, boost),
                )
            })
            .collect();
        state.initialize_entity(entity, balance, resources);

        self.commit(guild, &state).await?;
        tracing::debug!("Initialized {} in {} with balance {}", entity, guild, balance);
        Ok(true)
    }

    /// Fresh view of one resource at the current time.
    ///
    /// Regeneration is applied to the returned value only; nothing is saved.
    pub async fn resource_state(
        &self,
        guild: GuildId,
        entity: EntityId,
        resource: ResourceId,
    ) -> Result<ResourceState> {
        let definition = self.definition(resource)?;
        let now = self.clock.now();
        let state = self.load(guild).await?;
        let stored = self.stored_or_default(&state, entity, &definition)?;
        Ok(regenerate(&stored, now, &definition))
    }

    /// When the next unit of `resource` becomes available, if anything is pending.
    pub async fn next_ready_at(
        &self,
        guild: GuildId,
        entity: EntityId,
        resource: ResourceId,
    ) -> Result<Option<Timestamp>> {
        let definition = self.definition(resource)?;
        let fresh = self.resource_state(guild, entity, resource).await?;
        Ok(next_ready_at(&fresh, &definition))
    }

    /// Re-sizes `resource` to the entity's current permanent boost and saves it.
    pub async fn apply_permanent_modifier(
        &self,
        guild: GuildId,
        entity: EntityId,
        resource: ResourceId,
    ) -> Result<ResourceState> {
        let definition = self.definition(resource)?;
        let now = self.clock.now();
        let mut state = self.load(guild).await?;

        let resized = self.refresh(&mut state, entity, &definition, now)?;

        self.commit(guild, &state).await?;
        Ok(resized)
    }

    /// Sets how many units of `item` the entity owns.
    ///
    /// Initialized entities get every registered resource re-sized in the same
    /// save, so capacity granted by the item shows up immediately.
    pub async fn set_item_quantity(
        &self,
        guild: GuildId,
        entity: EntityId,
        item: ItemId,
        quantity: u32,
    ) -> Result<()> {
        if !self.oracles.items().contains(item) {
            return Err(RuntimeError::UnknownItem(item));
        }
        let now = self.clock.now();
        let mut state = self.load(guild).await?;

        state.set_quantity(entity, item, quantity);
        if state.contains(entity) {
            for definition in self.oracles.resources().all_definitions() {
                self.refresh(&mut state, entity, &definition, now)?;
            }
        }

        self.commit(guild, &state).await?;
        tracing::debug!("{} in {} now owns {} of {}", entity, guild, quantity, item);
        Ok(())
    }

    pub async fn balance(&self, guild: GuildId, entity: EntityId) -> Result<i64> {
        let state = self.load(guild).await?;
        Ok(state.balance(entity)?)
    }

    pub async fn set_balance(&self, guild: GuildId, entity: EntityId, balance: i64) -> Result<()> {
        let mut state = self.load(guild).await?;
        state.set_balance(entity, balance)?;
        self.commit(guild, &state).await
    }

    /// Sum of `kind` modifiers from the entity's current possessions.
    ///
    /// `attribute = None` matches modifiers on any attribute. Entities without
    /// an inventory sum to zero.
    pub async fn sum_modifiers(
        &self,
        guild: GuildId,
        entity: EntityId,
        attribute: Option<ResourceId>,
        kind: ModifierKind,
    ) -> Result<i64> {
        let state = self.load(guild).await?;
        Ok(sum_modifiers(
            &state,
            self.oracles.items(),
            entity,
            attribute,
            kind,
        ))
    }

    /// Validates the request, reserves the attacker's charges and queues it.
    ///
    /// The charges are spent once this returns `Ok`, however the round later
    /// resolves.
    pub async fn schedule_attack(
        &self,
        guild: GuildId,
        request: AttackRequest,
    ) -> Result<AttackRecord> {
        let now = self.clock.now();
        let mut state = self.load(guild).await?;

        let record = match schedule_attack(
            &mut state,
            self.oracles.resources(),
            self.oracles.items(),
            &self.config.ledger,
            &request,
            now,
        ) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Rejected attack in {}: {}", guild, e);
                return Err(e.into());
            }
        };

        self.commit(guild, &state).await?;
        tracing::debug!(
            "Queued {} x{} from {} against {} for {} in {}",
            record.item,
            record.quantity,
            record.attacker,
            record.defender,
            record.round,
            guild
        );
        Ok(record)
    }

    /// Records still waiting in `round`, in scheduling order.
    pub async fn pending_attacks(
        &self,
        guild: GuildId,
        round: RoundId,
    ) -> Result<Vec<AttackRecord>> {
        let state = self.load(guild).await?;
        Ok(state
            .queue(round)
            .map(|queue| queue.records().to_vec())
            .unwrap_or_default())
    }

    /// Resolves `round` with the configured default scope.
    pub async fn process_round(&self, guild: GuildId, round: RoundId) -> Result<Vec<CombatResult>> {
        let outcome = self
            .process_round_scoped(guild, round, self.config.default_scope)
            .await?;
        Ok(outcome.results)
    }

    /// Resolves the queued attacks of `round` within `scope`.
    ///
    /// Only one resolution per `(guild, round)` may run at a time; a second
    /// caller gets [`RuntimeError::ConcurrentModification`]. Processing a round
    /// with nothing queued returns an empty outcome and saves nothing.
    pub async fn process_round_scoped(
        &self,
        guild: GuildId,
        round: RoundId,
        scope: RoundScope,
    ) -> Result<RoundOutcome> {
        let _permit = self.guard.try_acquire(guild, round)?;
        let mut state = self.load(guild).await?;

        let outcome = resolve_round(
            &mut state,
            self.oracles.items(),
            round,
            scope,
            self.config.ledger.balance_policy,
        );
        if outcome.is_empty() {
            tracing::debug!("Nothing queued for {} of {}", round, guild);
            return Ok(outcome);
        }

        for failure in &outcome.failures {
            tracing::warn!(
                "Dropped {} attacks against {} in {} of {}: {}",
                failure.dropped_records,
                failure.defender,
                round,
                guild,
                failure.reason
            );
        }
        for failure in &outcome.consumption.failures {
            tracing::warn!(
                "Could not consume {} of {} in {}: {}",
                failure.item,
                failure.attacker,
                guild,
                failure.reason
            );
        }

        self.commit(guild, &state).await?;
        tracing::info!(
            "Resolved {} of {}: {} defenders, {} failed, {} items consumed",
            round,
            guild,
            outcome.results.len(),
            outcome.failures.len(),
            outcome.consumption.consumed.len()
        );
        Ok(outcome)
    }

    async fn load(&self, guild: GuildId) -> Result<GuildState> {
        Ok(self.repository.load(guild).await?.unwrap_or_default())
    }

    async fn commit(&self, guild: GuildId, state: &GuildState) -> Result<()> {
        if let Err(e) = self.repository.save(guild, state).await {
            tracing::error!("Failed to save {}: {}", guild, e);
            return Err(e.into());
        }
        Ok(())
    }

    fn definition(&self, resource: ResourceId) -> Result<ResourceDefinition> {
        self.oracles
            .resources()
            .definition(resource)
            .ok_or(RuntimeError::InvalidConfig(resource))
    }

    /// Stored state of the resource, or a full one sized by the current boost
    /// if the entity exists but never tracked it.
    fn stored_or_default(
        &self,
        state: &GuildState,
        entity: EntityId,
        definition: &ResourceDefinition,
    ) -> Result<ResourceState> {
        match state.get(entity, definition.id) {
            Ok(stored) => Ok(stored),
            Err(StateError::ResourceNotTracked { .. }) => {
                let boost = permanent_boost(state, self.oracles.items(), entity, definition.id);
                Ok(ResourceState::for_definition(definition, boost))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Regenerates and re-sizes one resource on the working copy.
    fn refresh(
        &self,
        state: &mut GuildState,
        entity: EntityId,
        definition: &ResourceDefinition,
        now: Timestamp,
    ) -> Result<ResourceState> {
        let stored = self.stored_or_default(state, entity, definition)?;
        let boost = permanent_boost(&*state, self.oracles.items(), entity, definition.id);
        let resized = resize(&regenerate(&stored, now, definition), boost);
        state.set(entity, definition.id, resized.clone())?;
        Ok(resized)
    }
}

/// Builder for [`LedgerEngine`].
pub struct LedgerEngineBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn GuildRepository>>,
    oracles: Option<OracleManager>,
    clock: Option<Arc<dyn Clock>>,
}

impl LedgerEngineBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: None,
            oracles: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required guild repository
    pub fn repository(mut self, repository: impl GuildRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Share a repository with other engines or the caller.
    pub fn shared_repository(mut self, repository: Arc<dyn GuildRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Take both the ledger configuration and the oracles from loaded content.
    pub fn content(mut self, bundle: &ContentBundle) -> Self {
        self.config.ledger = bundle.config.clone();
        self.oracles = Some(OracleManager::from_content(bundle));
        self
    }

    /// Set the time source, [`SystemClock`] if not provided.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<LedgerEngine> {
        let repository = self.repository.ok_or(RuntimeError::MissingRepository)?;
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let attack_resource = self.config.ledger.attack_resource;
        if !oracles.resources().contains(attack_resource) {
            return Err(RuntimeError::InvalidConfig(attack_resource));
        }

        Ok(LedgerEngine {
            config: self.config,
            repository,
            oracles,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            guard: RoundGuard::new(),
        })
    }
}
