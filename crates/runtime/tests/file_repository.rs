//! Persistence through the file repository and content-driven setup.

mod common;

use std::sync::Arc;

use common::*;
use ledger_content::ContentBundle;
use ledger_core::{AttackRequest, BalancePolicy, GuildId, GuildState, RoundId};
use ledger_runtime::{FileGuildRepository, GuildRepository, LedgerEngine, ManualClock};
use tempfile::TempDir;

const RESOURCES: &str = r#"(
    resources: [
        (id: 0, name: "attacks", default_max: 2, regen_interval_ms: 3600000, regen_mode: PerCharge),
    ],
)"#;

const ITEMS: &str = r#"(
    items: [
        (id: 1, name: "Sword", attack_value: Some(50)),
        (id: 2, name: "Shield", defense_value: Some(30)),
    ],
)"#;

const LEDGER: &str = r#"
attack_resource = 0
balance_policy = "allow_debt"
starting_balance = 40
"#;

fn write_content(dir: &TempDir) {
    std::fs::write(dir.path().join("resources.ron"), RESOURCES).unwrap();
    std::fs::write(dir.path().join("items.ron"), ITEMS).unwrap();
    std::fs::write(dir.path().join("ledger.toml"), LEDGER).unwrap();
}

fn content_engine(bundle: &ContentBundle, repo: FileGuildRepository) -> LedgerEngine {
    init_tracing();
    LedgerEngine::builder()
        .content(bundle)
        .repository(repo)
        .clock(Arc::new(ManualClock::new(START)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn missing_guild_loads_as_none() {
    let dir = TempDir::new().unwrap();
    let repo = FileGuildRepository::new(dir.path()).unwrap();

    assert!(repo.load(GuildId(1)).await.unwrap().is_none());
    assert!(!repo.exists(GuildId(1)).await.unwrap());
    repo.delete(GuildId(1)).await.unwrap();
}

#[tokio::test]
async fn save_load_list_delete() {
    let dir = TempDir::new().unwrap();
    let repo = FileGuildRepository::new(dir.path().join("guilds")).unwrap();

    let mut state = GuildState::new();
    state.initialize_entity(ALICE, 120, []);
    repo.save(GuildId(9), &state).await.unwrap();
    repo.save(GuildId(2), &GuildState::new()).await.unwrap();

    assert_eq!(repo.load(GuildId(9)).await.unwrap(), Some(state));
    assert_eq!(repo.list_guilds().await.unwrap(), vec![GuildId(2), GuildId(9)]);
    assert!(!repo.base_dir().join("guild_9.bin.tmp").exists());

    repo.delete(GuildId(9)).await.unwrap();
    assert!(!repo.exists(GuildId(9)).await.unwrap());
    assert_eq!(repo.list_guilds().await.unwrap(), vec![GuildId(2)]);
}

#[tokio::test]
async fn queued_attacks_survive_an_engine_restart() {
    let content_dir = TempDir::new().unwrap();
    write_content(&content_dir);
    let bundle = ContentBundle::load_dir(content_dir.path()).unwrap();
    assert_eq!(bundle.config.balance_policy, BalancePolicy::AllowDebt);

    let data_dir = TempDir::new().unwrap();
    let round = RoundId(3);

    {
        let engine = content_engine(&bundle, FileGuildRepository::new(data_dir.path()).unwrap());
        engine.initialize_entity(GUILD, ALICE).await.unwrap();
        engine.initialize_entity(GUILD, BOB).await.unwrap();
        engine.set_item_quantity(GUILD, ALICE, SWORD, 2).await.unwrap();
        engine.set_item_quantity(GUILD, BOB, SHIELD, 1).await.unwrap();
        engine
            .schedule_attack(GUILD, AttackRequest::new(ALICE, BOB, SWORD, 2, round))
            .await
            .unwrap();
    }

    let engine = content_engine(&bundle, FileGuildRepository::new(data_dir.path()).unwrap());
    assert_eq!(engine.pending_attacks(GUILD, round).await.unwrap().len(), 1);
    assert_eq!(
        engine
            .resource_state(GUILD, ALICE, ATTACKS)
            .await
            .unwrap()
            .available(),
        0
    );

    let results = engine.process_round(GUILD, round).await.unwrap();
    assert_eq!(results[0].balance_before, 40);
    assert_eq!(results[0].net_damage, 70);
    assert_eq!(results[0].balance_after, -30);
    assert_eq!(engine.balance(GUILD, BOB).await.unwrap(), -30);
}
