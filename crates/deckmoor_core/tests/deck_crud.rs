use deckmoor_core::db::open_db_in_memory;
use deckmoor_core::{
    Deck, DeckEntry, DeckFormat, DeckId, DeckListQuery, DeckRepository, DeckService, RepoError,
    RepoResult, SqliteDeckRepository,
};
use uuid::Uuid;

fn sample_deck(name: &str, format: DeckFormat) -> Deck {
    let mut deck = Deck::new(name, format);
    deck.entries.push(DeckEntry::new("Llanowar Elves", 4));
    deck.entries.push(DeckEntry::new("Forest", 20));
    deck
}

#[test]
fn save_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let mut deck = sample_deck("Mono Green Stompy", DeckFormat::Modern);
    deck.description = "ramp into threats".to_string();
    deck.entries[0].set_code = Some("dom".to_string());
    let id = repo.save_deck(&deck).unwrap();
    assert_eq!(id, deck.uuid);

    let loaded = repo.get_deck(id, false).unwrap().unwrap();
    assert_eq!(loaded, deck);
}

#[test]
fn save_with_existing_id_replaces_the_document() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let mut deck = sample_deck("Draft Leftovers", DeckFormat::Pauper);
    repo.save_deck(&deck).unwrap();

    deck.name = "Pauper Elves".to_string();
    deck.entries.clear();
    deck.entries.push(DeckEntry::new("Quirion Ranger", 4));
    repo.save_deck(&deck).unwrap();

    let all = repo.list_decks(&DeckListQuery::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Pauper Elves");
    assert_eq!(all[0].entries.len(), 1);
}

#[test]
fn load_omits_deleted_decks_and_can_include_them() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let deck_a = sample_deck("Keeper", DeckFormat::Commander);
    let deck_b = sample_deck("Goner", DeckFormat::Commander);
    repo.save_deck(&deck_a).unwrap();
    repo.save_deck(&deck_b).unwrap();
    repo.soft_delete_deck(deck_b.uuid).unwrap();

    let visible = repo.list_decks(&DeckListQuery::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].uuid, deck_a.uuid);

    let include_deleted = DeckListQuery {
        include_deleted: true,
        ..DeckListQuery::default()
    };
    let all = repo.list_decks(&include_deleted).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn delete_is_idempotent_for_existing_decks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let deck = sample_deck("Short Lived", DeckFormat::Standard);
    repo.save_deck(&deck).unwrap();

    repo.soft_delete_deck(deck.uuid).unwrap();
    repo.soft_delete_deck(deck.uuid).unwrap();

    assert!(repo.get_deck(deck.uuid, false).unwrap().is_none());
    let tombstone = repo.get_deck(deck.uuid, true).unwrap().unwrap();
    assert!(tombstone.is_deleted);
}

#[test]
fn delete_of_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let missing = Uuid::new_v4();
    let err = repo.soft_delete_deck(missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn validation_failure_blocks_save() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    let mut invalid = sample_deck("Zero Copies", DeckFormat::Modern);
    invalid.entries[0].quantity = 0;
    let err = repo.save_deck(&invalid).unwrap_err();
    assert!(matches!(err, RepoError::InvalidDeck(_)));

    let unnamed = Deck::new("   ", DeckFormat::Modern);
    let err = repo.save_deck(&unnamed).unwrap_err();
    assert!(matches!(err, RepoError::InvalidDeck(_)));

    assert!(repo.list_decks(&DeckListQuery::default()).unwrap().is_empty());
}

#[test]
fn list_filters_by_format() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    repo.save_deck(&sample_deck("EDH Pile", DeckFormat::Commander))
        .unwrap();
    repo.save_deck(&sample_deck("Modern Pile", DeckFormat::Modern))
        .unwrap();

    let query = DeckListQuery {
        format: Some(DeckFormat::Modern),
        ..DeckListQuery::default()
    };
    let decks = repo.list_decks(&query).unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].format, DeckFormat::Modern);
}

#[test]
fn list_applies_limit_and_offset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDeckRepository::new(&conn);

    for index in 0..5 {
        repo.save_deck(&sample_deck(&format!("Deck {index}"), DeckFormat::Standard))
            .unwrap();
    }

    let first_page = DeckListQuery {
        limit: Some(2),
        ..DeckListQuery::default()
    };
    assert_eq!(repo.list_decks(&first_page).unwrap().len(), 2);

    let second_page = DeckListQuery {
        limit: Some(2),
        offset: 2,
        ..DeckListQuery::default()
    };
    let page = repo.list_decks(&second_page).unwrap();
    assert_eq!(page.len(), 2);

    let rest = DeckListQuery {
        offset: 4,
        ..DeckListQuery::default()
    };
    assert_eq!(repo.list_decks(&rest).unwrap().len(), 1);
}

#[test]
fn service_save_then_load_returns_the_saved_deck() {
    let conn = open_db_in_memory().unwrap();
    let service = DeckService::new(SqliteDeckRepository::new(&conn));

    let deck = sample_deck("Service Deck", DeckFormat::Commander);
    service.save_deck(&deck).unwrap();

    let decks = service.load_decks().unwrap();
    assert_eq!(decks, vec![deck]);
}

#[test]
fn service_delete_then_load_omits_the_deleted_id() {
    let conn = open_db_in_memory().unwrap();
    let service = DeckService::new(SqliteDeckRepository::new(&conn));

    let deck_a = sample_deck("Stays", DeckFormat::Pauper);
    let deck_b = sample_deck("Goes", DeckFormat::Pauper);
    service.save_deck(&deck_a).unwrap();
    service.save_deck(&deck_b).unwrap();

    service.delete_deck(deck_b.uuid).unwrap();

    let remaining = service.load_decks().unwrap();
    assert!(remaining.iter().all(|deck| deck.uuid != deck_b.uuid));
    assert!(remaining.iter().any(|deck| deck.uuid == deck_a.uuid));
}

struct FailingRepo;

impl DeckRepository for FailingRepo {
    fn save_deck(&self, _deck: &Deck) -> RepoResult<DeckId> {
        Err(RepoError::InvalidData("injected save failure".to_string()))
    }

    fn get_deck(&self, _id: DeckId, _include_deleted: bool) -> RepoResult<Option<Deck>> {
        Err(RepoError::InvalidData("injected get failure".to_string()))
    }

    fn list_decks(&self, _query: &DeckListQuery) -> RepoResult<Vec<Deck>> {
        Err(RepoError::InvalidData("injected list failure".to_string()))
    }

    fn soft_delete_deck(&self, _id: DeckId) -> RepoResult<()> {
        Err(RepoError::InvalidData("injected delete failure".to_string()))
    }
}

#[test]
fn service_surfaces_repository_failures_unchanged() {
    let service = DeckService::new(FailingRepo);

    let deck = sample_deck("Doomed", DeckFormat::Modern);
    let err = service.save_deck(&deck).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("save")));

    let err = service.load_decks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("list")));

    let err = service.delete_deck(deck.uuid).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("delete")));
}
