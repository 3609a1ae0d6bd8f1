//! Tests for the game service layer.

use tempfile::NamedTempFile;

use roshambo::{Choice, GameError, GameRepository, GameService};

fn setup_service() -> (NamedTempFile, GameService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, GameService::new(repo))
}

#[test]
fn test_create_game_creates_players_on_demand() {
    let (_db, service) = setup_service();
    let detail = service.create_game("Alice", "Bob").expect("Create failed");

    assert_eq!(detail.player1().name(), "Alice");
    assert_eq!(detail.player2().name(), "Bob");
    assert_eq!(*detail.player1().score(), 0);
    assert!(detail.winner().is_none());
    assert!(detail.rounds().is_empty());
}

#[test]
fn test_create_game_reuses_existing_players() {
    let (_db, service) = setup_service();
    let first = service.create_game("Alice", "Bob").expect("Create failed");
    let second = service.create_game("alice", "Carol").expect("Create failed");

    // Same player row regardless of submitted casing.
    assert_eq!(second.player1().id(), first.player1().id());
    assert_eq!(second.player1().name(), "Alice");
}

#[test]
fn test_create_game_rejects_equal_names() {
    let (_db, service) = setup_service();
    let result = service.create_game("Alice", "Alice");
    assert!(matches!(result, Err(GameError::DuplicatePlayerNames)));
}

#[test]
fn test_create_game_rejects_equal_names_ignoring_case() {
    let (_db, service) = setup_service();
    let result = service.create_game("Alice", "aLiCe");
    assert!(matches!(result, Err(GameError::DuplicatePlayerNames)));
}

#[test]
fn test_get_game_not_found() {
    let (_db, service) = setup_service();
    let result = service.get_game("00000000-0000-0000-0000-000000000000");
    assert!(matches!(result, Err(GameError::GameNotFound)));
}

#[test]
fn test_ensure_game_open() {
    let (_db, service) = setup_service();

    let result = service.ensure_game_open("00000000-0000-0000-0000-000000000000");
    assert!(matches!(result, Err(GameError::GameNotFound)));

    let game = service.create_game("Alice", "Bob").expect("Create failed");
    let game_id = game.game().id().clone();
    assert!(service.ensure_game_open(&game_id).is_ok());

    for _ in 0..3 {
        service
            .create_round(&game_id, Choice::Rock, Choice::Scissors)
            .expect("Round failed");
    }
    let result = service.ensure_game_open(&game_id);
    assert!(matches!(result, Err(GameError::GameFinished)));
}

#[test]
fn test_round_detail_carries_winner() {
    let (_db, service) = setup_service();
    let game = service.create_game("Alice", "Bob").expect("Create failed");

    let detail = service
        .create_round(game.game().id(), Choice::Rock, Choice::Scissors)
        .expect("Round failed");
    assert_eq!(*detail.round().round_number(), 1);
    let winner = detail.round_winner().as_ref().expect("Winner missing");
    assert_eq!(winner.name(), "Alice");
}

#[test]
fn test_draw_round_detail_has_no_winner() {
    let (_db, service) = setup_service();
    let game = service.create_game("Alice", "Bob").expect("Create failed");

    let detail = service
        .create_round(game.game().id(), Choice::Rock, Choice::Rock)
        .expect("Round failed");
    assert!(detail.round_winner().is_none());

    let game = service.get_game(game.game().id()).expect("Get failed");
    assert!(!game.game().is_finished());
}

#[test]
fn test_full_game_alice_wins() {
    let (_db, service) = setup_service();
    let game = service.create_game("Alice", "Bob").expect("Create failed");
    let game_id = game.game().id().clone();

    for _ in 0..3 {
        service
            .create_round(&game_id, Choice::Rock, Choice::Scissors)
            .expect("Round failed");
    }

    let detail = service.get_game(&game_id).expect("Get failed");
    assert!(detail.game().is_finished());
    assert!(detail.game().finished_at().is_some());
    let winner = detail.winner().as_ref().expect("Winner missing");
    assert_eq!(winner.name(), "Alice");
    assert_eq!(*winner.score(), 1);
    assert_eq!(detail.rounds().len(), 3);
    for round in detail.rounds() {
        let round_winner = round.round_winner().as_ref().expect("Round winner missing");
        assert_eq!(round_winner.name(), "Alice");
    }

    // Fourth round is rejected.
    let result = service.create_round(&game_id, Choice::Rock, Choice::Scissors);
    assert!(matches!(result, Err(GameError::GameFinished)));
}

#[test]
fn test_list_games() {
    let (_db, service) = setup_service();
    assert!(service.list_games().expect("List failed").is_empty());

    let g1 = service.create_game("Alice", "Bob").expect("Create failed");
    let g2 = service.create_game("Bob", "Carol").expect("Create failed");

    let games = service.list_games().expect("List failed");
    assert_eq!(games.len(), 2);
    let ids: Vec<&String> = games.iter().map(|g| g.game().id()).collect();
    assert!(ids.contains(&g1.game().id()));
    assert!(ids.contains(&g2.game().id()));
}
