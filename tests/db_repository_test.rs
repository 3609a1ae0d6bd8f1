//! Tests for database repository operations.

use tempfile::NamedTempFile;

use roshambo::{Choice, GameRepository, RoundError};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

#[test]
fn test_create_player() {
    let (_db, repo) = setup_test_db();
    let player = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    assert_eq!(player.name(), "Alice");
    assert_eq!(*player.score(), 0);
    assert!(!player.id().is_empty());
}

#[test]
fn test_create_player_duplicate_name_fails() {
    let (_db, repo) = setup_test_db();
    repo.create_player("Bob".to_string())
        .expect("First create failed");
    let result = repo.create_player("Bob".to_string());
    assert!(result.is_err(), "Duplicate name should fail");
}

#[test]
fn test_create_player_duplicate_name_case_insensitive() {
    let (_db, repo) = setup_test_db();
    repo.create_player("Carol".to_string())
        .expect("First create failed");
    let result = repo.create_player("cArOl".to_string());
    assert!(result.is_err(), "Names are unique ignoring case");
}

#[test]
fn test_get_player_by_name_ignores_case() {
    let (_db, repo) = setup_test_db();
    let created = repo
        .create_player("Dave".to_string())
        .expect("Create failed");

    let found = repo.get_player_by_name("DAVE").expect("Query failed");
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.id(), created.id());
    // Stored casing is the first-seen casing.
    assert_eq!(found.name(), "Dave");
}

#[test]
fn test_get_player_by_name_not_found() {
    let (_db, repo) = setup_test_db();
    let found = repo
        .get_player_by_name("NoSuchPlayer")
        .expect("Query failed");
    assert!(found.is_none());
}

#[test]
fn test_create_and_get_game() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");

    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create game failed");
    assert!(!game.is_finished());
    assert!(game.winner_id().is_none());
    assert!(game.finished_at().is_none());

    let fetched = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(fetched.id(), game.id());
    assert_eq!(fetched.player1_id(), alice.id());
    assert_eq!(fetched.player2_id(), bob.id());
}

#[test]
fn test_get_game_not_found() {
    let (_db, repo) = setup_test_db();
    let found = repo
        .get_game("00000000-0000-0000-0000-000000000000")
        .expect("Query failed");
    assert!(found.is_none());
}

#[test]
fn test_list_games() {
    let (_db, repo) = setup_test_db();
    assert!(repo.list_games().expect("List failed").is_empty());

    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let carol = repo
        .create_player("Carol".to_string())
        .expect("Create failed");

    let g1 = repo.create_game(alice.id(), bob.id()).expect("Create failed");
    let g2 = repo
        .create_game(bob.id(), carol.id())
        .expect("Create failed");

    let games = repo.list_games().expect("List failed");
    assert_eq!(games.len(), 2);
    let ids: Vec<&String> = games.iter().map(|g| g.id()).collect();
    assert!(ids.contains(&g1.id()));
    assert!(ids.contains(&g2.id()));
}

#[test]
fn test_round_numbers_are_sequential() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    for _ in 0..4 {
        // Draws keep the game open indefinitely.
        repo.create_round(game.id(), Choice::Rock, Choice::Rock)
            .expect("Round failed");
    }

    let rounds = repo.rounds_for_game(&game).expect("Rounds failed");
    let numbers: Vec<i32> = rounds.iter().map(|r| *r.round_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_draw_round_has_no_winner() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    let round = repo
        .create_round(game.id(), Choice::Paper, Choice::Paper)
        .expect("Round failed");
    assert!(round.round_winner_id().is_none());

    let game = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert!(!game.is_finished());
}

#[test]
fn test_round_records_winner_and_choices() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    let round = repo
        .create_round(game.id(), Choice::Scissors, Choice::Paper)
        .expect("Round failed");
    assert_eq!(round.player1_choice(), "scissors");
    assert_eq!(round.player2_choice(), "paper");
    assert_eq!(round.round_winner_id().as_deref(), Some(alice.id().as_str()));

    let (p1, p2) = round.parse_choices().expect("Parse failed");
    assert_eq!(p1, Choice::Scissors);
    assert_eq!(p2, Choice::Paper);
}

#[test]
fn test_third_win_finishes_game() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    for _ in 0..2 {
        repo.create_round(game.id(), Choice::Rock, Choice::Scissors)
            .expect("Round failed");
        let open = repo
            .get_game(game.id())
            .expect("Query failed")
            .expect("Game missing");
        assert!(!open.is_finished(), "Game must stay open below threshold");
    }

    repo.create_round(game.id(), Choice::Rock, Choice::Scissors)
        .expect("Round failed");

    let finished = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert!(finished.is_finished());
    assert_eq!(finished.winner_id().as_deref(), Some(alice.id().as_str()));
    assert!(finished.finished_at().is_some());
}

#[test]
fn test_winner_score_is_credited_once() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    for _ in 0..3 {
        repo.create_round(game.id(), Choice::Paper, Choice::Rock)
            .expect("Round failed");
    }

    let alice = repo
        .get_player(alice.id())
        .expect("Query failed")
        .expect("Player missing");
    let bob = repo
        .get_player(bob.id())
        .expect("Query failed")
        .expect("Player missing");
    assert_eq!(*alice.score(), 1);
    assert_eq!(*bob.score(), 0);
}

#[test]
fn test_no_round_after_game_finished() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    for _ in 0..3 {
        repo.create_round(game.id(), Choice::Rock, Choice::Scissors)
            .expect("Round failed");
    }

    let finished = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    let finished_at = *finished.finished_at();

    let result = repo.create_round(game.id(), Choice::Rock, Choice::Scissors);
    assert!(matches!(result, Err(RoundError::GameFinished)));

    // State unchanged: still three rounds, same completion timestamp.
    let rounds = repo.rounds_for_game(&game).expect("Rounds failed");
    assert_eq!(rounds.len(), 3);
    let reread = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(*reread.finished_at(), finished_at);
}

#[test]
fn test_create_round_unknown_game() {
    let (_db, repo) = setup_test_db();
    let result = repo.create_round(
        "00000000-0000-0000-0000-000000000000",
        Choice::Rock,
        Choice::Paper,
    );
    assert!(matches!(result, Err(RoundError::GameNotFound)));
}

#[test]
fn test_mixed_rounds_reach_threshold() {
    let (_db, repo) = setup_test_db();
    let alice = repo
        .create_player("Alice".to_string())
        .expect("Create failed");
    let bob = repo.create_player("Bob".to_string()).expect("Create failed");
    let game = repo
        .create_game(alice.id(), bob.id())
        .expect("Create failed");

    // Alice 2, Bob 2, one draw - still open.
    repo.create_round(game.id(), Choice::Rock, Choice::Scissors)
        .expect("Round failed");
    repo.create_round(game.id(), Choice::Scissors, Choice::Rock)
        .expect("Round failed");
    repo.create_round(game.id(), Choice::Paper, Choice::Rock)
        .expect("Round failed");
    repo.create_round(game.id(), Choice::Rock, Choice::Paper)
        .expect("Round failed");
    repo.create_round(game.id(), Choice::Rock, Choice::Rock)
        .expect("Round failed");

    let open = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert!(!open.is_finished());

    // Bob takes his third win.
    repo.create_round(game.id(), Choice::Paper, Choice::Scissors)
        .expect("Round failed");
    let finished = repo
        .get_game(game.id())
        .expect("Query failed")
        .expect("Game missing");
    assert_eq!(finished.winner_id().as_deref(), Some(bob.id().as_str()));
}
