use std::{
    thread,
    time::{Duration, Instant},
};

use genqueens::{
    error::QueensError,
    evolution::{LogLevel, SearchLauncher, SearchOptions, SearchOutcome},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn test_solves_eight_queens() {
    init_tracing();
    let options = SearchOptions::builder()
        .board_size(8)
        .population_size(200)
        .seed(42)
        .deadline(Duration::from_secs(120))
        .anneal_interval(Duration::from_secs(2))
        .initial_fitness_threshold(16)
        .log_level(LogLevel::Minimal)
        .build();

    let result = SearchLauncher::new(options).unwrap().launch().unwrap();

    let board = result.solution().expect("search should find a solution");
    assert!(board.total_conflicts() <= 1);
    assert_eq!(board.fitness(), board.total_conflicts());
    assert_eq!(board.pieces().len(), 8);
}

#[test]
fn test_strict_acceptance_finds_true_solution() {
    init_tracing();
    let options = SearchOptions::builder()
        .board_size(6)
        .population_size(100)
        .seed(7)
        .deadline(Duration::from_secs(120))
        .acceptance_threshold(0)
        .build();

    let result = SearchLauncher::new(options).unwrap().launch().unwrap();

    assert_eq!(result.solution().map(|board| board.total_conflicts()), Some(0));
}

#[test]
fn test_solved_search_does_not_wait_for_deadline() {
    let options = SearchOptions::builder()
        .board_size(4)
        .population_size(50)
        .seed(1)
        .deadline(Duration::from_secs(600))
        .build();

    let started = Instant::now();
    let result = SearchLauncher::new(options).unwrap().launch().unwrap();

    assert!(result.is_solved());
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[test]
fn test_deadline_returns_no_solution() {
    init_tracing();
    let options = SearchOptions::builder()
        .board_size(20)
        .population_size(50)
        .seed(3)
        .deadline(Duration::from_millis(20))
        .anneal_interval(Duration::from_millis(5))
        .acceptance_threshold(0)
        .log_level(LogLevel::Verbose)
        .build();

    let started = Instant::now();
    let result = SearchLauncher::new(options).unwrap().launch().unwrap();

    assert_eq!(result.outcome, SearchOutcome::NoSolution);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_concurrent_deadlines_do_not_deadlock() {
    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            thread::spawn(move || {
                let options = SearchOptions::builder()
                    .board_size(16)
                    .population_size(30)
                    .seed(seed)
                    .deadline(Duration::from_millis(1 + seed))
                    .anneal_interval(Duration::from_millis(1))
                    .acceptance_threshold(0)
                    .build();
                SearchLauncher::new(options).unwrap().launch()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn test_zero_deadline_still_returns() {
    let options = SearchOptions::builder()
        .board_size(20)
        .population_size(10)
        .deadline(Duration::ZERO)
        .acceptance_threshold(0)
        .build();

    let result = SearchLauncher::new(options).unwrap().launch().unwrap();
    assert!(!result.is_solved());
}

#[test]
fn test_launcher_rejects_invalid_options() {
    let options = SearchOptions::builder().board_size(9).build();

    match SearchLauncher::new(options) {
        Err(QueensError::Configuration(msg)) => assert!(msg.contains("even")),
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_solution_serializes() {
    let options = SearchOptions::builder()
        .board_size(4)
        .population_size(20)
        .seed(9)
        .deadline(Duration::from_secs(60))
        .build();

    let result = SearchLauncher::new(options).unwrap().launch().unwrap();
    let board = result.solution().unwrap();

    let json = serde_json::to_string(board).unwrap();
    let restored: genqueens::board::Board = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, board);
}

#[cfg(feature = "serde")]
#[test]
fn test_malformed_board_is_rejected() {
    use genqueens::board::Board;

    let cases = [
        // Two queens on one cell.
        r#"{"size":4,"pieces":[{"x":1,"y":1},{"x":1,"y":1}]}"#,
        // Queen off the board.
        r#"{"size":4,"pieces":[{"x":5,"y":1}]}"#,
        // Empty board size.
        r#"{"size":0,"pieces":[]}"#,
        // Stored grid and fitness are not accepted from outside.
        r#"{"size":2,"cells":[],"pieces":[{"x":1,"y":1}],"fitness":7}"#,
    ];

    for json in cases {
        assert!(
            serde_json::from_str::<Board>(json).is_err(),
            "accepted {}",
            json
        );
    }

    let json = r#"{"size":8,"pieces":[{"x":1,"y":1},{"x":8,"y":8}]}"#;
    let board: Board = serde_json::from_str(json).unwrap();
    assert_eq!(board.fitness(), 2);
    assert_eq!(
        board.attacks_from(genqueens::board::Piece::new(1, 1)).unwrap(),
        vec![genqueens::board::Piece::new(8, 8)]
    );
}
