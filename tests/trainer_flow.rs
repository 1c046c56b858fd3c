//! Integration tests for the opening trainer using the bundled catalog

use boardbot::game::{
    OpeningCatalog, TrainerError, TrainerPhase, TrainerStep, TrainingSession, Verdict,
    FEEDBACK_DELAY,
};
use boardbot::rendering::HighlightTone;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::time::Duration;

fn bundled_catalog() -> OpeningCatalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/openings.json");
    OpeningCatalog::load(&path).expect("bundled catalog should load")
}

/// Answer every prompt correctly and collect the positions in order
fn run_through(session: &mut TrainingSession) -> Vec<String> {
    let mut seen = Vec::new();
    while session.phase() == TrainerPhase::Prompting {
        seen.push(session.current_position().unwrap().to_string());
        let answer = session.current_answer().unwrap().to_string();
        let feedback = session.attempt(&answer).unwrap();
        assert_eq!(feedback.verdict, Verdict::Correct);
        session.advance(FEEDBACK_DELAY);
    }
    seen
}

#[test]
fn test_bundled_catalog_is_fully_playable() {
    let catalog = bundled_catalog();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(
        names,
        vec!["Italian Game", "Queen's Gambit Declined", "Sicilian Defense"]
    );
    for name in names {
        assert_eq!(catalog.positions(name).unwrap().len(), 5, "{name}");
    }
}

#[test]
fn test_perfect_run_scores_every_position() {
    let mut session = TrainingSession::new(
        bundled_catalog(),
        "Italian Game",
        &mut StdRng::seed_from_u64(11),
    )
    .unwrap();

    let seen = run_through(&mut session);
    assert_eq!(seen.len(), 5);
    assert_eq!(session.score(), 5);
    assert_eq!(session.phase(), TrainerPhase::Completed);
    assert!(matches!(session.attempt("e4"), Err(TrainerError::Completed)));
}

#[test]
fn test_same_seed_same_order() {
    let order = |seed| {
        let mut session = TrainingSession::new(
            bundled_catalog(),
            "Sicilian Defense",
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        run_through(&mut session)
    };
    assert_eq!(order(5), order(5));
}

#[test]
fn test_shared_position_is_judged_per_opening() {
    //! After 1.e4 the Italian expects 1...e5 and the Sicilian 1...c5

    let after_e4 = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    let catalog = bundled_catalog();
    assert_eq!(catalog.answer("Italian Game", after_e4), Some("e5"));
    assert_eq!(catalog.answer("Sicilian Defense", after_e4), Some("c5"));

    let mut session =
        TrainingSession::new(catalog, "Sicilian Defense", &mut StdRng::seed_from_u64(2)).unwrap();
    while session.current_position() != Some(after_e4) {
        session.skip().unwrap();
        assert_eq!(session.advance(FEEDBACK_DELAY), Some(TrainerStep::NextPrompt));
    }

    let feedback = session.attempt("e5").unwrap();
    assert_eq!(feedback.verdict, Verdict::Incorrect);
    assert_eq!(
        session.board().highlight().map(|h| h.tone),
        Some(HighlightTone::Incorrect)
    );
    assert_eq!(session.advance(FEEDBACK_DELAY), Some(TrainerStep::Reverted));
    assert_eq!(session.board().fen(), after_e4);

    let feedback = session.attempt("c5").unwrap();
    assert_eq!(feedback.verdict, Verdict::Correct);
}

#[test]
fn test_feedback_waits_for_the_full_delay() {
    let mut session = TrainingSession::new(
        bundled_catalog(),
        "Queen's Gambit Declined",
        &mut StdRng::seed_from_u64(9),
    )
    .unwrap();
    session.skip().unwrap();

    let step = Duration::from_millis(250);
    for _ in 0..3 {
        assert_eq!(session.advance(step), None);
        assert!(matches!(session.phase(), TrainerPhase::Feedback { .. }));
    }
    assert_eq!(session.advance(step), Some(TrainerStep::NextPrompt));
}

#[test]
fn test_score_survives_opening_change() {
    let mut session = TrainingSession::new(
        bundled_catalog(),
        "Italian Game",
        &mut StdRng::seed_from_u64(4),
    )
    .unwrap();
    let answer = session.current_answer().unwrap().to_string();
    session.attempt(&answer).unwrap();
    session.advance(FEEDBACK_DELAY);

    session
        .select_opening("Sicilian Defense", &mut StdRng::seed_from_u64(4))
        .unwrap();
    assert_eq!(session.score(), 1);
    assert_eq!(session.opening(), "Sicilian Defense");
    assert_eq!(session.progress(), (1, 5));
    assert!(matches!(
        session.select_opening("King's Indian", &mut StdRng::seed_from_u64(4)),
        Err(TrainerError::Catalog(_))
    ));
}
