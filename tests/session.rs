use guessterm::{Feedback, GameConfig, Session, Status};

fn seeded(seed: u64) -> Session {
    Session::new(&GameConfig::new(1, 10, Some(seed)).unwrap())
}

#[test]
fn start_always_lands_in_range_with_clean_counters() {
    for seed in 0..50 {
        let mut session = seeded(seed);
        session.start();
        let target = session.target().unwrap();
        assert!((1..=10).contains(&target), "seed {seed} drew {target}");
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.status(), Status::Active);
    }
}

#[test]
fn every_guess_counts_once_and_compares_correctly() {
    let mut session = seeded(1);
    session.start();
    let target = session.target().unwrap();

    let mut expected = 0;
    for value in (1..=10).filter(|v| *v != target) {
        let feedback = session.guess(value).unwrap();
        expected += 1;
        assert_eq!(session.attempts(), expected);
        if value < target {
            assert_eq!(feedback, Feedback::TooLow);
        } else {
            assert_eq!(feedback, Feedback::TooHigh);
        }
        assert_eq!(session.status(), Status::Active);
    }

    assert_eq!(session.guess(target), Some(Feedback::Correct));
    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.attempts(), expected + 1);
}

#[test]
fn binary_search_wins_within_four_guesses() {
    let mut session = seeded(2);
    session.start();

    let (mut lo, mut hi) = (1, 10);
    loop {
        let mid = (lo + hi) / 2;
        match session.guess(mid).unwrap() {
            Feedback::Correct => break,
            Feedback::TooLow => lo = mid + 1,
            Feedback::TooHigh => hi = mid - 1,
            Feedback::None => unreachable!(),
        }
    }
    assert!(session.attempts() <= 4);
    assert_eq!(session.last_feedback(), Feedback::Correct);
}

#[test]
fn inactive_sessions_ignore_guesses() {
    let mut session = seeded(3);
    assert_eq!(session.guess(5), None);

    session.start();
    session.guess(0);
    session.toggle_pause();
    let before = session.snapshot();
    assert_eq!(session.guess(5), None);
    assert_eq!(session.guess_input("abc"), Ok(None));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn resume_keeps_target_and_attempts() {
    let mut session = seeded(4);
    session.toggle_pause();
    let target = session.target().unwrap();
    session.guess(0);

    session.toggle_pause();
    session.toggle_pause();

    assert_eq!(session.status(), Status::Active);
    assert_eq!(session.target(), Some(target));
    assert_eq!(session.attempts(), 1);
}

#[test]
fn reveal_is_refused_during_play_and_ends_it_otherwise() {
    let mut session = seeded(5);
    session.start();
    assert!(!session.reveal());

    session.toggle_pause();
    assert!(session.reveal());
    assert!(session.answer_revealed());
    assert_ne!(session.status(), Status::Active);
    assert_eq!(session.snapshot().target, session.target());
}

#[test]
fn same_seed_same_targets() {
    let mut a = seeded(99);
    let mut b = seeded(99);
    for _ in 0..10 {
        a.try_again();
        b.try_again();
        assert_eq!(a.target(), b.target());
    }
}

#[test]
fn custom_ranges_are_respected() {
    let config = GameConfig::new(-3, -1, Some(6)).unwrap();
    let mut session = Session::new(&config);
    for _ in 0..30 {
        session.start();
        assert!((-3..=-1).contains(&session.target().unwrap()));
    }
}
