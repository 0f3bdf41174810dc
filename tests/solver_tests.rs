use wordle_bot::{
    load_dictionary, FeedbackPattern, Strategy, Word, WordSet, WordleError, WordleSolver,
};

fn w(s: &str) -> Word {
    Word::new(s).unwrap()
}

fn get_test_words() -> WordSet {
    WordSet::new(
        [
            "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast",
            "beast",
        ]
        .map(w),
    )
    .unwrap()
}

#[test]
fn test_solver_creation() {
    let words = get_test_words();
    let solver = WordleSolver::new(words.clone()).unwrap();
    assert_eq!(solver.remaining_count(), words.len());
    assert_eq!(solver.strategy(), Strategy::MaxEntropy);
    assert_eq!(solver.max_guesses(), 6);
}

#[test]
fn test_apply_feedback() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();

    let pattern = FeedbackPattern::calculate(&w("crane"), &w("crate"));
    solver.apply_feedback(&w("crane"), pattern).unwrap();

    assert!(solver.remaining_count() < 10);
    assert!(solver.possible_answers().contains(&w("crate")));
    assert_eq!(solver.history().len(), 1);
}

#[test]
fn test_apply_feedback_length_mismatch() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    let result = solver.apply_feedback(&w("cranes"), FeedbackPattern::win(6));
    assert!(matches!(result, Err(WordleError::LengthMismatch { .. })));
    assert_eq!(solver.remaining_count(), 10);
}

#[test]
fn test_find_best_guess() {
    let solver = WordleSolver::new(get_test_words()).unwrap();
    let analysis = solver.find_best_guess().unwrap();
    assert!(solver.all_words().contains(&analysis.word));
    assert!(analysis.entropy > 0.0);
}

#[test]
fn test_find_best_guess_is_deterministic() {
    let words = load_dictionary().unwrap();
    let solver = WordleSolver::new(words).unwrap();
    let first = solver.find_best_guesses(3).unwrap();
    for _ in 0..3 {
        assert_eq!(solver.find_best_guesses(3).unwrap(), first);
    }
}

#[test]
fn test_find_best_guess_single_answer() {
    let solver = WordleSolver::new(WordSet::new([w("crane")]).unwrap()).unwrap();
    let analysis = solver.find_best_guess().unwrap();
    assert_eq!(analysis.word, w("crane"));
    assert_eq!(analysis.entropy, 0.0);
}

#[test]
fn test_solve_for_target() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();

    let guesses = solver.solve_for_target(&w("crate")).unwrap();

    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);

    let last = guesses.last().unwrap();
    assert!(last.is_win());
    assert_eq!(last.guess(), &w("crate"));
}

#[test]
fn test_solve_various_targets() {
    let words = get_test_words();

    for strategy in [Strategy::MaxEntropy, Strategy::MinExpectedSize] {
        for target in &words {
            let mut solver = WordleSolver::new(words.clone())
                .unwrap()
                .with_strategy(strategy);
            let guesses = solver.solve_for_target(target).unwrap();

            assert!(guesses.len() <= 6, "Too many guesses for target: {target}");
            let last = guesses.last().unwrap();
            assert!(last.is_win(), "Didn't win for target: {target}");
            assert_eq!(last.guess(), target);
        }
    }
}

#[test]
fn test_never_repeats_a_guess() {
    let words = load_dictionary().unwrap();
    let mut solver = WordleSolver::new(words).unwrap();
    solver.set_max_guesses(10);
    let guesses = solver.solve_for_target(&w("fuzzy")).unwrap();
    for (i, a) in guesses.iter().enumerate() {
        for b in &guesses[i + 1..] {
            assert_ne!(a.guess(), b.guess());
        }
    }
}

#[test]
fn test_entropy_calculation() {
    let words = WordSet::new(["crane", "trace", "crate", "slate"].map(w)).unwrap();
    let solver = WordleSolver::new(words).unwrap();

    let top = solver.find_best_guesses(4).unwrap();
    for analysis in &top {
        assert!(analysis.entropy > 0.0);
        assert!(analysis.entropy <= 2.0);
    }
}

#[test]
fn test_reset() {
    let words = get_test_words();
    let mut solver = WordleSolver::new(words.clone()).unwrap();

    let pattern = FeedbackPattern::calculate(&w("crane"), &w("toast"));
    solver.apply_feedback(&w("crane"), pattern).unwrap();

    assert!(solver.remaining_count() < words.len());

    solver.reset();
    assert_eq!(solver.remaining_count(), words.len());
    assert!(solver.history().is_empty());
    assert_eq!(solver.filter().min_count('t'), 0);
}

#[test]
fn test_get_top_guesses() {
    let solver = WordleSolver::new(get_test_words()).unwrap();

    let top_5 = solver.find_best_guesses(5).unwrap();
    assert_eq!(top_5.len(), 5);

    for i in 1..top_5.len() {
        assert!(top_5[i - 1].entropy >= top_5[i].entropy);
    }
}

#[test]
fn test_expected_size_strategy_ranking() {
    let solver = WordleSolver::new(get_test_words())
        .unwrap()
        .with_strategy(Strategy::MinExpectedSize);

    let top = solver.find_best_guesses(5).unwrap();
    for i in 1..top.len() {
        assert!(top[i - 1].expected_remaining <= top[i].expected_remaining);
    }
}

#[test]
fn test_with_full_dictionary() {
    let words = load_dictionary().unwrap();
    let mut solver = WordleSolver::new(words).unwrap();

    let guesses = solver.solve_for_target(&w("crane")).unwrap();

    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);

    let last = guesses.last().unwrap();
    assert!(last.is_win());
    assert_eq!(last.guess(), &w("crane"));
}

#[test]
fn test_hard_mode() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    solver.set_hard_mode(true);

    let pattern = FeedbackPattern::calculate(&w("crane"), &w("crate"));
    solver.apply_feedback(&w("crane"), pattern).unwrap();

    let guesses = solver.find_best_guesses(10).unwrap();
    for g in &guesses {
        assert!(
            g.word.as_str().starts_with("cra"),
            "Hard mode violation: {}",
            g.word
        );
    }
}

#[test]
fn test_hard_mode_pool_respects_constraints() {
    let words = load_dictionary().unwrap();
    let mut solver = WordleSolver::new(words).unwrap();
    solver.set_hard_mode(true);

    let pattern = FeedbackPattern::calculate(&w("slate"), &w("stare"));
    solver.apply_feedback(&w("slate"), pattern).unwrap();

    for g in solver.find_best_guesses(20).unwrap() {
        assert!(solver.filter().matches(&g.word), "{} breaks hard mode", g.word);
    }
}

#[test]
fn test_empty_possible_answers() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();

    // Filter to empty by applying impossible constraints
    solver
        .apply_feedback(&w("zzzzz"), FeedbackPattern::win(5))
        .unwrap();

    assert_eq!(solver.remaining_count(), 0);
    assert!(matches!(
        solver.find_best_guess(),
        Err(WordleError::EmptyPool)
    ));
    assert!(solver.find_best_guesses(5).is_err());
}

#[test]
fn test_two_remaining_words() {
    let words = WordSet::new([w("crane"), w("trace")]).unwrap();
    let solver = WordleSolver::new(words).unwrap();

    let analysis = solver.find_best_guess().unwrap();

    assert_eq!(analysis.word, w("crane"));
    assert!(analysis.is_possible_answer);
}

#[test]
fn test_solve_rejects_wrong_length() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    assert!(matches!(
        solver.solve_for_target(&w("cranes")),
        Err(WordleError::LengthMismatch {
            expected: 5,
            found: 6
        })
    ));
}

#[test]
fn test_solve_stops_at_guess_limit() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    solver.set_max_guesses(1);
    let opener = solver.find_best_guess().unwrap().word;
    let target = get_test_words()
        .iter()
        .copied()
        .find(|word| *word != opener)
        .unwrap();

    let guesses = solver.solve_for_target(&target).unwrap();

    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0].guess(), &opener);
    assert!(!guesses[0].is_win());
}

#[test]
fn test_benchmark_counts_failures_past_limit() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    solver.set_max_guesses(1);

    let distribution = solver.benchmark_guess_distribution().unwrap();

    assert_eq!(distribution, vec![(1, 1), (2, 9)]);
}

#[test]
fn test_history_kept_when_pool_runs_out() {
    let mut solver = WordleSolver::new(get_test_words()).unwrap();
    // Every word in the list has an "a", so the first all-gray answer
    // leaves nothing to guess.
    let all_absent = FeedbackPattern::parse("bbbbb").unwrap();

    let result = solver.solve_with_feedback(|_| all_absent);

    assert!(matches!(result, Err(WordleError::EmptyPool)));
    assert_eq!(solver.history().len(), 1);
    assert_eq!(solver.history()[0].pattern(), all_absent);
    assert_eq!(solver.remaining_count(), 0);
}

#[test]
fn test_benchmark_small_dictionary() {
    let solver = WordleSolver::new(get_test_words()).unwrap();

    let distribution = solver.benchmark_guess_distribution().unwrap();
    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 10);
    assert!(distribution.iter().all(|(g, _)| *g >= 1 && *g <= 6));

    let average = solver.benchmark_average_guesses().unwrap();
    assert!(average >= 1.0 && average <= 6.0);
}

#[test]
fn test_solve_difficult_word() {
    let words = load_dictionary().unwrap();
    let mut solver = WordleSolver::new(words).unwrap();

    let guesses = solver.solve_for_target(&w("fuzzy")).unwrap();

    assert!(guesses.len() <= 6);
    assert!(guesses.last().unwrap().is_win());
}
