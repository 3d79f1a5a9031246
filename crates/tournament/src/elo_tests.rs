use super::*;
use proptest::prelude::*;

#[test]
fn equal_ratings_expect_half() {
    let (ea, eb) = expected_scores(1500.0, 1500.0);
    assert!((ea - 0.5).abs() < 1e-12);
    assert!((eb - 0.5).abs() < 1e-12);
}

#[test]
fn expected_score_matches_power_form() {
    let (a, b) = (1400.0_f64, 1600.0_f64);
    let qa = 10.0_f64.powf(a / 400.0);
    let qb = 10.0_f64.powf(b / 400.0);

    assert!((expected_score(a, b) - qa / (qa + qb)).abs() < 1e-12);
}

#[test]
fn draw_between_equals_changes_nothing() {
    let update = EloUpdater::default().update(1500.0, 1500.0, MatchOutcome::Draw);

    assert_eq!(update.new_a, 1500.0);
    assert_eq!(update.new_b, 1500.0);
    assert_eq!(update.delta, 0.0);
}

#[test]
fn underdog_win() {
    let updater = EloUpdater::new(32.0);
    let update = updater.update(1400.0, 1600.0, MatchOutcome::AWon);

    let expected_a = expected_score(1400.0, 1600.0);
    assert!((expected_a - 0.2403).abs() < 1e-3);
    assert!((update.new_a - 1424.31).abs() < 0.01);
    assert!((update.new_b - 1575.69).abs() < 0.01);
}

#[test]
fn b_win_moves_points_to_b() {
    let update = EloUpdater::default().update(1500.0, 1500.0, MatchOutcome::BWon);

    assert_eq!(update.new_a, 1484.0);
    assert_eq!(update.new_b, 1516.0);
}

#[test]
fn k_factor_scales_delta() {
    let small = EloUpdater::new(16.0).update(1500.0, 1500.0, MatchOutcome::AWon);
    let large = EloUpdater::new(64.0).update(1500.0, 1500.0, MatchOutcome::AWon);

    assert_eq!(small.delta, 8.0);
    assert_eq!(large.delta, 32.0);
}

#[test]
fn ratings_are_not_clamped() {
    let update = EloUpdater::default().update(-50.0, 4000.0, MatchOutcome::BWon);

    assert!(update.new_a < 0.0);
    assert!(update.new_b > 4000.0);
}

#[test]
fn tags_parse() {
    assert_eq!("A_WON".parse::<MatchOutcome>(), Ok(MatchOutcome::AWon));
    assert_eq!("b_won".parse::<MatchOutcome>(), Ok(MatchOutcome::BWon));
    assert_eq!("LEFT_WON".parse::<MatchOutcome>(), Ok(MatchOutcome::AWon));
    assert_eq!("RIGHT_WON".parse::<MatchOutcome>(), Ok(MatchOutcome::BWon));
    assert_eq!("DRAW".parse::<MatchOutcome>(), Ok(MatchOutcome::Draw));

    for outcome in [MatchOutcome::AWon, MatchOutcome::BWon, MatchOutcome::Draw] {
        assert_eq!(outcome.to_string().parse::<MatchOutcome>(), Ok(outcome));
    }
}

#[test]
fn unknown_result_is_rejected() {
    let (ra, rb) = (1500.0, 1450.0);

    let err = EloUpdater::default().update_tagged(ra, rb, "UNKNOWN").unwrap_err();

    assert_eq!(err, RatingError::UnknownResult("UNKNOWN".to_string()));
    // Inputs are plain values; nothing was touched
    assert_eq!((ra, rb), (1500.0, 1450.0));
}

proptest! {
    #[test]
    fn prop_expected_scores_sum_to_one(a in -5000.0f64..5000.0, b in -5000.0f64..5000.0) {
        let total = expected_score(a, b) + expected_score(b, a);
        prop_assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn prop_rating_exchange_is_zero_sum(
        a in 0.0f64..3000.0,
        b in 0.0f64..3000.0,
        k in 1.0f64..64.0,
        tag in prop::sample::select(vec!["A_WON", "B_WON", "DRAW"]),
    ) {
        let update = EloUpdater::new(k).update_tagged(a, b, tag).unwrap();
        let gain_a = update.new_a - a;
        let gain_b = update.new_b - b;
        prop_assert!((gain_a + gain_b).abs() < 1e-9);
    }

    #[test]
    fn prop_winner_never_loses_points(a in 0.0f64..3000.0, b in 0.0f64..3000.0) {
        let update = EloUpdater::default().update(a, b, MatchOutcome::AWon);
        prop_assert!(update.new_a >= a);
        prop_assert!(update.new_b <= b);
    }
}
