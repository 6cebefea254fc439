#[cfg(test)]
mod tests {
    use flappyhawk_core::config::Tuning;
    use flappyhawk_core::constants::*;
    use flappyhawk_core::enums::{Difficulty, GameDayDifficulty, GameMode, RoundState};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::bridge::ModeManager;
    use crate::broadcast::RateChange;
    use crate::iowa::IowaManager;
    use crate::manager::{roll_opponent_points, RoundManager};
    use crate::profiles::{game_day_profile, iowa_profile};

    fn round() -> RoundManager {
        RoundManager::new(Tuning::default(), GameDayDifficulty::College)
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_starts_on_offense() {
        let r = round();
        assert_eq!(r.state(), RoundState::Offense);
        assert_eq!(r.player_score(), 0);
        assert_eq!(r.opponent_score(), 0);
        assert_eq!(r.defense_remaining(0.0), None);
    }

    #[test]
    fn test_start_defense_is_idempotent() {
        let mut r = round();
        let first = r.start_defense_round(2.0).expect("should start");
        assert_eq!(first.round_id, 1);
        assert!((first.expires_at - (2.0 + DEFENSE_ROUND_DURATION)).abs() < 1e-9);
        assert!(r.start_defense_round(3.0).is_none());
        assert_eq!(r.defense_round_id(), 1);
        assert_eq!(r.state(), RoundState::Defense);
    }

    #[test]
    fn test_defense_win_awards_nothing() {
        let mut r = round();
        r.start_defense_round(0.0);
        let outcome = r.end_defense_round(true, &mut rng()).expect("should end");
        assert!(outcome.won);
        assert_eq!(outcome.opponent_points, 0);
        assert_eq!(r.opponent_score(), 0);
        assert_eq!(r.state(), RoundState::Offense);
        assert_eq!(r.stats().defense_rounds_won, 1);
    }

    #[test]
    fn test_defense_loss_awards_three_or_seven() {
        let mut rng = rng();
        for _ in 0..50 {
            let mut r = round();
            r.start_defense_round(0.0);
            let outcome = r.end_defense_round(false, &mut rng).expect("should end");
            assert!(
                outcome.opponent_points == 3 || outcome.opponent_points == 7,
                "unexpected points {}",
                outcome.opponent_points
            );
            assert_eq!(r.opponent_score(), outcome.opponent_points);
        }
    }

    #[test]
    fn test_end_defense_outside_defense_is_noop() {
        let mut r = round();
        assert!(r.end_defense_round(false, &mut rng()).is_none());
        assert_eq!(r.opponent_score(), 0);
        assert_eq!(r.stats().defense_rounds_failed, 0);
    }

    #[test]
    fn test_timeout_after_round_ended_is_noop() {
        let mut r = round();
        let mut rng = rng();
        let defense = r.start_defense_round(0.0).unwrap();
        r.end_defense_round(true, &mut rng).unwrap();
        assert!(r.on_defense_timeout(defense.round_id, &mut rng).is_none());
        assert_eq!(r.opponent_score(), 0);
    }

    #[test]
    fn test_stale_timeout_does_not_end_next_round() {
        let mut r = round();
        let mut rng = rng();
        let first = r.start_defense_round(0.0).unwrap();
        r.end_defense_round(true, &mut rng).unwrap();
        let second = r.start_defense_round(5.0).unwrap();
        assert_ne!(first.round_id, second.round_id);

        assert!(r.on_defense_timeout(first.round_id, &mut rng).is_none());
        assert_eq!(r.state(), RoundState::Defense);

        let outcome = r.on_defense_timeout(second.round_id, &mut rng).unwrap();
        assert!(!outcome.won);
        assert_eq!(r.opponent_score(), outcome.opponent_points);
        // A second expiry for the same round must not score again.
        assert!(r.on_defense_timeout(second.round_id, &mut rng).is_none());
        assert_eq!(r.opponent_score(), outcome.opponent_points);
    }

    #[test]
    fn test_states_alternate() {
        let mut r = round();
        let mut rng = rng();
        for i in 0..4 {
            assert_eq!(r.state(), RoundState::Offense);
            r.start_defense_round(i as f64 * 10.0).unwrap();
            assert_eq!(r.state(), RoundState::Defense);
            r.end_defense_round(i % 2 == 0, &mut rng).unwrap();
        }
        assert_eq!(r.stats().defense_rounds_won, 2);
        assert_eq!(r.stats().defense_rounds_failed, 2);
    }

    #[test]
    fn test_carrier_spawn_pauses_spawning() {
        let mut r = round();
        r.start_defense_round(0.0);
        r.on_ball_carrier_spawned();
        assert!(r.spawning_paused());
        assert!(r.ball_carrier_active());

        r.end_defense_round(true, &mut rng()).unwrap();
        assert!(!r.spawning_paused());
        assert!(!r.ball_carrier_active());
    }

    #[test]
    fn test_defense_remaining_counts_down() {
        let mut r = round();
        r.start_defense_round(4.0);
        let remaining = r.defense_remaining(7.0).unwrap();
        assert!((remaining - (DEFENSE_ROUND_DURATION - 3.0)).abs() < 1e-9);
        assert_eq!(r.defense_remaining(100.0), Some(0.0));
    }

    #[test]
    fn test_opponent_zero_is_noop() {
        let mut r = round();
        r.increase_opponent_score(0);
        assert_eq!(r.opponent_score(), 0);
        r.increase_opponent_score(7);
        assert_eq!(r.opponent_score(), 7);
    }

    #[test]
    fn test_death_reset_kills_pending_timer() {
        let mut r = round();
        let mut rng = rng();
        r.increase_score(7);
        let defense = r.start_defense_round(0.0).unwrap();
        r.on_player_death_reset();
        assert_eq!(r.state(), RoundState::Offense);
        assert_eq!(r.player_score(), 0);
        assert!(r.on_defense_timeout(defense.round_id, &mut rng).is_none());
        assert_eq!(r.opponent_score(), 0);
    }

    #[test]
    fn test_rates_are_floored() {
        let mut r = round();
        r.set_scroll_speed(-3.0);
        r.set_spawn_rate(0.0);
        assert_eq!(r.scroll_speed(), MIN_SCROLL_SPEED);
        assert_eq!(r.spawn_rate(), MIN_PUBLISHED_SPAWN_RATE);
        assert_eq!(
            r.drain_broadcasts(),
            vec![
                RateChange::ScrollSpeed(MIN_SCROLL_SPEED),
                RateChange::SpawnRate(MIN_PUBLISHED_SPAWN_RATE)
            ]
        );
        assert!(r.drain_broadcasts().is_empty());
    }

    #[test]
    fn test_apply_difficulty_publishes_profile() {
        let mut r = RoundManager::new(Tuning::default(), GameDayDifficulty::Pro);
        r.apply_difficulty();
        let changes = r.drain_broadcasts();
        assert!(changes.contains(&RateChange::SpawnRate(PRO_SPAWN_RATE)));
        assert!(changes.contains(&RateChange::ScrollSpeed(DEFAULT_SCROLL_SPEED)));
    }

    #[test]
    fn test_roll_is_reproducible() {
        let mut a = rng();
        let mut b = rng();
        let rolls_a: Vec<u32> = (0..20).map(|_| roll_opponent_points(&mut a)).collect();
        let rolls_b: Vec<u32> = (0..20).map(|_| roll_opponent_points(&mut b)).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_profiles() {
        let tuning = Tuning::default();
        let easy = iowa_profile(Difficulty::Easy, &tuning);
        let hard = iowa_profile(Difficulty::Hard, &tuning);
        assert_eq!(easy.spawn_rate, EASY_SPAWN_RATE);
        assert_eq!(easy.balloon_bob_amplitude, 0.0);
        assert!(!easy.tornadoes);
        assert!(hard.tornadoes);
        assert!(hard.balloon_bob_amplitude > iowa_profile(Difficulty::Normal, &tuning).balloon_bob_amplitude);

        let college = game_day_profile(GameDayDifficulty::College, &tuning);
        let pro = game_day_profile(GameDayDifficulty::Pro, &tuning);
        assert!(pro.goal_opening_half_height < college.goal_opening_half_height);
        assert!(pro.spawn_rate < college.spawn_rate);
    }

    #[test]
    fn test_iowa_score() {
        let mut iowa = IowaManager::new(Tuning::default(), Difficulty::Normal);
        iowa.increase_score(1);
        iowa.increase_score(1);
        assert_eq!(iowa.score(), 2);
        iowa.reset_score();
        assert_eq!(iowa.score(), 0);
    }

    #[test]
    fn test_bridge_routes_by_mode() {
        let mut iowa = ModeManager::new(
            GameMode::Iowa,
            Tuning::default(),
            Difficulty::Hard,
            GameDayDifficulty::College,
        );
        iowa.increase_score(1);
        assert_eq!(iowa.player_score(), 1);
        assert_eq!(iowa.opponent_score(), 0);
        assert!(iowa.game_day().is_none());
        assert_eq!(iowa.difficulty_label(), "Hard");

        let mut game_day = ModeManager::new(
            GameMode::GameDay,
            Tuning::default(),
            Difficulty::Hard,
            GameDayDifficulty::Pro,
        );
        game_day.increase_score(TOUCHDOWN_POINTS);
        if let Some(round) = game_day.game_day_mut() {
            round.increase_opponent_score(FIELD_GOAL_POINTS);
        }
        assert_eq!(game_day.player_score(), 7);
        assert_eq!(game_day.opponent_score(), 3);
        assert_eq!(game_day.mode(), GameMode::GameDay);
        assert_eq!(game_day.difficulty_label(), "Pro");
    }

    #[test]
    fn test_bridge_difficulty_change_republishes_rates() {
        let mut iowa = ModeManager::new(
            GameMode::Iowa,
            Tuning::default(),
            Difficulty::Easy,
            GameDayDifficulty::College,
        );
        iowa.drain_broadcasts();
        iowa.set_difficulty(Difficulty::Hard, GameDayDifficulty::Pro);
        assert_eq!(iowa.difficulty_label(), "Hard");
        assert!(iowa.profile(&Tuning::default()).tornadoes);
        iowa.apply_difficulty();
        assert!(iowa
            .drain_broadcasts()
            .contains(&RateChange::SpawnRate(HARD_SPAWN_RATE)));

        let mut game_day = ModeManager::new(
            GameMode::GameDay,
            Tuning::default(),
            Difficulty::Easy,
            GameDayDifficulty::College,
        );
        game_day.set_difficulty(Difficulty::Hard, GameDayDifficulty::Pro);
        assert_eq!(game_day.difficulty_label(), "Pro");
        game_day.apply_difficulty();
        assert!(game_day
            .drain_broadcasts()
            .contains(&RateChange::SpawnRate(PRO_SPAWN_RATE)));
    }
}
