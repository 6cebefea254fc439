#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::Player;
    use crate::config::Tuning;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::FlappyError;
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{Position, ScreenBounds, SimTime};

    #[test]
    fn test_command_wire_format_is_tagged() {
        let cmd = PlayerCommand::SetGameDayDifficulty {
            difficulty: GameDayDifficulty::Pro,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"SetGameDayDifficulty","difficulty":"Pro"}"#);

        let back: PlayerCommand = serde_json::from_str(r#"{"type":"Flap"}"#).unwrap();
        assert!(matches!(back, PlayerCommand::Flap));
    }

    #[test]
    fn test_event_wire_format_is_tagged() {
        let event = GameEvent::DefenseEnded {
            round_id: 3,
            won: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"DefenseEnded""#));
        assert!(json.contains(r#""round_id":3"#));
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Ready);
        assert!(back.round.is_none());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance(DT);
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_bounds_edges() {
        let bounds = ScreenBounds::default();
        assert_eq!(bounds.left, -SCREEN_HALF_WIDTH);
        assert_eq!(bounds.despawn_left(DESPAWN_MARGIN), -SCREEN_HALF_WIDTH - 1.0);
        assert_eq!(bounds.despawn_right(DESPAWN_MARGIN), SCREEN_HALF_WIDTH + 1.0);
        assert_eq!(bounds.mid_y(), 0.0);

        assert!(bounds.contains(&Position::new(0.0, 0.0), 0.0));
        assert!(!bounds.contains(&Position::new(SCREEN_HALF_WIDTH + 0.5, 0.0), 0.0));
        assert!(bounds.contains(&Position::new(SCREEN_HALF_WIDTH + 0.5, 0.0), 1.0));
    }

    #[test]
    fn test_player_health_is_capped() {
        let mut player = Player::default();
        assert_eq!(player.health, PLAYER_START_HEALTH);
        assert!(!player.has_helmet());

        player.gain_health(1);
        assert!(player.has_helmet());
        player.gain_health(10);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        assert!(player.is_at_max_health());

        assert_eq!(player.take_damage(), PLAYER_MAX_HEALTH - 1);
        player.health = 0;
        assert_eq!(player.take_damage(), 0, "damage never underflows");
    }

    #[test]
    fn test_tuning_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_tuning_partial_json_uses_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"defense_round_duration": 6.0, "weights": {"pipe": 0.5}}"#)
                .unwrap();
        assert_eq!(tuning.defense_round_duration, 6.0);
        assert_eq!(tuning.weights.pipe, 0.5);
        assert_eq!(tuning.weights.balloon, BALLOON_WEIGHT);
        assert_eq!(tuning.defense_carrier_delay, DEFENSE_CARRIER_DELAY);
    }

    #[test]
    fn test_tuning_rejects_bad_values() {
        let mut tuning = Tuning::default();
        tuning.weights.helmet = -0.1;
        assert!(matches!(
            tuning.validate(),
            Err(FlappyError::InvalidTuning(_))
        ));

        let mut tuning = Tuning::default();
        tuning.defense_round_duration = 0.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.pro_spawn_rate = f64::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_spawn_rate_lookup() {
        let tuning = Tuning::default();
        assert_eq!(tuning.iowa_spawn_rate(Difficulty::Hard), HARD_SPAWN_RATE);
        assert_eq!(
            tuning.game_day_spawn_rate(GameDayDifficulty::College),
            COLLEGE_SPAWN_RATE
        );
    }

    #[test]
    fn test_collectible_effects() {
        let mut player = Player::default();
        let corn = CollectibleKind::CornKernel.apply_effect(&mut player);
        assert_eq!(corn.points, 1);
        assert_eq!(player.health, PLAYER_START_HEALTH);

        let helmet = CollectibleKind::Helmet.apply_effect(&mut player);
        assert!(helmet.helmet);
        assert_eq!(helmet.health_gained, 1);
        assert_eq!(helmet.points, 0);

        let boost = CollectibleKind::WindBoost.apply_effect(&mut player);
        assert!(boost.boost_started);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        assert_eq!(player.boost_remaining, BOOST_DURATION);

        // Already full: no health, no boost.
        player.boost_remaining = 0.0;
        let boost = CollectibleKind::WindBoost.apply_effect(&mut player);
        assert!(!boost.boost_started);
        assert_eq!(boost.health_gained, 0);
        assert_eq!(player.boost_remaining, 0.0);
    }
}
