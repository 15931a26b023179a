//! Cube Dash game logic: input, fixed-step physics, collision and scoring.

use super::types::*;
use crate::constants::*;
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashInput {
    Jump,    // Space or Up arrow
    Restart, // R, only while game over
    Other,
}

/// What an input did to the game, so the front end can react (sound, logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    Jumped,
    Restarted,
    Ignored,
}

/// Apply one input immediately. Inputs are processed before the physics
/// steps of the same frame.
pub fn process_input<R: Rng>(game: &mut GameState, input: DashInput, rng: &mut R) -> InputEffect {
    match input {
        DashInput::Jump if !game.is_game_over() => {
            if game.player.jump(rng) {
                InputEffect::Jumped
            } else {
                InputEffect::Ignored
            }
        }
        DashInput::Restart if game.is_game_over() => {
            log::info!("Restarting run (previous score {})", game.score);
            game.reset();
            InputEffect::Restarted
        }
        _ => InputEffect::Ignored,
    }
}

/// Advance the game by wall-clock time. Called once per frame.
///
/// `dt_us` is microseconds since the last call. Physics runs in whole
/// 60 Hz steps; the remainder carries over to the next frame. Returns true
/// if at least one step ran.
pub fn tick_dash<R: Rng>(game: &mut GameState, dt_us: u64, rng: &mut R) -> bool {
    // Clamp to avoid a burst of catch-up steps after a stall
    let dt_us = dt_us.min(MAX_FRAME_MICROS);

    game.accumulated_time_us += dt_us;
    let mut changed = false;

    while game.accumulated_time_us >= TICK_INTERVAL_MICROS {
        game.accumulated_time_us -= TICK_INTERVAL_MICROS;
        step(game, rng);
        changed = true;
    }

    changed
}

/// Single fixed step. Gameplay only advances while running; explosion
/// debris keeps falling after game over.
pub fn step<R: Rng>(game: &mut GameState, rng: &mut R) {
    if game.phase == GamePhase::Running {
        step_running(game, rng);
    }
    update_particles(game);
}

fn step_running<R: Rng>(game: &mut GameState, rng: &mut R) {
    game.tick_count += 1;

    // 1. Player physics
    game.player.update();

    // 2. Background scroll
    game.bg_offset = (game.bg_offset - BG_SCROLL_SPEED).rem_euclid(BG_SCROLL_PERIOD);

    // 3. Spawn timer
    game.obstacle_timer += 1;
    if game.obstacle_timer >= game.next_spawn_interval {
        game.spawn_obstacle(rng);
        log::debug!(
            "tick {}: spawned obstacle, next in {} ticks",
            game.tick_count,
            game.next_spawn_interval
        );
    }

    // 4. Obstacles: move, collide, score. Collision is checked first so an
    //    obstacle hit on the tick it would be passed never scores. Every
    //    obstacle still moves on the crash tick; nothing scores after the hit.
    let player_hitbox = game.player.hitbox();
    let player_x = game.player.x;
    let mut collided = false;

    for obstacle in &mut game.obstacles {
        obstacle.update();

        if collided {
            continue;
        }

        if obstacle.hitbox().intersects(&player_hitbox) {
            collided = true;
            continue;
        }

        if !obstacle.passed && obstacle.x < player_x {
            obstacle.passed = true;
            game.score += 1;
        }
    }

    game.obstacles.retain(|o| !o.is_off_screen());

    if collided {
        enter_game_over(game, rng);
    }
}

fn enter_game_over<R: Rng>(game: &mut GameState, rng: &mut R) {
    game.phase = GamePhase::GameOver;
    game.best_score = game.best_score.max(game.score);
    game.spawn_explosion(rng);
    log::info!(
        "Game over after {} ticks, score {} (best {})",
        game.tick_count,
        game.score,
        game.best_score
    );
}

fn update_particles(game: &mut GameState) {
    for particle in &mut game.particles {
        particle.update();
    }
    game.particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    // ── Input tests ──

    #[test]
    fn test_jump_input_launches_player() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        let effect = process_input(&mut game, DashInput::Jump, &mut rng);

        assert_eq!(effect, InputEffect::Jumped);
        assert_eq!(game.player.velocity_y, JUMP_FORCE);
        assert!(game.player.is_jumping);
    }

    #[test]
    fn test_jump_input_while_airborne_is_ignored() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        process_input(&mut game, DashInput::Jump, &mut rng);
        step(&mut game, &mut rng);
        let velocity = game.player.velocity_y;

        let effect = process_input(&mut game, DashInput::Jump, &mut rng);

        assert_eq!(effect, InputEffect::Ignored);
        assert_eq!(game.player.velocity_y, velocity);
        assert_eq!(game.player.jump_particles.len(), JUMP_PARTICLE_COUNT);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.score = 3;

        let effect = process_input(&mut game, DashInput::Restart, &mut rng);

        assert_eq!(effect, InputEffect::Ignored);
        assert_eq!(game.score, 3);
    }

    #[test]
    fn test_jump_ignored_when_game_over() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.phase = GamePhase::GameOver;

        let effect = process_input(&mut game, DashInput::Jump, &mut rng);

        assert_eq!(effect, InputEffect::Ignored);
        assert!(!game.player.is_jumping);
    }

    #[test]
    fn test_other_input_does_nothing() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        assert_eq!(
            process_input(&mut game, DashInput::Other, &mut rng),
            InputEffect::Ignored
        );
    }

    // ── Timing tests ──

    #[test]
    fn test_tick_accumulates_partial_steps() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        assert!(!tick_dash(&mut game, TICK_INTERVAL_MICROS - 1, &mut rng));
        assert_eq!(game.tick_count, 0);

        assert!(tick_dash(&mut game, 1, &mut rng));
        assert_eq!(game.tick_count, 1);
        assert_eq!(game.accumulated_time_us, 0);
    }

    #[test]
    fn test_tick_clamps_long_frames() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        tick_dash(&mut game, 10_000_000, &mut rng);

        assert_eq!(game.tick_count, MAX_FRAME_MICROS / TICK_INTERVAL_MICROS);
    }

    // ── Physics tests ──

    #[test]
    fn test_background_offset_wraps() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        step(&mut game, &mut rng);
        assert_eq!(game.bg_offset, 96.0);

        for _ in 0..24 {
            step(&mut game, &mut rng);
        }
        assert_eq!(game.bg_offset, 0.0);
    }

    #[test]
    fn test_first_spawn_uses_default_interval() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        for _ in 0..INITIAL_SPAWN_INTERVAL - 1 {
            step(&mut game, &mut rng);
        }
        assert!(game.obstacles.is_empty());

        step(&mut game, &mut rng);
        assert_eq!(game.obstacles.len(), 1);
        // Spawned at the right edge, then advanced in the same tick
        assert_eq!(game.obstacles[0].x, SCREEN_WIDTH - GAME_SPEED);
        assert_eq!(game.obstacle_timer, 0);
        assert!((SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX).contains(&game.next_spawn_interval));
    }

    #[test]
    fn test_second_spawn_uses_redrawn_interval() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();

        for _ in 0..INITIAL_SPAWN_INTERVAL {
            step(&mut game, &mut rng);
        }
        let interval = game.next_spawn_interval;
        // Keep the first obstacle from reaching the idle player
        game.obstacles.clear();

        for _ in 0..interval - 1 {
            step(&mut game, &mut rng);
        }
        assert!(game.obstacles.is_empty());

        step(&mut game, &mut rng);
        assert_eq!(game.obstacles.len(), 1);
    }

    // ── Collision and scoring tests ──

    #[test]
    fn test_collision_ends_game_with_explosion() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        // Lands on x = 150 after moving, overlapping the player's hitbox
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));

        step(&mut game, &mut rng);

        assert!(game.is_game_over());
        // Burst already took one step of decay, but nothing has expired
        assert_eq!(game.particles.len(), EXPLOSION_PARTICLE_COUNT);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_collision_beats_scoring_on_same_tick() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        // After moving: x = 149 < player.x, and the spike still overlaps
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Spike, 149.0 + GAME_SPEED));

        step(&mut game, &mut rng);

        assert!(game.is_game_over());
        assert_eq!(game.score, 0);
        assert!(!game.obstacles[0].passed);
    }

    #[test]
    fn test_obstacle_scores_once() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        // Already left of the player's hitbox
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Spike, 100.0 + GAME_SPEED));

        step(&mut game, &mut rng);
        assert_eq!(game.score, 1);
        assert!(game.obstacles[0].passed);

        step(&mut game, &mut rng);
        step(&mut game, &mut rng);
        assert_eq!(game.score, 1);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_airborne_player_clears_obstacle() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.player.y = 300.0;
        game.player.is_jumping = true;
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Spike, PLAYER_X + GAME_SPEED));

        step(&mut game, &mut rng);

        assert_eq!(game.phase, GamePhase::Running);
        assert!(game.particles.is_empty());
    }

    #[test]
    fn test_crash_tick_still_advances_later_obstacles() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));
        game.obstacles.push(Obstacle::new(ObstacleKind::Spike, 600.0));

        step(&mut game, &mut rng);

        assert!(game.is_game_over());
        assert_eq!(game.obstacles.len(), 2);
        assert_eq!(game.obstacles[0].x, PLAYER_X);
        assert_eq!(game.obstacles[1].x, 600.0 - GAME_SPEED);
        assert_eq!(game.particles.len(), EXPLOSION_PARTICLE_COUNT);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_no_score_after_hit_on_crash_tick() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));
        // Would cross the player's x on this tick if it were scored
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Spike, PLAYER_X + 1.0));

        step(&mut game, &mut rng);

        assert!(game.is_game_over());
        assert_eq!(game.score, 0);
        assert!(!game.obstacles[1].passed);
    }

    #[test]
    fn test_off_screen_obstacles_removed() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        let mut gone = Obstacle::new(ObstacleKind::Block, -75.0);
        gone.passed = true;
        game.obstacles.push(gone);

        step(&mut game, &mut rng);

        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_game_over_freezes_gameplay() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));
        step(&mut game, &mut rng);
        assert!(game.is_game_over());

        let obstacle_x = game.obstacles[0].x;
        let player_y = game.player.y;
        let timer = game.obstacle_timer;
        let tick_count = game.tick_count;

        for _ in 0..10 {
            step(&mut game, &mut rng);
        }

        assert_eq!(game.obstacles[0].x, obstacle_x);
        assert_eq!(game.player.y, player_y);
        assert_eq!(game.obstacle_timer, timer);
        assert_eq!(game.tick_count, tick_count);
    }

    #[test]
    fn test_explosion_particles_decay_after_game_over() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));
        step(&mut game, &mut rng);
        let life = game.particles[0].life;

        step(&mut game, &mut rng);
        assert_eq!(game.particles[0].life, life - 1);

        for _ in 0..EXPLOSION_PARTICLE_LIFETIME {
            step(&mut game, &mut rng);
        }
        assert!(game.particles.is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = GameState::new();
        let mut rng = create_test_rng();
        game.score = 4;
        game.obstacles
            .push(Obstacle::new(ObstacleKind::Block, PLAYER_X + GAME_SPEED));
        step(&mut game, &mut rng);
        assert!(game.is_game_over());

        let effect = process_input(&mut game, DashInput::Restart, &mut rng);

        assert_eq!(effect, InputEffect::Restarted);
        assert!(!game.is_game_over());
        assert_eq!(game.score, 0);
        assert_eq!(game.best_score, 4);
        assert!(game.obstacles.is_empty());
        assert!(game.particles.is_empty());
        assert_eq!(game.player.x, PLAYER_X);
        assert_eq!(game.player.y, PLAYER_GROUND_LEVEL);
        assert_eq!(game.next_spawn_interval, INITIAL_SPAWN_INTERVAL);
    }
}
