//! Cube Dash data structures.
//!
//! World coordinates are logical units on a 1000x600 screen with y growing
//! downward. The renderer scales them to whatever terminal area it gets.

use crate::constants::*;
use rand::Rng;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the rectangles overlap with positive area.
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Glow puff emitted from under the player on take-off.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpParticle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Shrinks every tick; the particle is dropped once it reaches zero.
    pub radius: f64,
}

/// The auto-running cube.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub is_jumping: bool,
    /// Sprite rotation in degrees, always in 0..360.
    pub rotation: u32,
    pub jump_particles: Vec<JumpParticle>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: PLAYER_GROUND_LEVEL,
            velocity_y: 0.0,
            is_jumping: false,
            rotation: 0,
            jump_particles: Vec::new(),
        }
    }

    /// Launch the player if it is on the ground. Returns true if the jump
    /// happened; an airborne player ignores the request.
    pub fn jump<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_jumping {
            return false;
        }

        self.velocity_y = JUMP_FORCE;
        self.is_jumping = true;

        let origin_x = self.x + PLAYER_SIZE / 2.0;
        let origin_y = self.y + PLAYER_SIZE;
        for _ in 0..JUMP_PARTICLE_COUNT {
            self.jump_particles.push(JumpParticle {
                x: origin_x,
                y: origin_y,
                vx: rng.gen_range(-2.0..=2.0),
                vy: rng.gen_range(-5.0..=-2.0),
                radius: rng.gen_range(10..=20) as f64,
            });
        }
        true
    }

    /// One tick of gravity, ground clamp, spin and jump-particle decay.
    pub fn update(&mut self) {
        self.velocity_y += GRAVITY;
        self.y += self.velocity_y;

        if self.y > PLAYER_GROUND_LEVEL {
            self.y = PLAYER_GROUND_LEVEL;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }

        self.rotation = (self.rotation + ROTATION_STEP_DEGREES) % 360;

        for p in &mut self.jump_particles {
            p.x += p.vx;
            p.y += p.vy;
            p.radius -= JUMP_PARTICLE_SHRINK;
        }
        self.jump_particles.retain(|p| p.radius > 0.0);
    }

    /// Full sprite bounds.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Collision box, inset on every side so near misses are forgiven.
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x + PLAYER_HITBOX_INSET,
            self.y + PLAYER_HITBOX_INSET,
            PLAYER_SIZE - 2.0 * PLAYER_HITBOX_INSET,
            PLAYER_SIZE - 2.0 * PLAYER_HITBOX_INSET,
        )
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + PLAYER_SIZE / 2.0, self.y + PLAYER_SIZE / 2.0)
    }
}

/// Obstacle variants. Only the footprint differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Spike,
    Block,
}

impl ObstacleKind {
    pub fn width(&self) -> f64 {
        match self {
            Self::Spike => SPIKE_WIDTH,
            Self::Block => BLOCK_WIDTH,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Self::Spike => SPIKE_HEIGHT,
            Self::Block => BLOCK_HEIGHT,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<bool>() {
            Self::Spike
        } else {
            Self::Block
        }
    }
}

/// A single obstacle resting on the ground.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    /// Whether the player has cleared this obstacle (for scoring).
    pub passed: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64) -> Self {
        Self {
            kind,
            x,
            y: GROUND_Y - kind.height(),
            passed: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.kind.width()
    }

    pub fn height(&self) -> f64 {
        self.kind.height()
    }

    pub fn update(&mut self) {
        self.x -= GAME_SPEED;
    }

    /// Collision box, same as the visual bounds.
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    /// True once the right edge has scrolled past the left screen edge.
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.width()
    }
}

/// Explosion debris. Purely cosmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining ticks.
    pub life: i32,
    pub color: (u8, u8, u8),
}

impl Particle {
    pub fn new<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vx: rng.gen_range(-5.0..=5.0),
            vy: rng.gen_range(-10.0..=-5.0),
            life: EXPLOSION_PARTICLE_LIFETIME,
            color: (
                rng.gen_range(200..=255),
                rng.gen_range(100..=200),
                rng.gen_range(50..=100),
            ),
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += PARTICLE_GRAVITY;
        self.life -= 1;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Remaining life as a fraction of the starting lifetime.
    pub fn fade(&self) -> f64 {
        (self.life as f64 / EXPLOSION_PARTICLE_LIFETIME as f64).clamp(0.0, 1.0)
    }
}

/// Run phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Main game state. Exclusively owns every entity.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,

    pub player: Player,
    /// Active obstacles, in spawn order (left to right).
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,

    // -- Scoring --
    pub score: u32,
    /// Best score seen this session. Survives `reset`.
    pub best_score: u32,

    // -- Spawning --
    /// Ticks since the last spawn.
    pub obstacle_timer: u32,
    /// Ticks between the previous spawn and the next one.
    pub next_spawn_interval: u32,

    /// Horizontal offset of the background grid, in 0..100.
    pub bg_offset: f64,

    // -- Timing --
    /// Sub-tick time accumulator (microseconds).
    pub accumulated_time_us: u64,
    /// Physics ticks elapsed in the current run.
    pub tick_count: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            best_score: 0,
            obstacle_timer: 0,
            next_spawn_interval: INITIAL_SPAWN_INTERVAL,
            bg_offset: 0.0,
            accumulated_time_us: 0,
            tick_count: 0,
        }
    }

    /// Start a fresh run, keeping only the session best score.
    pub fn reset(&mut self) {
        let best_score = self.best_score.max(self.score);
        *self = Self {
            best_score,
            ..Self::new()
        };
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spawn one obstacle at the right edge and draw the next interval.
    pub fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let kind = ObstacleKind::random(rng);
        self.obstacles.push(Obstacle::new(kind, SCREEN_WIDTH));
        self.obstacle_timer = 0;
        self.next_spawn_interval = rng.gen_range(SPAWN_INTERVAL_MIN..=SPAWN_INTERVAL_MAX);
    }

    /// Burst of explosion debris at the player's center.
    pub fn spawn_explosion<R: Rng>(&mut self, rng: &mut R) {
        let (cx, cy) = self.player.center();
        self.particles
            .extend((0..EXPLOSION_PARTICLE_COUNT).map(|_| Particle::new(cx, cy, rng)));
    }
}
