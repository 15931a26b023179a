// Game timing constants
pub const TICKS_PER_SECOND: u64 = 60;
pub const TICK_INTERVAL_MICROS: u64 = 1_000_000 / TICKS_PER_SECOND;
/// Frame time is clamped to this before stepping physics, so a stalled
/// terminal doesn't fast-forward the run.
pub const MAX_FRAME_MICROS: u64 = 100_000;

// World dimensions (logical units, independent of terminal size)
pub const SCREEN_WIDTH: f64 = 1000.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 100.0;
/// Y coordinate of the ground surface.
pub const GROUND_Y: f64 = SCREEN_HEIGHT - GROUND_HEIGHT;

// Physics
pub const GRAVITY: f64 = 1.0;
pub const JUMP_FORCE: f64 = -20.0;
pub const GAME_SPEED: f64 = 8.0;

// Player
pub const PLAYER_X: f64 = 150.0;
pub const PLAYER_SIZE: f64 = 40.0;
pub const PLAYER_HITBOX_INSET: f64 = 10.0;
pub const PLAYER_GROUND_LEVEL: f64 = GROUND_Y - PLAYER_SIZE;
pub const ROTATION_STEP_DEGREES: u32 = 8;

// Obstacle spawning
pub const INITIAL_SPAWN_INTERVAL: u32 = 120;
pub const SPAWN_INTERVAL_MIN: u32 = 90;
pub const SPAWN_INTERVAL_MAX: u32 = 150;
pub const SPIKE_WIDTH: f64 = 40.0;
pub const SPIKE_HEIGHT: f64 = 80.0;
pub const BLOCK_WIDTH: f64 = 80.0;
pub const BLOCK_HEIGHT: f64 = 40.0;

// Effects
pub const JUMP_PARTICLE_COUNT: usize = 5;
pub const JUMP_PARTICLE_SHRINK: f64 = 0.5;
pub const EXPLOSION_PARTICLE_COUNT: usize = 30;
pub const EXPLOSION_PARTICLE_LIFETIME: i32 = 30;
pub const PARTICLE_GRAVITY: f64 = GRAVITY / 2.0;

// Background
pub const BG_SCROLL_PERIOD: f64 = 100.0;
pub const BG_SCROLL_SPEED: f64 = GAME_SPEED / 2.0;
