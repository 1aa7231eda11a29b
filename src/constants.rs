//! Centralised gameplay constants.
//!
//! Every tuneable value lives here so it can be found and reasoned about in one
//! place.  [`crate::config::GameConfig`] mirrors the subset that can be
//! overridden at runtime from `assets/game.toml`; everything else is fixed.
//!
//! ## Coordinate frame
//!
//! Bevy convention: +Y is up, −Z is forward, +X is right.  The arena is the box
//! `[−BOUNDARY_WALL, BOUNDARY_WALL] × [0, BOUNDARY_CEILING] × [−BOUNDARY_WALL, BOUNDARY_WALL]`.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Half-width of the arena on the X and Z axes (world units).
pub const BOUNDARY_WALL: f32 = 2000.0;

/// Height of the arena ceiling; the floor is always at `y = 0`.
pub const BOUNDARY_CEILING: f32 = 2000.0;

/// Where a fresh craft appears at the start of every run.
pub const CRAFT_SPAWN: [f32; 3] = [0.0, 500.0, 0.0];

/// Lowest altitude a spawned enemy may appear at.
pub const ENEMY_SPAWN_MIN_ALTITUDE: f32 = 10.0;

// ── Craft: flight model ───────────────────────────────────────────────────────

/// Mass of the craft.  Force / mass gives acceleration.
pub const CRAFT_MASS: f32 = 1.0;

/// Velocity multiplier applied to each of the three velocity accumulators every tick.
pub const CRAFT_DRAG_FACTOR: f32 = 0.97;

/// Reverse thrust is this fraction of forward thrust.
pub const CRAFT_REVERSE_FACTOR: f32 = 0.5;

/// Axis value produced by the forward / reverse keys.
pub const THRUST_AXIS: f32 = 1.0;

/// Axis value produced by the strafe and ascend keys.
pub const LATERAL_AXIS: f32 = 2.0;

/// Margin kept between the craft and the X/Z walls before the hard clamp.
pub const CRAFT_WALL_INSET: f32 = 5.0;

/// Velocity scale applied to the horizontal components when bouncing off the floor.
pub const FLOOR_REBOUND_DAMPING: f32 = 0.25;

/// Self-damage taken on every floor strike.
pub const FLOOR_STRIKE_DAMAGE: f32 = 1.0;

/// Seconds after a hit during which the craft flashes white (shield) or red (hull).
pub const DAMAGE_FLASH_SECS: f32 = 0.1;

/// Time-since-damage the craft starts with so it does not flash on spawn.
pub const CRAFT_INITIAL_TIME_SINCE_DAMAGE: f32 = 1.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Seconds an enemy keeps drifting away from an enemy it touched.
pub const ENEMY_BOUNCE_SECS: f32 = 0.1;

/// Speed of the separation nudge applied while the bounce timer runs.
pub const ENEMY_BOUNCE_SPEED: f32 = 60.0;

/// Starting value of the bounce timer; anything ≥ `ENEMY_BOUNCE_SECS` means "not bouncing".
pub const ENEMY_BOUNCE_IDLE: f32 = 10.0;

/// Mines ignore the craft beyond this distance.
pub const MINE_AWARENESS_RANGE: f32 = 500.0;

/// Peak closing speed of a mine sitting on top of the craft.
pub const MINE_MAX_SPEED: f32 = 250.0;

/// Mines query collisions with a sphere this many times their model sphere.
pub const MINE_SPHERE_SCALE: f32 = 3.0;

pub const MINE_POINTS: f32 = 50.0;
pub const ORBITER_POINTS: f32 = 150.0;

/// Planar standoff distance an orbiter tries to hold from the craft.
pub const ORBITER_IDEAL_RANGE: f32 = 250.0;

/// Half-width of the band around the ideal range that counts as "in range".
pub const ORBITER_RANGE_TOLERANCE: f32 = 25.0;

/// Radial speed clamp while closing on the ideal range.
pub const ORBITER_MAX_RADIAL_SPEED: f32 = 250.0;

pub const ORBITER_PRE_FIRE_SECS: f32 = 2.0;
pub const ORBITER_POST_FIRE_SECS: f32 = 1.0;
pub const ORBITER_MOVE_SECS: f32 = 4.0;

/// Strafe speed chosen for a reposition is uniform in `[-ORBITER_STRAFE_SPEED, ORBITER_STRAFE_SPEED)`.
pub const ORBITER_STRAFE_SPEED: f32 = 300.0;

/// Damage multiplier an orbiter suffers while repositioning.
pub const ORBITER_MOVING_VULNERABILITY: f32 = 1.5;

pub const ORBITER_SHOT_SPEED: f32 = 500.0;
pub const ORBITER_SHOT_DAMAGE: f32 = 20.0;
pub const ORBITER_SHOT_RANGE: f32 = 300.0;

// ── Scoring and pacing ────────────────────────────────────────────────────────

/// Seconds between enemy spawns at the start of a run.
pub const SPAWN_DELAY_BASE: f32 = 3.0;

/// Spawn delay shaved off per whole minute survived.
pub const SPAWN_DELAY_STEP: f32 = 0.1;

/// Floor for the spawn delay.
///
/// Without it the delay reaches zero after 30 minutes and goes negative after
/// that, at which point an enemy would spawn on every single tick.
pub const MIN_SPAWN_DELAY: f32 = 0.5;

/// Score multiplier gained per whole minute survived.
pub const MULTIPLIER_STEP: f32 = 0.1;

// ── Chase camera ──────────────────────────────────────────────────────────────

/// Camera position relative to the craft, in the craft's frame (+Z is behind).
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 40.0, 70.0];

/// Look-at point relative to the craft, in the craft's frame.
pub const CAMERA_LOOK_OFFSET: [f32; 3] = [0.0, 0.0, -100.0];

pub const CAMERA_NEAR: f32 = 10.0;
pub const CAMERA_FAR: f32 = 10000.0;
pub const CAMERA_FOV_DEGREES: f32 = 45.0;

// ── Screens ───────────────────────────────────────────────────────────────────

/// Number of help pages on the controls screen.
pub const CONTROL_PAGES: usize = 4;

/// Rows visible at once in the upgrade menu.
pub const UPGRADE_MENU_ROWS: usize = 6;
