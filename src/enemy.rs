//! Enemies: mines and orbiters.
//!
//! Every enemy carries an [`Enemy`] component whose [`EnemyBehavior`] selects
//! the per-tick steering.  One tick of an enemy, in order:
//!
//! 1. **Behavior**: face the craft and set speeds (mine pursuit or the orbiter
//!    state machine, which may fire).
//! 2. **Collisions**: touching the craft costs the enemy its points and its
//!    life and hurts the craft; touching another enemy (re)starts a short
//!    bounce away from it.
//! 3. **Bounce**: while the bounce timer runs the enemy is nudged away from
//!    the enemy it touched.
//! 4. **Integrate**: move by the kinematic speeds and clamp into the arena.
//!
//! Destroying an enemy always credits its current point value, see
//! [`destroy_enemy`].

use crate::audio::SoundCue;
use crate::body::{destroy_body, fire_bullet, Arena, Body, Frame, Kinematics, ShotSpec, Tint};
use crate::catalog::{ModelCatalog, ModelKind};
use crate::collision::{collides, list_collides, BoundingSphere};
use crate::config::GameConfig;
use crate::constants::*;
use crate::craft::Craft;
use crate::damage::DamageMessage;
use crate::session::{Difficulty, GameRng, Session};
use bevy::prelude::*;
use rand::Rng;

// ── Components ────────────────────────────────────────────────────────────────

/// Orbiter attack cycle.
///
/// `Start → PausedPreFire → Firing → PausedPostFire → ChooseDirection → Moving → Start`,
/// with `OutOfRange` pre-empting any phase while the craft is outside the
/// standoff band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbiterPhase {
    #[default]
    Start,
    PausedPreFire,
    Firing,
    PausedPostFire,
    ChooseDirection,
    Moving,
    OutOfRange,
}

/// Orbiter state: current phase and seconds spent in it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbiterBrain {
    pub phase: OrbiterPhase,
    pub elapsed: f32,
}

impl OrbiterBrain {
    /// One tick of the orbiter.  Returns `true` when it should fire now.
    ///
    /// Radial speed always closes on the ideal range and vertical speed on the
    /// craft's altitude; the phase then decides strafing and firing.
    pub fn step(
        &mut self,
        kinematics: &mut Kinematics,
        planar_distance: f32,
        altitude_gap: f32,
        dt: f32,
        rng: &mut impl Rng,
    ) -> bool {
        if dt > 0.0 {
            if planar_distance != ORBITER_IDEAL_RANGE {
                kinematics.speed = ((planar_distance - ORBITER_IDEAL_RANGE) / dt)
                    .clamp(-ORBITER_MAX_RADIAL_SPEED, ORBITER_MAX_RADIAL_SPEED);
            }
            if altitude_gap != 0.0 {
                kinematics.asc_speed = altitude_gap.clamp(-1.0 / dt, 1.0 / dt);
            }
        }

        let in_band = (planar_distance - ORBITER_IDEAL_RANGE).abs() < ORBITER_RANGE_TOLERANCE;
        if !in_band {
            self.phase = OrbiterPhase::OutOfRange;
        }

        match self.phase {
            OrbiterPhase::Start => {
                self.elapsed = 0.0;
                self.phase = OrbiterPhase::PausedPreFire;
            }
            OrbiterPhase::OutOfRange => {
                if in_band {
                    self.phase = OrbiterPhase::PausedPreFire;
                }
            }
            OrbiterPhase::PausedPreFire => {
                self.elapsed += dt;
                if self.elapsed > ORBITER_PRE_FIRE_SECS {
                    self.phase = OrbiterPhase::Firing;
                }
                kinematics.asc_speed = 0.0;
                kinematics.strafe_speed = 0.0;
            }
            OrbiterPhase::Firing => {
                self.elapsed = 0.0;
                self.phase = OrbiterPhase::PausedPostFire;
                return true;
            }
            OrbiterPhase::PausedPostFire => {
                self.elapsed += dt;
                if self.elapsed > ORBITER_POST_FIRE_SECS {
                    self.phase = OrbiterPhase::ChooseDirection;
                }
            }
            OrbiterPhase::ChooseDirection => {
                self.elapsed = 0.0;
                kinematics.strafe_speed = rng.gen_range(-ORBITER_STRAFE_SPEED..ORBITER_STRAFE_SPEED);
                self.phase = OrbiterPhase::Moving;
            }
            OrbiterPhase::Moving => {
                self.elapsed += dt;
                if self.elapsed > ORBITER_MOVE_SECS {
                    self.phase = OrbiterPhase::Start;
                }
            }
        }
        false
    }
}

/// Which steering an enemy runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    /// Homes in on the craft once it comes within awareness range.
    Mine,
    /// Holds a standoff range, fires, then strafes to reposition.
    Orbiter(OrbiterBrain),
}

/// Shared enemy state.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Enemy {
    pub hits: f32,
    /// Credited on destruction; zeroed when the enemy rams the craft.
    pub points: f32,
    /// Damage dealt to the craft on contact.
    pub collide_damage: f32,
    /// Seconds since the last enemy-enemy contact.
    pub bounce_timer: f32,
    /// Enemy last touched, with where it was last seen.
    pub bounce_from: Option<(Entity, Vec3)>,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    fn with(behavior: EnemyBehavior, hits: f32, collide_damage: f32, points: f32) -> Self {
        Self {
            hits,
            points,
            collide_damage,
            bounce_timer: ENEMY_BOUNCE_IDLE,
            bounce_from: None,
            behavior,
        }
    }

    pub fn mine(difficulty: Difficulty) -> Self {
        let (hits, collide_damage) = match difficulty {
            Difficulty::Easy => (1.0, 20.0),
            Difficulty::Medium => (1.0, 40.0),
            Difficulty::Hard => (2.0, 50.0),
        };
        Self::with(EnemyBehavior::Mine, hits, collide_damage, MINE_POINTS)
    }

    pub fn orbiter(difficulty: Difficulty) -> Self {
        let hits = match difficulty {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 3.0,
            Difficulty::Hard => 5.0,
        };
        Self::with(
            EnemyBehavior::Orbiter(OrbiterBrain::default()),
            hits,
            hits * 10.0,
            ORBITER_POINTS,
        )
    }

    pub fn kind(&self) -> ModelKind {
        match self.behavior {
            EnemyBehavior::Mine => ModelKind::Mine,
            EnemyBehavior::Orbiter(_) => ModelKind::Orbiter,
        }
    }

    /// Lose `amount` hits, ×1.5 for an orbiter caught repositioning.
    /// Returns `true` when no hits are left.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let amount = match self.behavior {
            EnemyBehavior::Orbiter(OrbiterBrain {
                phase: OrbiterPhase::Moving,
                ..
            }) => amount * ORBITER_MOVING_VULNERABILITY,
            _ => amount,
        };
        self.hits -= amount;
        self.hits <= 0.0
    }
}

/// Closing speed and red glow of a mine `distance` away from the craft.
///
/// `None` beyond awareness range: the mine keeps whatever speed it last had
/// and its glow goes out.  Speed falls to zero at the edge of the range.
pub fn mine_pursuit(distance: f32) -> Option<(f32, f32)> {
    if distance >= MINE_AWARENESS_RANGE {
        return None;
    }
    let glow = (MINE_AWARENESS_RANGE - distance) / MINE_AWARENESS_RANGE;
    let speed = MINE_MAX_SPEED - (distance / 10.0).powi(2) / 10.0;
    Some((speed, glow))
}

// ── Spawning and destruction ──────────────────────────────────────────────────

/// Spawn `enemy` at `position`, facing −Z.
pub fn spawn_enemy(
    commands: &mut Commands,
    catalog: &ModelCatalog,
    enemy: Enemy,
    position: Vec3,
) -> Entity {
    let kind = enemy.kind();
    let mut body = Body::new(kind, catalog.bounds(kind), position);
    if kind == ModelKind::Mine {
        body = body.with_sphere_scale(MINE_SPHERE_SCALE);
    }
    commands
        .spawn((body, Kinematics::default(), Tint::default(), enemy))
        .id()
}

/// Spawn a mine or an orbiter, 50/50, at a random point in the arena.
pub fn spawn_random_enemy(
    commands: &mut Commands,
    rng: &mut impl Rng,
    catalog: &ModelCatalog,
    arena: &Arena,
    difficulty: Difficulty,
) -> Entity {
    let enemy = if rng.gen_bool(0.5) {
        Enemy::mine(difficulty)
    } else {
        Enemy::orbiter(difficulty)
    };
    let y = if arena.ceiling > ENEMY_SPAWN_MIN_ALTITUDE {
        rng.gen_range(ENEMY_SPAWN_MIN_ALTITUDE..arena.ceiling)
    } else {
        arena.ceiling
    };
    let position = Vec3::new(
        rng.gen_range(-arena.wall..arena.wall),
        y,
        rng.gen_range(-arena.wall..arena.wall),
    );
    debug!("Spawning {:?} at {position}", enemy.kind());
    spawn_enemy(commands, catalog, enemy, position)
}

/// Destroy an enemy and credit its points.  A no-op if it is already destroyed.
pub fn destroy_enemy(
    commands: &mut Commands,
    entity: Entity,
    body: &mut Body,
    enemy: &Enemy,
    session: &mut Session,
) {
    if destroy_body(commands, entity, body) {
        session.add_points(enemy.points);
        debug!("{:?} destroyed for {} points", enemy.kind(), enemy.points);
    }
}

// ── System ────────────────────────────────────────────────────────────────────

/// Advance every live enemy by one tick.
///
/// Enemy spheres are snapshotted once; each entry is moved as its enemy
/// moves and dropped when it dies, so later enemies in the pass see earlier
/// ones where they now are.
#[allow(clippy::too_many_arguments)]
pub fn enemy_update_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    catalog: Res<ModelCatalog>,
    mut session: ResMut<Session>,
    mut rng: ResMut<GameRng>,
    mut enemies: Query<(Entity, &mut Body, &mut Enemy, &mut Kinematics, &mut Tint), Without<Craft>>,
    craft: Query<(Entity, &Body), With<Craft>>,
    mut damage: MessageWriter<DamageMessage>,
    mut cues: MessageWriter<SoundCue>,
) {
    let Some((craft_entity, craft_body)) = craft.iter().find(|(_, body)| body.is_active()) else {
        return;
    };
    let target = craft_body.position;
    let craft_sphere = craft_body.sphere;
    let dt = time.delta_secs();
    let arena = config.arena();

    let mut spheres: Vec<(Entity, BoundingSphere)> = enemies
        .iter()
        .filter(|(_, body, ..)| body.is_active())
        .map(|(entity, body, ..)| (entity, body.sphere))
        .collect();

    for (entity, mut body, mut enemy, mut kinematics, mut tint) in enemies.iter_mut() {
        if !body.is_active() {
            continue;
        }

        // Behavior.
        if let Some(frame) = Frame::looking_at(body.position, target) {
            body.frame = frame;
        }
        match &mut enemy.behavior {
            EnemyBehavior::Mine => match mine_pursuit(body.position.distance(target)) {
                Some((speed, glow)) => {
                    kinematics.speed = speed;
                    tint.0 = Vec3::new(glow, 0.0, 0.0);
                }
                None => tint.0 = Vec3::ZERO,
            },
            EnemyBehavior::Orbiter(brain) => {
                let planar = body.position.xz().distance(target.xz());
                let gap = target.y - body.position.y;
                if brain.step(&mut kinematics, planar, gap, dt, &mut rng.0) {
                    let shot = ShotSpec {
                        speed: ORBITER_SHOT_SPEED,
                        damage: ORBITER_SHOT_DAMAGE,
                        range: ORBITER_SHOT_RANGE,
                    };
                    fire_bullet(&mut commands, &catalog, entity, &body, shot);
                    if session.sound_enabled {
                        cues.write(SoundCue::Fired);
                    }
                }
            }
        }

        // Collisions.
        if collides(&body.sphere, &craft_sphere) {
            enemy.points = 0.0;
            destroy_enemy(&mut commands, entity, &mut body, &enemy, &mut session);
            damage.write(DamageMessage {
                target: craft_entity,
                amount: enemy.collide_damage,
            });
            spheres.retain(|(other, _)| *other != entity);
            continue;
        }
        if let Some(&other) = list_collides(entity, &body.sphere, &spheres).first() {
            let seen = spheres
                .iter()
                .find(|(e, _)| *e == other)
                .map_or(body.position, |(_, s)| s.center);
            enemy.bounce_timer = 0.0;
            enemy.bounce_from = Some((other, seen));
        }

        // Bounce.
        if enemy.bounce_timer < ENEMY_BOUNCE_SECS {
            enemy.bounce_timer += dt;
            if let Some((other, last_seen)) = enemy.bounce_from {
                let from = spheres
                    .iter()
                    .find(|(e, _)| *e == other)
                    .map_or(last_seen, |(_, s)| s.center);
                enemy.bounce_from = Some((other, from));
                if let Some(away) = Frame::looking_at(body.position, from) {
                    body.position -= away.direction * ENEMY_BOUNCE_SPEED * dt;
                }
            }
        }

        // Integrate.
        kinematics.integrate(&mut body, dt, &arena);
        if let Some(entry) = spheres.iter_mut().find(|(e, _)| *e == entity) {
            entry.1 = body.sphere;
        }
    }
}
