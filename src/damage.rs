//! Damage resolution.
//!
//! Systems that hurt something write a [`DamageMessage`]; [`apply_damage_system`]
//! runs after every body has updated and routes each hit by what the target is:
//!
//! | Target  | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | craft   | difficulty-scaled shield/hull damage; hull ≤ 0 ends the run     |
//! | enemy   | hits-remaining decrement; ≤ 0 destroys it and credits points   |
//! | bullet  | always destroyed                                               |
//!
//! Hits on a body already destroyed this tick are ignored.

use crate::body::{destroy_body, Body};
use crate::craft::Craft;
use crate::enemy::{destroy_enemy, Enemy};
use crate::menu::GameState;
use crate::session::Session;
use bevy::prelude::*;

/// `amount` points of damage dealt to `target`.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DamageMessage {
    pub target: Entity,
    pub amount: f32,
}

pub fn apply_damage_system(
    mut commands: Commands,
    mut messages: MessageReader<DamageMessage>,
    mut targets: Query<(&mut Body, Option<&mut Craft>, Option<&mut Enemy>)>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for hit in messages.read() {
        let Ok((mut body, craft, enemy)) = targets.get_mut(hit.target) else {
            continue;
        };
        if !body.is_active() {
            continue;
        }

        if let Some(mut craft) = craft {
            if craft.take_damage(hit.amount, session.difficulty) {
                destroy_body(&mut commands, hit.target, &mut body);
                info!("Craft destroyed; final score {:.0}", session.score);
                next_state.set(GameState::WinLoss);
            }
        } else if let Some(mut enemy) = enemy {
            if enemy.take_damage(hit.amount) {
                destroy_enemy(&mut commands, hit.target, &mut body, &enemy, &mut session);
            }
        } else {
            destroy_body(&mut commands, hit.target, &mut body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Kinematics;
    use crate::bullet::Bullet;
    use crate::catalog::{ModelCatalog, ModelKind};
    use crate::session::Difficulty;
    use crate::stats::PlayerStats;
    use bevy::state::app::StatesPlugin;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .insert_state(GameState::Running)
            .init_resource::<Session>()
            .add_message::<DamageMessage>()
            .add_systems(Update, apply_damage_system);
        app
    }

    fn hit(app: &mut App, target: Entity, amount: f32) {
        app.world_mut().write_message(DamageMessage { target, amount });
        app.update();
    }

    fn spawn_enemy(app: &mut App, enemy: Enemy) -> Entity {
        let catalog = ModelCatalog::default();
        let body = Body::new(ModelKind::Mine, catalog.bounds(ModelKind::Mine), Vec3::new(0.0, 100.0, 0.0));
        app.world_mut().spawn((body, Kinematics::default(), enemy)).id()
    }

    #[test]
    fn killing_an_enemy_credits_its_points_once() {
        let mut app = build_test_app();
        let enemy = spawn_enemy(&mut app, Enemy::mine(Difficulty::Medium));
        app.world_mut().write_message(DamageMessage {
            target: enemy,
            amount: 5.0,
        });
        // Second hit in the same batch lands on a destroyed body.
        hit(&mut app, enemy, 5.0);

        assert_eq!(app.world().resource::<Session>().score, 50.0);
        assert!(app.world().get_entity(enemy).is_err());
    }

    #[test]
    fn surviving_enemy_only_loses_hits() {
        let mut app = build_test_app();
        let enemy = spawn_enemy(&mut app, Enemy::orbiter(Difficulty::Medium));
        hit(&mut app, enemy, 1.0);
        let remaining = app.world().get::<Enemy>(enemy).unwrap().hits;
        assert_eq!(remaining, 2.0);
        assert_eq!(app.world().resource::<Session>().score, 0.0);
    }

    #[test]
    fn craft_hull_breach_moves_to_win_loss() {
        let mut app = build_test_app();
        let stats = PlayerStats::default();
        let catalog = ModelCatalog::default();
        let craft = app
            .world_mut()
            .spawn((
                Body::new(ModelKind::Craft, catalog.bounds(ModelKind::Craft), Vec3::new(0.0, 500.0, 0.0)),
                Craft::new(&stats),
            ))
            .id();
        // 50 shield + 50 hull on medium.
        hit(&mut app, craft, 100.0);
        app.update();

        assert_eq!(
            *app.world().resource::<State<GameState>>().get(),
            GameState::WinLoss
        );
        assert!(app.world().get_entity(craft).is_err());
    }

    #[test]
    fn damaging_a_bullet_destroys_it() {
        let mut app = build_test_app();
        let parent = app.world_mut().spawn_empty().id();
        let catalog = ModelCatalog::default();
        let bullet = app
            .world_mut()
            .spawn((
                Body::new(ModelKind::Bullet, catalog.bounds(ModelKind::Bullet), Vec3::new(0.0, 10.0, 0.0)),
                Kinematics::forward(100.0),
                Bullet::new(parent, 100.0, 1.0),
            ))
            .id();
        hit(&mut app, bullet, 0.5);
        assert!(app.world().get_entity(bullet).is_err());
    }
}
