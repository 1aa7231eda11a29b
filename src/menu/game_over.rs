use super::*;
use bevy::ecs::system::SystemParam;

/// Everything a fresh run touches.
///
/// Used at startup to set up the first run and from the win/loss screen to
/// start the next one.
#[derive(SystemParam)]
pub struct RunReset<'w, 's> {
    commands: Commands<'w, 's>,
    bodies: Query<'w, 's, (Entity, &'static Body)>,
    stats: ResMut<'w, PlayerStats>,
    session: ResMut<'w, Session>,
    menu: ResMut<'w, MenuState>,
    cursor: ResMut<'w, UpgradeCursor>,
    input: ResMut<'w, CraftInput>,
    config: Res<'w, GameConfig>,
    catalog: Res<'w, ModelCatalog>,
}

impl RunReset<'_, '_> {
    /// Level-1 stats, an empty arena with a new craft, and a zero score.
    ///
    /// Difficulty, controls-seen and the sound toggle carry over.  The splash
    /// cursor starts on Controls until the player has seen them.
    pub fn reset(&mut self) {
        for (entity, body) in &self.bodies {
            if body.model != ModelKind::Terrain {
                self.commands.entity(entity).despawn();
            }
        }
        *self.stats = PlayerStats::default();
        self.session.reset(&self.config);
        *self.cursor = UpgradeCursor::default();
        *self.input = CraftInput::default();
        self.menu.splash_selection = if self.session.controls_seen {
            SplashOption::Play
        } else {
            SplashOption::Controls
        };
        self.menu.controls_page = 0;
        spawn_craft(
            &mut self.commands,
            &self.catalog,
            &self.stats,
            self.config.craft_spawn(),
        );
        info!("New run ready on {}", self.session.difficulty.label());
    }
}

/// Startup system: set up the first run.
pub fn start_first_run(mut reset: RunReset) {
    reset.reset();
}

/// Win/loss screen: Enter starts over from the splash screen, Escape quits.
pub fn win_loss_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut reset: RunReset,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Enter) {
        reset.reset();
        next_state.set(GameState::Splash);
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
