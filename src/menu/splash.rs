use super::*;

/// Splash screen: ↑/↓ move the cursor, Enter activates the selected item.
pub fn splash_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<MenuState>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        menu.splash_selection = menu.splash_selection.previous();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        menu.splash_selection = menu.splash_selection.next();
    }
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    match menu.splash_selection {
        SplashOption::Play => {
            session.controls_seen = true;
            info!("Starting run on {}", session.difficulty.label());
            next_state.set(GameState::Running);
        }
        SplashOption::Controls => next_state.set(GameState::Controls),
        SplashOption::Difficulty => next_state.set(GameState::DifficultySelect),
        SplashOption::Quit => {
            exit.write(AppExit::Success);
        }
    }
}

/// Difficulty picker: ↑ easier, ↓ harder, Enter back to the splash screen.
pub fn difficulty_select_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::ArrowUp) {
        session.difficulty = session.difficulty.easier();
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        session.difficulty = session.difficulty.harder();
    }
    if keys.just_pressed(KeyCode::Enter) {
        info!("Difficulty set to {}", session.difficulty.label());
        next_state.set(GameState::Splash);
    }
}

/// Controls pages: ←/→ flip pages, Enter back to the splash screen.
///
/// Visiting this screen counts as having seen the controls.
pub fn controls_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<MenuState>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Splash);
    } else if keys.just_pressed(KeyCode::ArrowRight) {
        menu.next_page();
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        menu.previous_page();
    }
    session.controls_seen = true;
}
