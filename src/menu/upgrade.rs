use super::*;

/// Upgrade menu: ↑/↓ move the cursor, Enter buys, Escape resumes, Q ends the run.
pub fn upgrade_menu_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut cursor: ResMut<UpgradeCursor>,
    mut stats: ResMut<PlayerStats>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::ArrowDown) {
        cursor.move_down(stats.len());
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        cursor.move_up();
    }

    if keys.just_pressed(KeyCode::Enter) {
        let index = cursor.selection;
        let mut score = session.score;
        if let Some(spent) = stats.purchase(index, &mut score) {
            session.score = score;
            if let Some(stat) = stats.at(index) {
                debug!(
                    "Bought {} level {} for {spent:.0}",
                    stat.name(),
                    stat.level()
                );
            }
        }
    }

    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Running);
    } else if keys.just_pressed(KeyCode::KeyQ) {
        info!("Run abandoned from the upgrade menu");
        next_state.set(GameState::WinLoss);
    }
}
