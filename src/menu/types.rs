use crate::constants::{CONTROL_PAGES, UPGRADE_MENU_ROWS};
use bevy::prelude::*;

/// Top-level screen state machine.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen with the four-item menu; shown on startup and after every reset.
    #[default]
    Splash,
    /// Paged help screens.
    Controls,
    /// Easy / medium / hard picker.
    DifficultySelect,
    /// Active simulation.
    Running,
    /// Simulation frozen; score can be spent on stats.
    UpgradeMenu,
    /// End of run, by hull loss or by quitting from the upgrade menu.
    WinLoss,
}

/// Items on the splash menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplashOption {
    #[default]
    Play,
    Controls,
    Difficulty,
    Quit,
}

impl SplashOption {
    pub const ALL: [SplashOption; 4] = [
        SplashOption::Play,
        SplashOption::Controls,
        SplashOption::Difficulty,
        SplashOption::Quit,
    ];

    /// The item below; the last item stays put.
    pub fn next(self) -> Self {
        match self {
            SplashOption::Play => SplashOption::Controls,
            SplashOption::Controls => SplashOption::Difficulty,
            SplashOption::Difficulty | SplashOption::Quit => SplashOption::Quit,
        }
    }

    /// The item above; the first item stays put.
    pub fn previous(self) -> Self {
        match self {
            SplashOption::Play | SplashOption::Controls => SplashOption::Play,
            SplashOption::Difficulty => SplashOption::Controls,
            SplashOption::Quit => SplashOption::Difficulty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SplashOption::Play => "Play",
            SplashOption::Controls => "Controls",
            SplashOption::Difficulty => "Difficulty",
            SplashOption::Quit => "Quit",
        }
    }
}

/// Splash selection and controls page.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub splash_selection: SplashOption,
    /// `0..CONTROL_PAGES`.
    pub controls_page: usize,
}

impl MenuState {
    pub fn next_page(&mut self) {
        if self.controls_page + 1 < CONTROL_PAGES {
            self.controls_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.controls_page = self.controls_page.saturating_sub(1);
    }
}

/// Cursor over the stat list in the upgrade menu.
///
/// `selection` indexes the catalog; the window shows `UPGRADE_MENU_ROWS` rows
/// starting at `top`, and `row` is the cursor's place in that window, so
/// `selection == top + row` always holds.  The window scrolls one row early
/// so a neighbour stays visible on each side of the cursor, except at the
/// ends of the list.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpgradeCursor {
    pub selection: usize,
    pub top: usize,
    pub row: usize,
}

impl UpgradeCursor {
    /// Move down one entry in a list of `len` stats.
    pub fn move_down(&mut self, len: usize) {
        if self.selection + 1 < len {
            self.selection += 1;
            self.row += 1;
        }
        if self.row == UPGRADE_MENU_ROWS - 1 && self.selection + 1 < len {
            self.top += 1;
            self.row = UPGRADE_MENU_ROWS - 2;
        }
    }

    pub fn move_up(&mut self) {
        if self.selection != 0 {
            self.selection -= 1;
            self.row -= 1;
        }
        if self.row == 0 && self.selection != 0 {
            self.top -= 1;
            self.row = 1;
        }
    }

    /// Catalog indices visible in the window, with the cursor row marked.
    pub fn visible(&self, len: usize) -> impl Iterator<Item = (usize, bool)> + '_ {
        (self.top..(self.top + UPGRADE_MENU_ROWS).min(len)).map(move |i| (i, i == self.selection))
    }
}
