//! Selection movement on the home list and the media screen

use mediamaster::MediaCategory;

use crate::App;

impl App {
    pub fn next_item(&mut self) {
        match self.model.screen.as_mut() {
            Some(screen) => screen.select_next(),
            None => {
                self.model.ui.home_selection =
                    (self.model.ui.home_selection + 1) % MediaCategory::ALL.len();
            }
        }
    }

    pub fn previous_item(&mut self) {
        match self.model.screen.as_mut() {
            Some(screen) => screen.select_prev(),
            None => {
                let len = MediaCategory::ALL.len();
                self.model.ui.home_selection = (self.model.ui.home_selection + len - 1) % len;
            }
        }
    }

    /// Move by `delta` rows without wrapping
    pub fn page_by(&mut self, delta: isize) {
        if let Some(screen) = self.model.screen.as_mut() {
            screen.select_offset(delta);
        }
    }

    pub fn jump_to_first(&mut self) {
        match self.model.screen.as_mut() {
            Some(screen) => screen.select_first(),
            None => self.model.ui.home_selection = 0,
        }
    }

    pub fn jump_to_last(&mut self) {
        match self.model.screen.as_mut() {
            Some(screen) => screen.select_last(),
            None => self.model.ui.home_selection = MediaCategory::ALL.len() - 1,
        }
    }

    /// Open the highlighted category from the home list
    pub fn enter(&mut self) {
        if self.model.screen.is_none() {
            let token = self.model.ui.home_category().token();
            self.open_category_token(token);
        }
    }

    pub fn go_back(&mut self) {
        if self.model.screen.is_some() {
            self.close_screen();
        }
    }
}
