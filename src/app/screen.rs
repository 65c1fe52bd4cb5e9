//! Media screen lifecycle: open, load, close

use mediamaster::adapter::Recycler;
use mediamaster::loader;
use mediamaster::logic::formatting::format_date_added;
use mediamaster::utils::log_debug;
use mediamaster::MediaCategory;

use crate::services::{QueryRequest, QueryResponse};
use crate::App;

impl App {
    /// Open the screen for an entry token (`IMAGES`, `VIDEOS`, ...)
    ///
    /// Unknown tokens never open a screen; no permission is requested and
    /// nothing is loaded.
    pub fn open_category_token(&mut self, token: &str) {
        match MediaCategory::from_token(token) {
            Some(category) => self.open_screen(category),
            None => {
                log_debug(&format!("Screen: rejected unknown category token '{}'", token));
                self.model
                    .show_toast(format!("Error: Unknown category '{}'", token));
            }
        }
    }

    /// Open a fresh media screen and start its permission flow
    pub fn open_screen(&mut self, category: MediaCategory) {
        self.recycler = Recycler::new();
        self.thumbnails.reset();

        let id = self.model.open_screen(category).id;
        log_debug(&format!("Screen: opened {} (screen {})", category, id));

        self.run_permission_check();
    }

    /// Back to the home list; a load still in flight is discarded on arrival
    pub fn close_screen(&mut self) {
        if let Some(screen) = &self.model.screen {
            log_debug(&format!("Screen: closed {} (screen {})", screen.category, screen.id));
        }
        self.model.close_screen();
        self.recycler = Recycler::new();
        self.thumbnails.reset();
    }

    /// Start the one content load of the open screen
    pub(crate) fn start_load(&mut self) {
        let Some(screen) = self.model.screen.as_mut() else {
            return;
        };
        if !screen.begin_load() {
            log_debug(&format!("Screen: {} already loaded, skipping", screen.category));
            return;
        }

        let request = QueryRequest {
            screen_id: screen.id,
            category: screen.category,
        };
        if self.query_tx.send(request).is_err() {
            log_debug("Screen: query service unavailable");
            screen.finish_load(Vec::new());
        }
    }

    /// Install query results if their screen is still open
    pub fn handle_query_response(&mut self, response: QueryResponse) {
        let QueryResponse {
            screen_id,
            category,
            rows,
        } = response;

        let Some(screen) = self.model.screen_mut(screen_id) else {
            log_debug(&format!(
                "Screen: dropping {} rows for closed screen {} ({})",
                rows.len(),
                screen_id,
                category
            ));
            return;
        };

        screen.finish_load(rows);
        self.recycler.invalidate();
    }

    /// Formatted date the selected entry was added, cached per entry
    pub(crate) fn selected_date(&mut self) -> Option<String> {
        let uri = self
            .model
            .screen
            .as_ref()?
            .selected_entry()?
            .uri()?
            .clone();

        if let Some((cached_uri, date)) = &self.selected_date {
            if *cached_uri == uri {
                return date.clone();
            }
        }

        let date = loader::date_added(self.store.as_ref(), &uri).and_then(format_date_added);
        self.selected_date = Some((uri, date.clone()));
        date
    }
}
