//! HUD text and overlay screens

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::session::SessionSummary;

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        // Skip the write when nothing changed
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }
}

/// Score, lives and best readouts
pub fn update_hud(document: &Document, score: u64, lives: u32, best: u64) {
    set_text(document, "scoreText", &format!("Score: {}", score));
    set_text(document, "livesText", &format!("Lives: {}", lives));
    set_text(document, "bestScoreText", &format!("Best: {}", best));
}

/// Show or hide the start screen
pub fn show_start_screen(document: &Document, visible: bool, best: u64) {
    let screen = document
        .get_element_by_id("startScreen")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(screen) = screen {
        let display = if visible { "flex" } else { "none" };
        let _ = screen.style().set_property("display", display);
    }
    if visible {
        set_text(document, "startBest", &format!("Best: {}", best));
    }
}

/// Game over summary
pub fn show_summary(document: &Document, summary: &SessionSummary) {
    set_text(document, "finalScore", &format!("Final Score: {}", summary.score));
    let best = if summary.new_best {
        format!("Best Score: {} (new!)", summary.best)
    } else {
        format!("Best Score: {}", summary.best)
    };
    set_text(document, "finalBest", &best);
    set_hidden(document, "gameOverModal", false);
}

pub fn hide_summary(document: &Document) {
    set_hidden(document, "gameOverModal", true);
}
