//! Memory Match entry point
//!
//! Handles platform-specific initialization. The web build drives the DOM;
//! the native build runs a text session on stdin/stdout.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use memory_match::audio::{AudioManager, SoundEffect};
    use memory_match::persistence::{KeyValueStore, MemoryStore, Persistence, StoreError};
    use memory_match::platform::storage::WebStorage;
    use memory_match::platform::timer::Timeout;
    use memory_match::{Difficulty, Game, GameEvent, ui};

    /// Game instance plus everything bound to the page
    struct App {
        game: Game,
        audio: AudioManager,
        document: Document,
        /// Pending mismatch revert; dropped (cancelled) on new game
        revert_timer: Option<Timeout>,
        notice_timer: Option<Timeout>,
    }

    type AppRef = Rc<RefCell<App>>;

    fn store_or_memory(store: Result<WebStorage, StoreError>) -> Box<dyn KeyValueStore> {
        match store {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - progress will not survive a reload", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    /// `?difficulty=hard` style override
    fn difficulty_from_query() -> Option<Difficulty> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("difficulty="))
            .and_then(Difficulty::from_str)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Memory Match starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let persistence = Persistence::from_boxed(
            store_or_memory(WebStorage::session()),
            store_or_memory(WebStorage::local()),
        );
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::seeded(persistence, seed);
        log::info!("Game initialized with seed: {}", seed);

        if let Some(difficulty) = difficulty_from_query() {
            if game.settings().pairs != difficulty.pairs() {
                log::info!("Difficulty from URL: {}", difficulty.as_str());
                game.set_difficulty(difficulty);
            }
        }

        let audio = AudioManager::new(game.settings().effective_volume());
        let app = Rc::new(RefCell::new(App {
            game,
            audio,
            document: document.clone(),
            revert_timer: None,
            notice_timer: None,
        }));

        setup_board(&document, app.clone());
        setup_new_game_button(&document, app.clone());
        setup_sound_button(&document, app.clone());

        // A mismatch left over from before the reload still needs to flip back
        let pending = app.borrow().game.resume();
        apply_events(&app, pending.into_iter().collect());

        log::info!("Memory Match running!");
    }

    /// Play sounds, arm timers and redraw for a batch of events
    fn apply_events(app: &AppRef, events: Vec<GameEvent>) {
        for event in events {
            if let Some(effect) = SoundEffect::for_event(&event) {
                app.borrow().audio.play(effect);
            }
            match event {
                GameEvent::Mismatched { ticket, delay_ms } => {
                    let weak = Rc::downgrade(app);
                    let timer = Timeout::schedule(delay_ms, move || on_revert_due(weak, ticket));
                    if timer.is_none() {
                        log::warn!("Could not schedule revert timer");
                    }
                    app.borrow_mut().revert_timer = timer;
                }
                GameEvent::Completed { moves, rank } => {
                    show_notice(app, &ui::completion_message(moves, rank));
                }
                GameEvent::NewGame { .. } => {
                    app.borrow_mut().revert_timer = None;
                }
                _ => {}
            }
        }
        render(&app.borrow());
    }

    fn on_revert_due(app: Weak<RefCell<App>>, ticket: memory_match::sim::RevertTicket) {
        let Some(app) = app.upgrade() else { return };
        let events = {
            let mut a = app.borrow_mut();
            a.revert_timer = None;
            a.game.resolve_mismatch(ticket)
        };
        apply_events(&app, events);
    }

    /// Non-blocking completion banner
    fn show_notice(app: &AppRef, message: &str) {
        let mut a = app.borrow_mut();
        let Some(el) = a.document.get_element_by_id("notice") else {
            log::info!("{}", message);
            return;
        };
        el.set_text_content(Some(message));
        el.set_class_name("notice");

        let hide = el.clone();
        let delay = a.game.settings().notice_ms;
        a.notice_timer = Timeout::schedule(delay, move || {
            hide.set_class_name("notice hidden");
        });
    }

    fn render(app: &App) {
        let document = &app.document;
        let state = app.game.state();

        if let Some(board) = document.get_element_by_id("board") {
            let tiles = ui::tiles(state);
            if board.child_element_count() as usize != tiles.len() {
                rebuild_board(document, &board, tiles.len());
            }
            for (index, tile) in tiles.iter().enumerate() {
                let selector = format!("[data-index=\"{}\"]", index);
                if let Some(el) = board.query_selector(&selector).ok().flatten() {
                    el.set_class_name(tile.class_name());
                    el.set_text_content(Some(&tile.label));
                }
            }
        }

        if let Some(el) = document.get_element_by_id("moves") {
            el.set_text_content(Some(&ui::moves_text(state.moves)));
        }
        if let Some(el) = document.get_element_by_id("total-moves") {
            el.set_text_content(Some(&ui::total_moves_text(state.total_moves)));
        }
        if let Some(el) = document.get_element_by_id("best") {
            let best = app.game.records().best_for(state.pairs());
            el.set_text_content(Some(&ui::best_text(best)));
        }
        if let Some(el) = document.get_element_by_id("sound-btn") {
            let label = if app.game.settings().sound { "Sound: On" } else { "Sound: Off" };
            el.set_text_content(Some(label));
        }
    }

    fn rebuild_board(document: &Document, board: &Element, count: usize) {
        board.set_inner_html("");
        for index in 0..count {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            let _ = button.set_attribute("data-index", &index.to_string());
            let _ = board.append_child(&button);
        }
    }

    /// One delegated click handler for every tile
    fn setup_board(document: &Document, app: AppRef) {
        let Some(board) = document.get_element_by_id("board") else {
            log::error!("No #board element");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-index]").ok().flatten())
                .and_then(|el| el.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                let events = app.borrow_mut().game.click(index);
                apply_events(&app, events);
            }
        });
        let _ = board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_new_game_button(document: &Document, app: AppRef) {
        if let Some(btn) = document.get_element_by_id("new-game-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let events = app.borrow_mut().game.new_game();
                apply_events(&app, events);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sound_button(document: &Document, app: AppRef) {
        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let sound = !a.game.settings().sound;
                a.game.set_sound(sound);
                let volume = a.game.settings().effective_volume();
                a.audio.set_volume(volume);
                log::info!("Sound: {}", sound);
                render(&a);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Memory Match (native) starting...");
    log::info!("Native mode keeps progress in memory - run with `trunk serve` for the web version");

    native_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{self, BufRead, Write};
    use std::thread;
    use std::time::Duration;

    use memory_match::persistence::Persistence;
    use memory_match::{Difficulty, Game, GameEvent, ui};

    const HELP: &str = "Enter a tile number to flip it, `new` for a new game, \
                        `easy`/`normal`/`hard` to change size, `quit` to leave.";

    pub fn run() {
        let seed = rand::random::<u64>();
        let mut game = Game::seeded(Persistence::in_memory(), seed);
        log::info!("Game initialized with seed: {}", seed);

        println!("{}", HELP);
        print_game(&game);

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let command = line.trim();
            let events = match command {
                "q" | "quit" | "exit" => break,
                "n" | "new" => game.new_game(),
                "" => Vec::new(),
                other => {
                    if let Some(difficulty) = Difficulty::from_str(other) {
                        game.set_difficulty(difficulty)
                    } else if let Ok(index) = other.parse::<usize>() {
                        game.click(index)
                    } else {
                        println!("{}", HELP);
                        Vec::new()
                    }
                }
            };
            handle_events(&mut game, events);
            print_game(&game);
        }
    }

    fn handle_events(game: &mut Game, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Mismatched { ticket, delay_ms } => {
                    print_game(game);
                    println!("No match.");
                    thread::sleep(Duration::from_millis(delay_ms as u64));
                    game.resolve_mismatch(ticket);
                }
                GameEvent::Matched { .. } => println!("Match!"),
                GameEvent::Completed { moves, rank } => {
                    println!("{}", ui::completion_message(moves, rank));
                }
                _ => {}
            }
        }
    }

    fn print_game(game: &Game) {
        let state = game.state();
        println!();
        println!("{}", ui::moves_text(state.moves));
        println!("{}", ui::total_moves_text(state.total_moves));
        println!("{}", ui::best_text(game.records().best_for(state.pairs())));
        print!("{}", ui::render_text_board(state));
        let _ = io::stdout().flush();
    }
}
