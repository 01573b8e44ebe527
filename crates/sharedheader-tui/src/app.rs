use crate::events::{should_quit, Event, EventHandler};
use crate::ui;
use crate::views::{ListView, StripView};
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use sharedheader_core::{clamp_index, PagerConfig, PagerResult};
use sharedheader_pager::PagerController;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const FAST_SCROLL_ROWS: f32 = 5.0;

pub struct App {
    pub should_quit: bool,
    pub controller: PagerController,
    pub strip: Arc<StripView>,
    pub lists: Vec<Arc<ListView>>,
    /// Index last reported through `on_select`, as the pager owner sees it.
    pub selected: usize,
    animated_index: Arc<Mutex<String>>,
    bridge: JoinHandle<()>,
    select_rx: mpsc::UnboundedReceiver<usize>,
}

impl App {
    /// Must be called inside a tokio runtime.
    pub fn new(config: PagerConfig) -> PagerResult<Self> {
        let strip = StripView::new();
        let (select_tx, select_rx) = mpsc::unbounded_channel();
        let controller = PagerController::new(config, strip.clone(), move |index| {
            if select_tx.send(index).is_err() {
                tracing::warn!(index, "selection dropped, app is shutting down");
            }
        })?;

        let header_rows = controller.header_height();
        let lists = controller
            .pages()
            .into_iter()
            .map(|channel| ListView::new(channel, header_rows))
            .collect::<PagerResult<Vec<_>>>()?;

        let animated_index = Arc::new(Mutex::new(String::from("-")));
        let label = Arc::clone(&animated_index);
        let bridge = controller
            .index_observer()
            .bridge(move |value| *label.lock() = format!("{:.2}", value));

        Ok(Self {
            should_quit: false,
            selected: controller.selected_index(),
            controller,
            strip,
            lists,
            animated_index,
            bridge,
            select_rx,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn animated_index(&self) -> String {
        self.animated_index.lock().clone()
    }

    pub fn active_list(&self) -> Option<&Arc<ListView>> {
        self.lists.get(self.controller.selected_index())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if should_quit(&key) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll_active(1.0),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_active(-1.0),
            KeyCode::Char('d') | KeyCode::PageDown => self.scroll_active(FAST_SCROLL_ROWS),
            KeyCode::Char('u') | KeyCode::PageUp => self.scroll_active(-FAST_SCROLL_ROWS),
            KeyCode::Char('l') | KeyCode::Right => self.swipe(1),
            KeyCode::Char('h') | KeyCode::Left => self.swipe(-1),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(index) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    if index < self.controller.page_count() {
                        self.controller.set_selected_index(index);
                    }
                }
            }
            _ => {}
        }
    }

    fn scroll_active(&self, rows: f32) {
        if let Some(list) = self.active_list() {
            list.scroll_by(rows);
        }
    }

    fn swipe(&self, direction: i64) {
        let current = self.controller.selected_index() as i64;
        let target = clamp_index(current + direction, self.controller.page_count());
        if target as i64 == current {
            return;
        }
        self.strip.fling_to(target as f32 * self.controller.page_width());
    }

    /// Advance strip motion one frame and forward it to the controller.
    pub fn on_tick(&mut self) {
        if let Some(frame) = self.strip.tick() {
            self.controller.on_pager_scroll(frame.offset);
            if frame.settled {
                self.controller.on_momentum_end();
            }
        }
        self.drain_selections();
    }

    /// Act as the pager owner: record `on_select` and feed it back as the selected index.
    fn drain_selections(&mut self) {
        while let Ok(index) = self.select_rx.try_recv() {
            self.selected = index;
            self.controller.set_selected_index(index);
        }
    }

    pub fn on_resize(&mut self, width: u16) {
        if let Err(e) = self.controller.resize(width.max(1) as f32) {
            tracing::error!("Failed to resize pager: {}", e);
        }
    }

    pub async fn run(&mut self) -> PagerResult<()> {
        let mut terminal = setup_terminal()?;
        let size = terminal.size()?;
        self.on_resize(size.width);

        let mut events = EventHandler::new();
        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key_event(key),
                Some(Event::Resize(width, _)) => self.on_resize(width),
                Some(Event::Tick) => self.on_tick(),
                None => break,
            }
        }
        events.stop();

        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.bridge.abort();
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
