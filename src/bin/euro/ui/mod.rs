//! TUI module for euro
//!
//! Shows the panes of the running topology and an oscilloscope, and turns
//! key presses into control messages for the audio callback.

mod panes;
pub mod state;
mod waveform;

use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer, PushError};

use euro_dsp::{synth::message::ControlMessage, Slot};

pub use state::UiState;

use panes::render_panes;
use waveform::render_waveform;

/// Samples kept for the oscilloscope.
const SCOPE_BUFFER_SIZE: usize = 2048;

/// Samples drawn per frame.
const SCOPE_WINDOW: usize = 512;

pub struct UiApp {
    state: UiState,
    control_tx: Producer<ControlMessage>,
    scope_rx: Consumer<f32>,
    scope: Vec<f32>,
    /// Messages the audio side has not accepted yet, oldest first.
    pending: VecDeque<ControlMessage>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(state: UiState, control_tx: Producer<ControlMessage>, scope_rx: Consumer<f32>) -> Self {
        Self {
            state,
            control_tx,
            scope_rx,
            scope: vec![0.0; SCOPE_BUFFER_SIZE],
            pending: VecDeque::new(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.flush();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_scope(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > SCOPE_BUFFER_SIZE {
            let excess = self.scope.len() - SCOPE_BUFFER_SIZE;
            self.scope.drain(0..excess);
        }
    }

    /// Forward queued messages in order; stop at the first one that does
    /// not fit and retry it next frame.
    fn flush(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            if let Err(PushError::Full(msg)) = self.control_tx.push(msg) {
                self.pending.push_front(msg);
                break;
            }
        }
    }

    fn send(&mut self, msg: Option<ControlMessage>) {
        if let Some(msg) = msg {
            self.pending.push_back(msg);
            self.flush();
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let msg = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab => {
                self.state.next_pane();
                None
            }
            KeyCode::BackTab => {
                self.state.prev_pane();
                None
            }
            KeyCode::Char('1') => {
                self.state.select_slot(Slot::Main);
                None
            }
            KeyCode::Char('2') => {
                self.state.select_slot(Slot::Left);
                None
            }
            KeyCode::Char('3') => {
                self.state.select_slot(Slot::Right);
                None
            }
            KeyCode::Up => self.state.turn(1),
            KeyCode::Down => self.state.turn(-1),
            KeyCode::PageUp => self.state.turn(8),
            KeyCode::PageDown => self.state.turn(-8),
            KeyCode::Char('[') => Some(self.state.rotate(-1)),
            KeyCode::Char(']') => Some(self.state.rotate(1)),
            KeyCode::Char('s') => self.state.swap_front(),
            _ => None,
        };
        self.send(msg);
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Length(8),  // Panes
                Constraint::Min(6),     // Scope
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let topology = self
            .state
            .manager()
            .topology()
            .map_or("-", |t| t.name());
        let title = Paragraph::new(format!(" euro  topology: {topology}  pending: {}", self.pending.len()))
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(title, chunks[0]);

        render_panes(frame, chunks[1], &self.state);
        render_waveform(frame, chunks[2], &self.scope, SCOPE_WINDOW);

        let help = Paragraph::new(" [Tab] Pane  [1-3] Knob  [↑↓] Turn  [[ ]] Rotate  [S] Swap  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
