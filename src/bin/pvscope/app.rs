//! ScopeApp - terminal front end driving an acquisition thread

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::warn;
use pvrsd_scope::{
    dsp::CursorId, io::export_trace, runtime::Acquisition, ControlMessage, Frame, RunMode,
    ScopeSession, ScopeStatus,
};
use ratatui::DefaultTerminal;

use crate::ui;

/// Cursor movement per key press, as a fraction of the visible window.
const CURSOR_STEP: f64 = 0.01;
/// Frequency change per key press.
const FREQUENCY_STEP: f64 = 1.1;
/// Amplitude and offset change per key press, in volts.
const VOLTAGE_STEP: f64 = 0.1;

/// UI application state
pub struct ScopeApp {
    acquisition: Acquisition,
    /// Latest settings snapshot from the worker
    status: ScopeStatus,
    /// Latest captured frame (kept while stopped)
    frame: Option<Frame>,
    /// One-line feedback shown in the help bar
    notice: Option<String>,
    should_quit: bool,
}

impl ScopeApp {
    pub fn new(session: ScopeSession, interval: Duration) -> Self {
        let status = session.status();
        Self {
            acquisition: Acquisition::spawn(session, interval),
            status,
            frame: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_acquisition();

            terminal.draw(|frame| {
                ui::render(
                    frame,
                    &ui::View {
                        status: &self.status,
                        frame: self.frame.as_ref(),
                        notice: self.notice.as_deref(),
                    },
                )
            })?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.acquisition.is_finished() {
                return Err(eyre!("acquisition thread exited unexpectedly"));
            }
        }

        self.acquisition
            .shutdown()
            .map_err(|_| eyre!("acquisition worker panicked"))?;
        Ok(())
    }

    fn poll_acquisition(&mut self) {
        if let Some(status) = self.acquisition.latest_status() {
            self.status = status;
        }
        if let Some(frame) = self.acquisition.latest_frame() {
            self.frame = Some(frame);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let message = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('e') => {
                self.export();
                return;
            }
            KeyCode::Char(' ') => match self.status.mode {
                RunMode::Running => ControlMessage::Stop,
                RunMode::Stopped | RunMode::Single => ControlMessage::Run,
            },
            KeyCode::Char('s') => ControlMessage::Single,
            KeyCode::Char('r') => {
                self.frame = None;
                ControlMessage::Reset
            }
            KeyCode::Char('w') => ControlMessage::NextWaveform,
            KeyCode::Char('f') => ControlMessage::ScaleFrequency(FREQUENCY_STEP),
            KeyCode::Char('F') => ControlMessage::ScaleFrequency(1.0 / FREQUENCY_STEP),
            KeyCode::Char('a') => ControlMessage::AdjustAmplitude(VOLTAGE_STEP),
            KeyCode::Char('A') => ControlMessage::AdjustAmplitude(-VOLTAGE_STEP),
            KeyCode::Char('o') => ControlMessage::AdjustOffset(VOLTAGE_STEP),
            KeyCode::Char('O') => ControlMessage::AdjustOffset(-VOLTAGE_STEP),
            KeyCode::Char('[') => ControlMessage::ZoomIn,
            KeyCode::Char(']') => ControlMessage::ZoomOut,
            KeyCode::Left => ControlMessage::NudgeCursor(CursorId::First, -CURSOR_STEP),
            KeyCode::Right => ControlMessage::NudgeCursor(CursorId::First, CURSOR_STEP),
            KeyCode::Char(',') => ControlMessage::NudgeCursor(CursorId::Second, -CURSOR_STEP),
            KeyCode::Char('.') => ControlMessage::NudgeCursor(CursorId::Second, CURSOR_STEP),
            _ => return,
        };
        self.notice = None;
        self.acquisition.send(message);
    }

    fn export(&mut self) {
        let Some(frame) = &self.frame else {
            self.notice = Some("nothing captured yet".to_string());
            return;
        };
        let path = PathBuf::from(format!("pvscope-{:04}.csv", frame.sequence));
        self.notice = Some(match export_trace(&path, &frame.samples) {
            Ok(()) => format!("saved {}", path.display()),
            Err(err) => {
                warn!("export failed: {err}");
                format!("export failed: {err}")
            }
        });
    }
}
