use color_eyre::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Write};
use tracing::{debug, warn};

/// Set up the terminal with raw mode, the alternate screen and mouse capture
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    debug!(width, height, "setting up terminal");

    if let Err(e) = enable_raw_mode() {
        return Err(color_eyre::eyre::eyre!("Failed to enable raw mode: {e}"));
    }

    let mut stdout = stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(color_eyre::eyre::eyre!(
            "Failed to enter alternate screen: {e}"
        ));
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(term) => term,
        Err(e) => {
            let _ = execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(color_eyre::eyre::eyre!("Failed to create terminal: {e}"));
        }
    };

    // Not fatal
    if let Err(e) = terminal.clear() {
        warn!("failed to clear terminal: {e}");
    }
    if let Err(e) = execute!(std::io::stdout(), cursor::Hide) {
        warn!("failed to hide cursor: {e}");
    }

    debug!("terminal ready");
    Ok(terminal)
}

/// Restore terminal to its initial state, logging anything that fails
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    let mut stdout_handle = stdout();

    if let Err(e) = execute!(stdout_handle, cursor::Show) {
        warn!("failed to show cursor: {e}");
    }

    if alternate_screen {
        if let Err(e) = execute!(stdout_handle, DisableMouseCapture, LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {e}");
        }
    }

    if raw_mode {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }

    let _ = execute!(stdout_handle, cursor::MoveToNextLine(1));
    let _ = stdout_handle.flush();
    debug!("terminal restored");
}
