//! Terminal width discovery.

/// Width used when neither `COLUMNS` nor the tty reports one.
pub const FALLBACK_WIDTH: usize = 80;

/// Current terminal width in columns, if known.
///
/// `COLUMNS` wins when set to a positive number; otherwise stderr's tty is
/// queried (the progress line is drawn there).
pub fn terminal_width() -> Option<usize> {
    if let Some(cols) = std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&c| c > 0)
    {
        return Some(cols);
    }
    tty_width()
}

#[cfg(unix)]
fn tty_width() -> Option<usize> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let r = unsafe { libc::ioctl(libc::STDERR_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if r == 0 && ws.ws_col > 0 {
        Some(usize::from(ws.ws_col))
    } else {
        tracing::trace!(errno = r, "TIOCGWINSZ unavailable on stderr");
        None
    }
}

#[cfg(not(unix))]
fn tty_width() -> Option<usize> {
    None
}
