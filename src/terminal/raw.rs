//! Raw mode and geometry for Unix terminals.
//!
//! The menu reads keys one at a time with no echo, so the controlling
//! terminal is switched out of canonical mode for the duration of a run.
//! Reads block until at least one byte arrives: the run loop has no
//! timeouts.
//!
//! # Safety
//! This module calls libc termios and ioctl functions through FFI.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

/// Restores the saved terminal attributes when dropped.
#[derive(Debug)]
pub struct RawModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl RawModeGuard {
    /// Switch `fd` to raw mode.
    ///
    /// Fails with the OS error when `fd` is not a terminal.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;

        // Enter arrives as CR; keep it that way and let the parser map it
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);

        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;

        // ISIG stays set so ^C still interrupts the host program
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN);

        // Block for one byte, no inter-byte timer
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(fd, &raw)?;

        Ok(Self { fd, original })
    }

    /// The file descriptor this guard controls.
    #[must_use]
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Enter raw mode on stdin.
pub fn enable_raw_mode() -> io::Result<RawModeGuard> {
    RawModeGuard::new(&io::stdin())
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Query the size of the terminal on stdout as `(columns, rows)`.
///
/// Zero dimensions are reported as an error: the menu divides by both.
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Wait up to `timeout` for `fd` to become readable.
///
/// End of stream and hang-up count as readable: the next read reports them.
/// An interrupted wait reports `false`.
pub fn wait_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);

    // SAFETY: pollfd is a valid, exclusively borrowed array of one entry
    let result = unsafe { libc::poll(&mut pollfd, 1, millis) };

    if result == -1 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            Ok(false)
        } else {
            Err(err)
        }
    } else {
        Ok(result > 0)
    }
}

/// Both ends of a fresh pipe, as `(read, write)`.
#[cfg(test)]
pub(crate) fn pipe_pair() -> io::Result<(std::fs::File, std::fs::File)> {
    use std::os::unix::io::FromRawFd;

    let mut fds = [0i32; 2];
    // SAFETY: fds has room for the two descriptors pipe() writes
    let result = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if result == -1 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: pipe() succeeded, so both fds are open and owned by nobody else
    let read_file = unsafe { std::fs::File::from_raw_fd(fds[0]) };
    let write_file = unsafe { std::fs::File::from_raw_fd(fds[1]) };
    Ok((read_file, write_file))
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
