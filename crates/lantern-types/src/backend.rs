//! Backend trait definitions.
//!
//! The pipeline never touches platform APIs directly: all I/O is dispatched
//! through these traits. The network side is deliberately blocking with no
//! timeout -- a peer that neither sends nor closes will hang the caller, a
//! documented property of the core rather than a bug.

use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddrV4, TcpStream};

use crate::color::TextAttr;
use crate::error::{LanternError, Result};

/// Display grid width in character cells.
pub const SCREEN_COLS: usize = 80;
/// Display grid height in character cells.
pub const SCREEN_ROWS: usize = 25;

// ------------------------------------------------------------------
// Network transport
// ------------------------------------------------------------------

/// A connected byte stream.
pub trait NetworkStream {
    /// Send bytes, returning the count written.
    fn send(&mut self, data: &[u8]) -> Result<usize>;

    /// Receive into `buf`, returning the count read. Zero means the peer
    /// closed the connection.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Close the connection. Idempotent.
    fn close(&mut self) -> Result<()>;
}

/// Opens outbound connections.
pub trait NetworkBackend {
    /// Open a blocking TCP connection to `(addr, port)`.
    fn connect(&mut self, addr: Ipv4Addr, port: u16) -> Result<Box<dyn NetworkStream>>;
}

/// [`NetworkStream`] over `std::net::TcpStream`.
pub struct StdNetworkStream {
    stream: Option<TcpStream>,
}

impl StdNetworkStream {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: Some(stream),
        }
    }
}

impl NetworkStream for StdNetworkStream {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| LanternError::Backend("stream closed".to_string()))?;
        let n = stream.write(data)?;
        Ok(n)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| LanternError::Backend("stream closed".to_string()))?;
        let n = stream.read(buf)?;
        Ok(n)
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the TcpStream closes the socket.
        self.stream = None;
        Ok(())
    }
}

/// [`NetworkBackend`] over the standard library's blocking sockets.
///
/// No connect or read timeout is configured, matching the core's blocking
/// resource model.
#[derive(Debug, Default)]
pub struct StdNetworkBackend;

impl StdNetworkBackend {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkBackend for StdNetworkBackend {
    fn connect(&mut self, addr: Ipv4Addr, port: u16) -> Result<Box<dyn NetworkStream>> {
        let stream = TcpStream::connect(SocketAddrV4::new(addr, port))
            .map_err(|e| LanternError::Connect(format!("{addr}:{port}: {e}")))?;
        Ok(Box::new(StdNetworkStream::new(stream)))
    }
}

// ------------------------------------------------------------------
// Display surface
// ------------------------------------------------------------------

/// A cursor-addressable character grid with 16-color attributes.
///
/// Writes outside the grid are silently dropped; the display never errors.
pub trait TextDisplay {
    /// Move the cursor to column `x`, row `y`.
    fn set_cursor(&mut self, x: usize, y: usize);

    /// Set the attribute applied to subsequent writes.
    fn set_color(&mut self, attr: TextAttr);

    /// Write text at the cursor, advancing it by one column per character.
    fn write(&mut self, text: &str);

    /// Clear the grid to spaces in the default attribute and home the cursor.
    fn clear(&mut self);
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attr: TextAttr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attr: TextAttr::DEFAULT,
        }
    }
}

/// In-memory 80x25 implementation of [`TextDisplay`].
///
/// Serves as the render target for tests and for the CLI, which dumps the
/// grid to stdout after a page load.
pub struct TextSurface {
    cells: Vec<Cell>,
    cursor_x: usize,
    cursor_y: usize,
    attr: TextAttr,
}

impl TextSurface {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); SCREEN_COLS * SCREEN_ROWS],
            cursor_x: 0,
            cursor_y: 0,
            attr: TextAttr::DEFAULT,
        }
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < SCREEN_COLS && y < SCREEN_ROWS {
            Some(self.cells[y * SCREEN_COLS + x])
        } else {
            None
        }
    }

    /// The characters of row `y` with trailing spaces trimmed.
    pub fn row_text(&self, y: usize) -> String {
        let mut out = String::with_capacity(SCREEN_COLS);
        for x in 0..SCREEN_COLS {
            out.push(self.cells[y * SCREEN_COLS + x].ch);
        }
        out.trim_end().to_string()
    }

    /// All rows joined by newlines, trailing blank rows trimmed.
    pub fn to_text(&self) -> String {
        let mut rows: Vec<String> = (0..SCREEN_ROWS).map(|y| self.row_text(y)).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        rows.join("\n")
    }

    /// True when the given substring appears in some row.
    pub fn contains(&self, needle: &str) -> bool {
        (0..SCREEN_ROWS).any(|y| self.row_text(y).contains(needle))
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay for TextSurface {
    fn set_cursor(&mut self, x: usize, y: usize) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    fn set_color(&mut self, attr: TextAttr) {
        self.attr = attr;
    }

    fn write(&mut self, text: &str) {
        for ch in text.chars() {
            if self.cursor_x < SCREEN_COLS && self.cursor_y < SCREEN_ROWS {
                self.cells[self.cursor_y * SCREEN_COLS + self.cursor_x] = Cell {
                    ch,
                    attr: self.attr,
                };
            }
            // The cursor still advances off-grid so callers can observe
            // where unclamped output would have landed.
            self.cursor_x += 1;
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.attr = TextAttr::DEFAULT;
    }
}
