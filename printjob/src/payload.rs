//!
//! IPP payload
//!
use std::io::{self, Read};

enum PayloadKind {
    Sync(Box<dyn Read + Send + Sync>),
    Empty,
}

/// IPP payload: the document byte stream appended after the attribute
/// section. It is streamed through on demand and consumed exactly once,
/// never buffered in memory as a whole.
pub struct IppPayload {
    inner: PayloadKind,
}

impl IppPayload {
    /// Create empty payload
    pub fn empty() -> Self {
        IppPayload {
            inner: PayloadKind::Empty,
        }
    }

    /// Create a payload from the Read object
    pub fn new<R>(r: R) -> Self
    where
        R: 'static + Read + Send + Sync,
    {
        IppPayload {
            inner: PayloadKind::Sync(Box::new(r)),
        }
    }
}

impl Default for IppPayload {
    fn default() -> Self {
        Self {
            inner: PayloadKind::Empty,
        }
    }
}

impl Read for IppPayload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner {
            PayloadKind::Sync(ref mut inner) => inner.read(buf),
            PayloadKind::Empty => Ok(0),
        }
    }
}
