//! Line-framed TCP transport to a single bulb.

use std::io;
use std::time::Duration;

use crate::protocol::TERMINATOR;
use crate::runtime::{self, AsyncTcpStream, TcpStream};

/// One open socket to a bulb, plus any bytes received past the last complete
/// line. The buffer carries partial lines across reads so a frame split
/// between two socket reads is reassembled instead of dropped.
pub(crate) struct Connection {
    stream: TcpStream,
    buf: Vec<u8>,
    timeout: Duration,
}

impl Connection {
    /// Open a socket to `host:port`, bounded by `timeout`.
    pub(crate) async fn open(host: &str, port: u16, timeout: Duration) -> io::Result<Self> {
        let addr = format!("{host}:{port}");
        let stream = runtime::timeout(timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;

        Ok(Connection {
            stream,
            buf: Vec::new(),
            timeout,
        })
    }

    /// Write `line` followed by the protocol terminator, bounded by the
    /// configured timeout.
    pub(crate) async fn send_line(&mut self, line: &str) -> io::Result<()> {
        let mut frame = Vec::with_capacity(line.len() + TERMINATOR.len());
        frame.extend_from_slice(line.as_bytes());
        frame.extend_from_slice(TERMINATOR);

        runtime::timeout(self.timeout, self.stream.write_all(&frame))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "send timed out"))?
    }

    /// Read until one complete, non-empty line is available and return it
    /// without its terminator. Frames already buffered from an earlier read
    /// are drained first; each socket read is bounded by the configured
    /// timeout. EOF surfaces as `UnexpectedEof`.
    pub(crate) async fn read_line(&mut self) -> io::Result<Vec<u8>> {
        loop {
            while let Some(line) = split_line(&mut self.buf) {
                if !line.is_empty() {
                    return Ok(line);
                }
            }

            let mut chunk = [0u8; 4096];
            let read = runtime::timeout(self.timeout, self.stream.read(&mut chunk))
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "read timed out"))??;

            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "bulb closed the connection",
                ));
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }
}

/// Pop the first terminator-delimited line off the front of `buf`, or `None`
/// if no complete line is buffered yet.
fn split_line(buf: &mut Vec<u8>) -> Option<Vec<u8>> {
    let pos = buf
        .windows(TERMINATOR.len())
        .position(|window| window == TERMINATOR)?;
    let line = buf[..pos].to_vec();
    buf.drain(..pos + TERMINATOR.len());
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_incomplete() {
        let mut buf = b"{\"id\":0".to_vec();
        assert_eq!(split_line(&mut buf), None);
        assert_eq!(buf, b"{\"id\":0");
    }

    #[test]
    fn test_split_line_reassembles_across_chunks() {
        let mut buf = b"{\"id\":0,".to_vec();
        assert_eq!(split_line(&mut buf), None);

        buf.extend_from_slice(b"\"result\":[\"ok\"]}\r\n");
        assert_eq!(
            split_line(&mut buf),
            Some(b"{\"id\":0,\"result\":[\"ok\"]}".to_vec())
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_split_line_multiple_frames_per_chunk() {
        let mut buf = b"first\r\nsecond\r\nrest".to_vec();
        assert_eq!(split_line(&mut buf), Some(b"first".to_vec()));
        assert_eq!(split_line(&mut buf), Some(b"second".to_vec()));
        assert_eq!(split_line(&mut buf), None);
        assert_eq!(buf, b"rest");
    }

    #[test]
    fn test_split_line_empty_fragment() {
        let mut buf = b"\r\n\r\nframe\r\n".to_vec();
        assert_eq!(split_line(&mut buf), Some(Vec::new()));
        assert_eq!(split_line(&mut buf), Some(Vec::new()));
        assert_eq!(split_line(&mut buf), Some(b"frame".to_vec()));
    }
}
