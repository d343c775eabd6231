//! Frames a request out of a TCP stream: accumulates bytes in chunks of up
//! to 1024 until the `CRLF CRLF` delimiter shows up, enforcing a timeout on
//! every receive and a hard ceiling on total size.

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::Duration;

use crate::error::ErrorKind;

const CHUNK_SIZE: usize = 1024;
const DELIMITER: &[u8] = b"\r\n\r\n";

/// What the reader produced. `NoRequest` is not an error — it means the
/// peer closed the connection before sending anything frameable, and the
/// worker discards the connection silently.
pub enum ReadOutcome {
    Request(String),
    NoRequest,
}

/// Reads `stream` until `DELIMITER` appears or a failure mode fires.
/// `timeout` bounds each individual receive call; `ceiling` bounds the
/// total accumulated byte count.
pub async fn read_request(
    stream: &mut TcpStream,
    timeout: Duration,
    ceiling: usize,
) -> Result<ReadOutcome, ErrorKind> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = tokio::time::timeout(timeout, stream.read(&mut chunk))
            .await
            .map_err(|_| ErrorKind::RequestTimeout)?;

        let n = match read {
            Ok(n) => n,
            Err(_) => return Ok(ReadOutcome::NoRequest),
        };

        if n == 0 {
            return Ok(ReadOutcome::NoRequest);
        }

        buffer.extend_from_slice(&chunk[..n]);

        if buffer.len() > ceiling {
            return Err(ErrorKind::internal("receive buffer ceiling exceeded"));
        }

        if contains_delimiter(&buffer) {
            let text = String::from_utf8(buffer).map_err(|_| ErrorKind::BadRequest)?;
            return Ok(ReadOutcome::Request(text));
        }
    }
}

fn contains_delimiter(buffer: &[u8]) -> bool {
    buffer.windows(DELIMITER.len()).any(|window| window == DELIMITER)
}
