use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info};

use domain::PlayerId;

use crate::event_loop::{CoordinatorEvent, CoordinatorHandle};

/// Serves one TCP connection: reads lines into the coordinator and writes
/// whatever the coordinator sends back. Ends on EOF, a read or write error,
/// or when the coordinator drops this player's outbound sender.
pub(super) async fn serve_connection(
    stream: TcpStream,
    events: CoordinatorHandle,
    max_line_bytes: usize,
) {
    let player_id = PlayerId::new();
    let peer = stream.peer_addr().ok();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();

    if events
        .send(CoordinatorEvent::Connected {
            player_id,
            outbound: outbound_tx,
        })
        .is_err()
    {
        debug!(peer = ?peer, "Coordinator gone, connection dropped");
        return;
    }
    info!(player_id = ?player_id, peer = ?peer, "Connection accepted");

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut pending = Vec::new();

    loop {
        tokio::select! {
            read = read_line(&mut reader, &mut pending, max_line_bytes) => match read {
                Ok(Some(line)) => {
                    debug!(player_id = ?player_id, line = %line.trim_end(), "<- Received");
                    if events.send(CoordinatorEvent::Line { player_id, line }).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    debug!(player_id = ?player_id, "Peer closed connection");
                    break;
                }
                Err(err) => {
                    debug!(player_id = ?player_id, error = %err, "Read failed");
                    break;
                }
            },
            outbound = outbound_rx.recv() => match outbound {
                Some(message) => {
                    if let Err(err) = write_half.write_all(message.as_bytes()).await {
                        debug!(player_id = ?player_id, error = %err, "Write failed");
                        break;
                    }
                }
                None => {
                    if let Err(err) = write_half.shutdown().await {
                        debug!(player_id = ?player_id, error = %err, "Shutdown failed");
                    }
                    break;
                }
            },
        }
    }

    // No-op on the coordinator side if the player already left via `quit`.
    let _ = events.send(CoordinatorEvent::Closed { player_id });
    info!(player_id = ?player_id, "Connection closed");
}

/// Reads one line of at most `max_line_bytes` bytes, not counting the
/// `\n` terminator. Bytes already in `pending` from an interrupted call are
/// kept, so dropping the returned future inside `select!` loses nothing.
///
/// Returns `None` once the peer has closed and nothing is left over.
async fn read_line<R>(
    reader: &mut R,
    pending: &mut Vec<u8>,
    max_line_bytes: usize,
) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let max_line_bytes = max_line_bytes.max(1);
    let remaining = max_line_bytes.saturating_sub(pending.len());
    if remaining > 0 {
        let mut limited = (&mut *reader).take(remaining as u64);
        let read = limited.read_until(b'\n', pending).await?;
        if read == 0 && pending.is_empty() {
            return Ok(None);
        }
    }

    // A terminator right at the bound still belongs to this line.
    if pending.len() >= max_line_bytes && !pending.ends_with(b"\n") {
        let terminated = reader.fill_buf().await?.first() == Some(&b'\n');
        if terminated {
            reader.consume(1);
            pending.push(b'\n');
        }
    }

    let line = String::from_utf8_lossy(pending).into_owned();
    pending.clear();
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn lines(
        input: &[u8],
        max_line_bytes: usize,
    ) -> Vec<String> {
        let mut reader = BufReader::new(input);
        let mut pending = Vec::new();
        let mut out = Vec::new();
        while let Some(line) = read_line(&mut reader, &mut pending, max_line_bytes).await.unwrap() {
            out.push(line);
        }
        out
    }

    #[tokio::test]
    async fn test_splits_on_newline() {
        assert_eq!(lines(b"alice\njoin\r\n", 1024).await, vec!["alice\n", "join\r\n"]);
    }

    #[tokio::test]
    async fn test_trailing_bytes_at_eof_are_a_line() {
        assert_eq!(lines(b"alice\nrock", 1024).await, vec!["alice\n", "rock"]);
    }

    #[tokio::test]
    async fn test_long_line_is_cut_at_bound() {
        assert_eq!(lines(b"abcdefghij\n", 4).await, vec!["abcd", "efgh", "ij\n"]);
    }

    #[tokio::test]
    async fn test_line_exactly_at_bound_keeps_its_newline() {
        assert_eq!(lines(b"abcd\njoin\n", 4).await, vec!["abcd\n", "join\n"]);
        assert_eq!(lines(b"abcdefgh\n", 4).await, vec!["abcd", "efgh\n"]);
    }

    #[tokio::test]
    async fn test_line_at_bound_before_eof() {
        assert_eq!(lines(b"abcd", 4).await, vec!["abcd"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        assert_eq!(lines(b"bo\xffb\n", 1024).await, vec!["bo\u{fffd}b\n"]);
    }

    #[tokio::test]
    async fn test_empty_input_has_no_lines() {
        assert!(lines(b"", 1024).await.is_empty());
    }
}
