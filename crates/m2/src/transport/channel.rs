use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::debug;

use crate::protocol::TransportError;
use crate::transport::Transport;

/// One end of an in-process frame pipe.
///
/// Frames sent on one end of a [`pair`](Self::pair) are received on the other.
/// Receiving fails with [`TransportError::Closed`] once the other end is
/// dropped and every buffered frame has been read.
#[derive(Debug)]
pub struct ChannelTransport {
    sender: mpsc::Sender<Bytes>,
    receiver: mpsc::Receiver<Bytes>,
    identity: Option<String>,
}

impl ChannelTransport {
    /// Creates two connected ends, each able to buffer `capacity` frames.
    pub fn pair(capacity: usize) -> (Self, Self) {
        let (left_sender, right_receiver) = mpsc::channel(capacity);
        let (right_sender, left_receiver) = mpsc::channel(capacity);

        let left = Self { sender: left_sender, receiver: left_receiver, identity: None };
        let right = Self { sender: right_sender, receiver: right_receiver, identity: None };
        (left, right)
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

impl Transport for ChannelTransport {
    async fn connect(&mut self, address: &str) -> Result<(), TransportError> {
        debug!(address, identity = ?self.identity, "channel transport needs no connect");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Bytes, TransportError> {
        self.receiver.recv().await.ok_or(TransportError::Closed)
    }

    async fn send(&mut self, frame: Bytes) -> Result<(), TransportError> {
        self.sender.send(frame).await.map_err(|_e| TransportError::Closed)
    }

    fn set_identity(&mut self, identity: &str) {
        self.identity = Some(identity.to_string());
    }
}
