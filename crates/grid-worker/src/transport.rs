use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use grid_protocol::{NodeCodec, NodeMessage, NodeReply};
use grid_types::NodeId;

use crate::error::{WorkerError, WorkerResult};
use crate::worker::Worker;

/// The network seam of a worker.
///
/// This layer only declares the obligation (produce bytes to transmit,
/// accept bytes to interpret) and performs no I/O itself. The default
/// bodies fail with [`WorkerError::NotImplementedTransport`]: calling the
/// abstract form directly is a programming error to catch in development,
/// not a runtime condition to recover from. Concrete node types supply
/// sockets, HTTP, or in-process channels by overriding both methods.
pub trait Transport {
    /// Transmit one encoded frame to the node `to`.
    fn send_bytes(&self, to: &NodeId, bytes: &[u8]) -> WorkerResult<()> {
        let _ = (to, bytes);
        Err(WorkerError::NotImplementedTransport)
    }

    /// Interpret one received frame and produce the encoded reply frame.
    fn recv_bytes(&self, bytes: &[u8]) -> WorkerResult<Vec<u8>> {
        let _ = bytes;
        Err(WorkerError::NotImplementedTransport)
    }
}

// The base worker carries only the abstract obligations.
impl Transport for Worker {}

/// In-process transport: the reference concrete [`Transport`].
///
/// Frames "sent" to the wrapped worker's id are dispatched immediately and
/// the encoded reply is queued for the caller to take. Dispatch failures do
/// not tear the transport down; they come back encoded as error replies,
/// exactly as a remote caller would see them.
pub struct VirtualTransport {
    worker: Arc<Worker>,
    replies: Mutex<VecDeque<Vec<u8>>>,
}

impl VirtualTransport {
    pub fn new(worker: Arc<Worker>) -> Self {
        Self {
            worker,
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// The worker behind this transport.
    pub fn worker(&self) -> &Worker {
        &self.worker
    }

    /// Take the oldest queued reply frame, if any.
    pub fn take_reply(&self) -> Option<Vec<u8>> {
        self.replies.lock().expect("lock poisoned").pop_front()
    }

    /// Convenience: encode `msg`, dispatch it, and decode the reply.
    pub fn call(&self, msg: &NodeMessage) -> WorkerResult<NodeReply> {
        let request = NodeCodec::encode(msg)?;
        let response = self.recv_bytes(&request)?;
        let (reply, _) = NodeCodec::decode_reply(&response)?;
        Ok(reply)
    }
}

impl Transport for VirtualTransport {
    fn send_bytes(&self, to: &NodeId, bytes: &[u8]) -> WorkerResult<()> {
        if to != self.worker.id() {
            return Err(WorkerError::Internal(format!(
                "virtual transport only reaches {}, not {to}",
                self.worker.id()
            )));
        }
        let reply = self.recv_bytes(bytes)?;
        self.replies.lock().expect("lock poisoned").push_back(reply);
        Ok(())
    }

    fn recv_bytes(&self, bytes: &[u8]) -> WorkerResult<Vec<u8>> {
        let (msg, _) = NodeCodec::decode(bytes)?;
        let reply = match self.worker.recv_msg(msg) {
            Ok(reply) => reply,
            // Dispatch failures travel back over the wire as typed error
            // replies; only encoding faults abort the exchange.
            Err(err) => err.to_reply(),
        };
        Ok(NodeCodec::encode_reply(&reply)?)
    }
}
