use std::sync::mpsc;

use crate::assets::decode::decode_image;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::interaction::input::DroppedFile;
use crate::scene::model::Raster;

/// Handle for one submitted file, in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportTicket(pub u64);

/// Result of decoding one submitted file.
#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: ImportTicket,
    pub name: String,
    pub result: CanvasResult<Raster>,
}

/// Background decoder for imported files.
///
/// Each submitted file is decoded independently on a rayon pool; finished results are
/// collected with [`ImportQueue::poll`] (non-blocking) or [`ImportQueue::wait`]. Results of
/// different files may arrive in any order. There is no cancellation: dropping the queue
/// discards whatever is still in flight.
pub struct ImportQueue {
    pool: rayon::ThreadPool,
    tx: mpsc::Sender<DecodeOutcome>,
    rx: mpsc::Receiver<DecodeOutcome>,
    next_ticket: u64,
    in_flight: usize,
}

impl ImportQueue {
    pub fn new(threads: Option<usize>) -> CanvasResult<Self> {
        let pool = build_thread_pool(threads)?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            pool,
            tx,
            rx,
            next_ticket: 0,
            in_flight: 0,
        })
    }

    /// Start decoding `file` in the background.
    pub fn submit(&mut self, file: DroppedFile) -> ImportTicket {
        let ticket = ImportTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight += 1;

        let tx = self.tx.clone();
        self.pool.spawn(move || {
            let bytes = &file.bytes;
            let result = std::panic::catch_unwind(|| decode_image(bytes)).unwrap_or_else(|_| {
                Err(CanvasError::decode("decoder panicked"))
            });
            // The receiver is gone only when the queue was dropped.
            let _ = tx.send(DecodeOutcome {
                ticket,
                name: file.name,
                result,
            });
        });
        ticket
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Finished decodes, without blocking.
    pub fn poll(&mut self) -> Vec<DecodeOutcome> {
        let mut done = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            done.push(outcome);
        }
        self.in_flight -= done.len();
        done
    }

    /// Block until every submitted file has finished decoding.
    pub fn wait(&mut self) -> Vec<DecodeOutcome> {
        let mut done = Vec::with_capacity(self.in_flight);
        while done.len() < self.in_flight {
            // `self.tx` keeps the channel open, so this only returns once a job reports back.
            match self.rx.recv() {
                Ok(outcome) => done.push(outcome),
                Err(_) => break,
            }
        }
        self.in_flight -= done.len();
        done
    }
}

fn build_thread_pool(threads: Option<usize>) -> CanvasResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CanvasError::validation(
            "decode 'threads' must be >= 1 when set",
        ));
    }
    let mut builder =
        rayon::ThreadPoolBuilder::new().thread_name(|i| format!("imgboard-decode-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CanvasError::validation(format!("failed to build decode thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/import.rs"]
mod tests;
