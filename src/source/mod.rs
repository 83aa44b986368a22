//! One-shot background file loading.
//!
//! The whole file is read in a single asynchronous operation that settles
//! once with the entire content as text — there is no chunked or streaming
//! read, so peak memory is proportional to file size. This is an explicit,
//! documented resource bound of the application.

use crate::model::InputError;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::debug;

/// A settled read, tagged with the generation of the load that started it.
#[derive(Debug)]
struct Settled {
    generation: u64,
    outcome: Result<String, InputError>,
}

/// Background loader for CSV exports.
///
/// Each [`FileLoader::begin_load`] spawns a reader thread and bumps the
/// current load generation. Loading a new file supersedes any in-flight
/// read; there is no cancellation primitive — the superseded read still
/// settles, and [`FileLoader::poll`] discards it by generation comparison
/// instead of applying it.
#[derive(Debug)]
pub struct FileLoader {
    generation: u64,
    tx: Sender<Settled>,
    rx: Receiver<Settled>,
}

impl FileLoader {
    /// Create a loader with no read in flight.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            generation: 0,
            tx,
            rx,
        }
    }

    /// Start reading `path` in the background.
    ///
    /// Supersedes any in-flight read: results from earlier generations will
    /// be silently discarded when they settle.
    pub fn begin_load(&mut self, path: impl AsRef<Path>) {
        self.generation += 1;
        let generation = self.generation;
        let path: PathBuf = path.as_ref().to_path_buf();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let outcome = read_whole_file(&path);
            // The receiver may already be gone on shutdown; nothing to do.
            let _ = tx.send(Settled {
                generation,
                outcome,
            });
        });
    }

    /// Non-blocking poll for a settled read of the *current* load.
    ///
    /// Returns `None` while the read is outstanding. Settled reads from
    /// superseded loads are drained and dropped here, never surfaced.
    pub fn poll(&mut self) -> Option<Result<String, InputError>> {
        loop {
            match self.rx.try_recv() {
                Ok(settled) if settled.generation == self.generation => {
                    return Some(settled.outcome);
                }
                Ok(settled) => {
                    debug!(
                        generation = settled.generation,
                        current = self.generation,
                        "discarding stale load result"
                    );
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_whole_file(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}
