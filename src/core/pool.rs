//! Fixed-capacity job gate for parallel note scans.
//!
//! Admits at most `capacity` concurrently-running jobs per pool instance;
//! a submitter blocks once the gate is saturated and is released as soon as
//! any in-flight job returns. No timeouts, no cancellation, no result
//! aggregation — callers collect results through their own channels.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;

/// Default gate width for task extraction scans.
pub const SCAN_JOBS: usize = 5;

struct Gate {
    running: Mutex<usize>,
    slot_freed: Condvar,
}

pub struct JobPool {
    gate: Arc<Gate>,
    capacity: usize,
}

impl JobPool {
    pub fn new(capacity: usize) -> JobPool {
        debug_assert!(capacity > 0);
        JobPool {
            gate: Arc::new(Gate {
                running: Mutex::new(0),
                slot_freed: Condvar::new(),
            }),
            capacity,
        }
    }

    /// Run `job` on its own thread, blocking the caller until a slot is free.
    pub fn run<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut running = self
            .gate
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *running >= self.capacity {
            running = self
                .gate
                .slot_freed
                .wait(running)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *running += 1;
        drop(running);

        let gate = Arc::clone(&self.gate);
        thread::spawn(move || {
            job();
            let mut running = gate.running.lock().unwrap_or_else(PoisonError::into_inner);
            *running -= 1;
            drop(running);
            gate.slot_freed.notify_one();
        });
    }
}
