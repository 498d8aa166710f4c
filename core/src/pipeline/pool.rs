//! pipeline/pool.rs
//! Bounded task queue feeding a fixed set of scoped worker threads.
//!
//! Shape (one run):
//! ```text
//! feeder --bounded(inflight)--> workers x N --bounded(inflight)--> caller's sink
//! ```
//! The sink runs on the calling thread, so it may hold `&mut` state without locks.

use std::thread;

use crossbeam::channel::bounded;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
    inflight: usize,
}

impl WorkerPool {
    pub fn new(workers: usize, inflight: usize) -> Self {
        Self {
            workers: workers.max(1),
            inflight: inflight.max(1),
        }
    }

    /// Run every task on the calling thread, in order.
    pub fn inline() -> Self {
        Self { workers: 1, inflight: 1 }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_inline(&self) -> bool {
        self.workers == 1
    }

    /// Apply `work` to every task and hand each result to `sink`.
    ///
    /// Results arrive in completion order. Every task is processed and every
    /// result reaches the sink before `run` returns.
    pub fn run<T, R, I, F, S>(&self, tasks: I, work: F, mut sink: S)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send,
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
        S: FnMut(R),
    {
        if self.is_inline() {
            for task in tasks {
                sink(work(task));
            }
            return;
        }

        let (task_tx, task_rx) = bounded::<T>(self.inflight);
        let (out_tx, out_rx) = bounded::<R>(self.inflight);
        let tasks = tasks.into_iter();
        let work = &work;

        thread::scope(|scope| {
            // ---- Feeder ----
            scope.spawn(move || {
                for task in tasks {
                    if task_tx.send(task).is_err() {
                        break;
                    }
                }
                // task_tx drops here and closes the queue
            });

            // ---- Workers ----
            for i in 0..self.workers {
                let rx = task_rx.clone();
                let tx = out_tx.clone();
                scope.spawn(move || {
                    tracing::trace!(worker = i, "chunk worker starting");
                    for task in rx.iter() {
                        if tx.send(work(task)).is_err() {
                            return;
                        }
                    }
                    tracing::trace!(worker = i, "chunk worker finished");
                });
            }

            drop(task_rx);
            drop(out_tx);

            // ---- Collector ----
            for res in out_rx.iter() {
                sink(res);
            }
        });
    }
}
