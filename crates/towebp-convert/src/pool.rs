//! Bounded parallel conversion.
//!
//! Runs independent conversions on a fixed number of scoped worker
//! threads. A feeder thread hands out input indices over a bounded job
//! channel, and each worker sends its outcome back on a result channel
//! as soon as it is ready, so results arrive in completion order rather
//! than input order.

use crossbeam_channel::bounded;

use crate::types::{ConvertConfig, ConvertError, Converted};

/// Parallelism reported by the platform, or 1 if unknown.
#[must_use]
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Convert every input with at most `workers` conversions in flight.
///
/// `on_complete` is called on the calling thread with the input index
/// and its outcome, once per input. A `workers` value of 0 is treated
/// as 1, and no more workers are started than there are inputs.
pub fn convert_bounded<T, F>(
    inputs: &[T],
    config: &ConvertConfig,
    workers: usize,
    mut on_complete: F,
) where
    T: AsRef<[u8]> + Sync,
    F: FnMut(usize, Result<Converted, ConvertError>),
{
    if inputs.is_empty() {
        return;
    }
    let workers = workers.clamp(1, inputs.len());
    let (job_tx, job_rx) = bounded::<(usize, &T)>(workers);
    let (result_tx, result_rx) = bounded(workers);

    std::thread::scope(|scope| {
        scope.spawn(move || {
            for job in inputs.iter().enumerate() {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, input) in &job_rx {
                    let outcome = crate::convert(input.as_ref(), config);
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
        // Only worker senders remain, so the receiver ends when they finish.
        drop(result_tx);
        drop(job_rx);

        for (index, outcome) in &result_rx {
            on_complete(index, outcome);
        }
    });
}
