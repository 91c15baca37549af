//! Ordered parallel fan-out for class batches.

use std::future::Future;

use tokio::task::JoinSet;

use crate::error::{EngineError, EngineResult};

/// Runs one task per input concurrently and collects the results in input
/// order, whatever order the tasks finish in.
///
/// The first failure aborts every task still running and is returned as is.
/// A task that panics is reported as `TaskFailed`.
pub async fn ordered_fan_out<I, T, F, Fut>(inputs: Vec<I>, task: F) -> EngineResult<Vec<T>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = EngineResult<T>> + Send + 'static,
{
    let count = inputs.len();
    let mut tasks = JoinSet::new();
    for (index, input) in inputs.into_iter().enumerate() {
        let future = task(input);
        tasks.spawn(async move { (index, future.await) });
    }

    let mut slots: Vec<Option<T>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(value))) => slots[index] = Some(value),
            Ok((_, Err(err))) => {
                tasks.abort_all();
                return Err(err);
            }
            Err(join_err) => {
                tasks.abort_all();
                return Err(EngineError::TaskFailed {
                    message: join_err.to_string(),
                });
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| {
            slot.ok_or_else(|| EngineError::TaskFailed {
                message: "task finished without a result".to_string(),
            })
        })
        .collect()
}
