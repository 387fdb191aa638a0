//! Bounded order-preserving concurrency
//!
//! The remote service enforces per-second request ceilings; unbounded fan-out
//! over a large playlist collection would trigger cascading rate limits. This
//! primitive runs a fixed pool of cooperative workers over one shared queue,
//! so the limit bounds real in-flight requests no matter the input size.

use futures::future::try_join_all;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::Mutex;

/// Apply `mapper` to every item with at most `limit` invocations in flight
///
/// Results come back in input order regardless of completion order. The pool
/// is `min(limit, items.len())` workers pulling `(index, item)` pairs from a
/// mutex-guarded queue; no task-per-item spawning happens. The first mapper
/// error cancels outstanding work and propagates.
pub async fn map_concurrently<T, R, E, F, Fut>(
    items: Vec<T>,
    limit: usize,
    mapper: F,
) -> Result<Vec<R>, E>
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total = items.len();
    let worker_count = limit.max(1).min(total);

    let queue: Mutex<VecDeque<(usize, T)>> = Mutex::new(items.into_iter().enumerate().collect());
    let results: Mutex<Vec<(usize, R)>> = Mutex::new(Vec::with_capacity(total));

    let workers = (0..worker_count).map(|_| {
        let queue = &queue;
        let results = &results;
        let mapper = &mapper;
        async move {
            loop {
                let next = queue.lock().await.pop_front();
                let Some((index, item)) = next else {
                    return Ok(());
                };
                let value = mapper(item, index).await?;
                results.lock().await.push((index, value));
            }
        }
    });

    try_join_all(workers).await?;

    let mut collected = results.into_inner();
    collected.sort_by_key(|(index, _)| *index);
    Ok(collected.into_iter().map(|(_, value)| value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_preserves_input_order() {
        // Earlier items sleep longer, so completion order is reversed
        let items: Vec<u64> = (0..8).collect();
        let results = map_concurrently(items, 4, |item, index| async move {
            tokio::time::sleep(Duration::from_millis(40 - item * 5)).await;
            Ok::<_, String>(index)
        })
        .await
        .unwrap();

        assert_eq!(results, (0..8).collect::<Vec<usize>>());
    }

    #[tokio::test]
    async fn test_limit_bounds_in_flight_work() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let items: Vec<u32> = (0..12).collect();
        map_concurrently(items, 3, |_, index| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(index)
            }
        })
        .await
        .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_limit_of_one_is_sequential() {
        let results = map_concurrently(vec!["a", "b", "c"], 1, |item, index| async move {
            Ok::<_, String>(format!("{}{}", item, index))
        })
        .await
        .unwrap();

        assert_eq!(results, vec!["a0", "b1", "c2"]);
    }

    #[tokio::test]
    async fn test_error_propagates() {
        let result = map_concurrently(vec![1, 2, 3, 4], 2, |item, _| async move {
            if item == 3 {
                Err("boom".to_string())
            } else {
                Ok(item)
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "boom");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let results = map_concurrently(Vec::<u32>::new(), 4, |item, _| async move {
            Ok::<_, String>(item)
        })
        .await
        .unwrap();

        assert!(results.is_empty());
    }
}
