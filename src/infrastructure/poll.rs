//! 有上限的轮询等待

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::infrastructure::form_session::Outcome;

/// 反复调用 `probe` 直到返回 `Some`，或超过 `timeout`
///
/// 至少探测一次；探测本身出错时立即返回错误，不再重试。
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<Outcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempts = 0usize;

    loop {
        attempts += 1;
        if let Some(value) = probe().await? {
            return Ok(Outcome::Ready(value));
        }

        let now = Instant::now();
        if now >= deadline {
            debug!("轮询超时: {} 次探测, 上限 {:?}", attempts, timeout);
            return Ok(Outcome::Timeout);
        }
        sleep(interval.min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_ready_after_some_attempts() {
        let calls = &AtomicUsize::new(0);
        let probe = move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok((n >= 3).then_some(n))
        };
        let outcome = poll_until(Duration::from_secs(2), Duration::from_millis(5), probe)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ready(3));
    }

    #[tokio::test]
    async fn test_times_out() {
        let outcome: Outcome<()> =
            poll_until(Duration::from_millis(30), Duration::from_millis(5), || async { Ok(None) })
                .await
                .unwrap();
        assert_eq!(outcome, Outcome::Timeout);
    }

    #[tokio::test]
    async fn test_zero_timeout_probes_once() {
        let calls = &AtomicUsize::new(0);
        let outcome = poll_until(Duration::ZERO, Duration::from_millis(5), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(()))
        })
        .await
        .unwrap();
        assert!(outcome.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_probe_error_propagates() {
        let result: Result<Outcome<()>> =
            poll_until(Duration::from_secs(1), Duration::from_millis(5), || async {
                Err(anyhow::anyhow!("页面已关闭"))
            })
            .await;
        assert!(result.is_err());
    }
}
