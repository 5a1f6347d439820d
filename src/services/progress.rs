//! 进度估算服务 - 业务能力层
//!
//! 用已完成序列的平均耗时推算剩余时间，只用于显示

use std::time::{Duration, Instant};

/// 剩余时间估算器
#[derive(Debug, Clone, Copy)]
pub struct ProgressEstimator {
    start: Instant,
    total: usize,
}

impl ProgressEstimator {
    /// 以当前时刻作为起点
    pub fn start(total: usize) -> Self {
        Self::with_start(Instant::now(), total)
    }

    pub fn with_start(start: Instant, total: usize) -> Self {
        Self { start, total }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 已完成 `completed` 条时的剩余时间
    pub fn remaining(&self, completed: usize) -> Duration {
        estimate(self.start, completed, self.total)
    }
}

/// 从 `start` 起已完成 `completed`/`total` 条时的剩余时间
pub fn estimate(start: Instant, completed: usize, total: usize) -> Duration {
    project(start.elapsed(), completed, total)
}

/// 平均耗时 × 剩余条数；`completed` 为 0 时平均耗时视为 0
pub fn project(elapsed: Duration, completed: usize, total: usize) -> Duration {
    if completed == 0 {
        return Duration::ZERO;
    }
    let per_item = elapsed / completed as u32;
    let remaining = total.saturating_sub(completed);
    per_item * remaining as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_completed_is_zero() {
        assert_eq!(project(Duration::from_secs(30), 0, 10), Duration::ZERO);
        assert_eq!(project(Duration::ZERO, 0, 0), Duration::ZERO);
    }

    #[test]
    fn test_projects_average() {
        assert_eq!(project(Duration::from_secs(20), 2, 5), Duration::from_secs(30));
        assert_eq!(project(Duration::from_secs(9), 3, 3), Duration::ZERO);
    }

    #[test]
    fn test_completed_beyond_total_saturates() {
        assert_eq!(project(Duration::from_secs(10), 5, 3), Duration::ZERO);
    }

    #[test]
    fn test_non_increasing_at_fixed_rate() {
        let rate = Duration::from_millis(1500);
        let total = 12;
        let mut previous = Duration::MAX;
        for completed in 1..=total {
            let elapsed = rate * completed as u32;
            let remaining = project(elapsed, completed, total);
            assert!(remaining <= previous, "第 {} 条时剩余时间变大", completed);
            previous = remaining;
        }
        assert_eq!(previous, Duration::ZERO);
    }

    #[test]
    fn test_estimator_from_start() {
        let estimator = ProgressEstimator::start(4);
        assert_eq!(estimator.remaining(0), Duration::ZERO);
        assert!(estimator.remaining(4) == Duration::ZERO);
    }
}
