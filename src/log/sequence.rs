use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 日志记录序号分配器
///
/// 序号从 1 开始，每次分配原子递增，不重复。
/// 默认所有 Logger 共享进程级的分配器（[`global_sequence`]），
/// 需要相互隔离时（例如测试）可以注入独立实例。
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: AtomicU64,
}

impl SequenceCounter {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// 分配下一个序号
    pub fn allocate_next_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 最近一次分配的序号，尚未分配时为 0
    pub fn last_id(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

static GLOBAL_SEQUENCE: Lazy<Arc<SequenceCounter>> = Lazy::new(|| Arc::new(SequenceCounter::new()));

/// 进程级共享的序号分配器
pub fn global_sequence() -> Arc<SequenceCounter> {
    Arc::clone(&GLOBAL_SEQUENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_sequence_starts_at_one() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.last_id(), 0);
        assert_eq!(counter.allocate_next_id(), 1);
        assert_eq!(counter.allocate_next_id(), 2);
        assert_eq!(counter.last_id(), 2);
    }

    #[test]
    fn test_sequence_unique_under_concurrency() {
        let counter = Arc::new(SequenceCounter::new());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    let ids: Vec<u64> = (0..1000).map(|_| counter.allocate_next_id()).collect();
                    // 同一线程内严格递增
                    assert!(ids.windows(2).all(|w| w[0] < w[1]));
                    ids
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for worker in workers {
            for id in worker.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }

        // 没有空洞：1..=8000 全部出现
        assert_eq!(seen.len(), 8000);
        assert!((1..=8000).all(|id| seen.contains(&id)));
        assert_eq!(counter.last_id(), 8000);
    }

    #[test]
    fn test_global_sequence_is_shared() {
        let a = global_sequence();
        let b = global_sequence();
        assert!(Arc::ptr_eq(&a, &b));
        let first = a.allocate_next_id();
        assert!(b.allocate_next_id() > first);
    }
}
