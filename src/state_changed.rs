//! 命令状态通知（state changed）
//!
//! `CanExecute` 的结果可能变化时，命令通过该多播订阅点同步通知宿主绑定层。
//! 通知不携带负载，按订阅顺序逐个调用；订阅者内部的失败不做隔离（调用方
//! 自行负责）。
//!
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 订阅句柄，用于退订
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn() + Send + Sync>;

/// 多播的"状态可能已变化"事件
///
/// 生命周期与命令实例一致；订阅表是命令唯一的共享可变状态。
#[derive(Default)]
pub struct StateChangedEvent {
    inner: Mutex<Subscribers>,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl StateChangedEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, Arc::new(listener)));
        id
    }

    /// 退订；句柄未知或已退订时返回 `false`
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// 按订阅顺序同步通知当前全部订阅者
    ///
    /// 先在锁内对订阅表做快照，再在锁外逐个调用，订阅者回调中可以
    /// 继续订阅/退订而不会死锁。
    pub fn raise(&self) {
        let snapshot: Vec<Listener> = self
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            (listener)();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().entries.len()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
