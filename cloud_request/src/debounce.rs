//! 防抖定时器：单逻辑槽位，重新武装即取代。
//!
//! 约定：
//! - 武装时无条件取消已有定时器，并记住新定时器的 token
//! - 定时器到点后只有 token 仍等于当前记忆值才继续
//!   （防住 abort 未及时生效、旧定时器仍然到点的竞态）
//! - 继续时清掉记忆的 token，再执行回调——
//!   这是唯一允许发出网络请求的路径

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct DebounceScheduler {
    /// 当前武装的定时器 token；0 表示没有
    armed: Arc<AtomicU64>,
    counter: u64,
    pending: Option<JoinHandle<()>>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 武装定时器：延迟 `delay` 后执行 `fire`；再次武装会取代未到点的定时器。
    pub fn arm<F, Fut>(&mut self, delay: Duration, fire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.counter += 1;
        let token = self.counter;
        self.armed.store(token, Ordering::SeqCst);

        let armed = Arc::clone(&self.armed);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // 只认最新武装的定时器；比较并清零
            if armed
                .compare_exchange(token, 0, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                fire().await;
            }
        }));
    }

    /// 取消未到点的定时器（若有）。
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.armed.store(0, Ordering::SeqCst);
    }
}
