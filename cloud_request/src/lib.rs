//! `cloud_request`：云候选的异步层。
//!
//! 分层：
//! - `transport`：HTTP GET 抽象（可取消的异步调用 + 阻塞变体）
//! - `debounce`：单逻辑槽位的防抖定时器（重新武装即取代）
//! - `session`：请求生命周期编排（触发 -> 防抖 -> 单飞请求 -> 解析合并）
//!
//! 并发模型：单线程协作式。状态锁从不跨越 await 点，
//! 定时器与请求的取代都靠 token 比较 + 任务 abort。
pub mod debounce;
pub mod session;
pub mod transport;
