//! `cloud_core`：云候选的纯逻辑层（不做任何 I/O）。
//!
//! 设计目标：
//! - **核心可复用**：CLI/GUI/IME 宿主都能复用同一套逻辑
//! - **分层清晰**：trigger（触发判定） -> episode（占位与合并） -> parser（响应解析）
//!   -> staleness（时效校验） -> 输出（宿主候选列表原位改写）
//! - **易测试**：网络与定时器都在 `cloud_request` 层，这里只有可同步验证的状态变换
pub mod config;
pub mod editor;
pub mod episode;
pub mod model;
pub mod parser;
pub mod staleness;
pub mod trigger;
pub mod url;
