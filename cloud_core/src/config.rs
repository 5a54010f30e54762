//! 云输入配置：来源、延迟、候选数量、双拼开关。
//!
//! 配置由宿主编辑器提供，每次触发前重新读取（允许运行期改配置）。

use std::time::Duration;

/// 首个 n-best 候选的最小字符数（Unicode code point 计数），低于此值不发请求。
pub const MIN_UTF8_TRIGGER_LENGTH: usize = 2;

/// 原始拼音文本的最小长度；低于此值不再刷新候选列表（用户已清空输入）。
pub const MIN_TRIGGER_LENGTH: usize = 2;

/// 云候选来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSource {
    Baidu,
    Google,
}

/// 云输入配置快照。
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub source: CloudSource,
    /// 防抖延迟：重置定时器的等待窗口
    pub delay: Duration,
    /// 请求/占位的候选数量
    pub candidate_count: usize,
    /// 双拼输入方案开关（决定归一化查询串的来源）
    pub double_pinyin: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            source: CloudSource::Baidu,
            delay: Duration::from_millis(600),
            candidate_count: 1,
            double_pinyin: false,
        }
    }
}
