//! 时效校验：判断一个已到达的响应是否仍然对应用户当前输入。

use crate::config::CloudSource;

/// 信任规则：Baidu 无条件接受（回显不可靠）；
/// Google 只在回显与当前归一化查询串完全相等时接受，
/// 不相等说明往返期间用户又输入了内容，静默丢弃。
pub fn accepts(source: CloudSource, annotation: &str, current_query: &str) -> bool {
    match source {
        CloudSource::Baidu => true,
        CloudSource::Google => annotation == current_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baidu_accepted_unconditionally() {
        assert!(accepts(CloudSource::Baidu, "nihao", "nihaoma"));
    }

    #[test]
    fn google_requires_exact_echo() {
        assert!(accepts(CloudSource::Google, "nihao", "nihao"));
        assert!(!accepts(CloudSource::Google, "nihao", "nihaoma"));
    }
}
