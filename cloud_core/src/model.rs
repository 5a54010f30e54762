//! 数据模型：宿主候选行 + 云候选槽位。
//!
//! 约定：
//! - `Candidate` 是宿主可见的一行候选（本地 n-best 或云占位）
//! - `CloudSlot` 是本次云查询的缓存槽位，`id` 在一次查询过程中保持稳定，
//!   用于把之后的选词动作重新关联到缓存结果
//! - 槽位子状态用显式的 `SlotState` 表达，展示文本由状态推导，
//!   不再用字符串比较区分 pending/loading/结果/错误

/// 云候选展示前缀。
pub const CLOUD_PREFIX: &str = "☁";

pub const PENDING_GLYPH: &str = "[⏱️]";
pub const LOADING_GLYPH: &str = "...";
pub const NO_CANDIDATE_GLYPH: &str = "[🚫]";
pub const INVALID_DATA_GLYPH: &str = "[❌]";
pub const BAD_FORMAT_GLYPH: &str = "[❓]";

/// 候选类型：本地 n-best 句子匹配，或云输入占位/结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    NBestMatch,
    CloudInput,
}

/// 宿主可见的一行候选。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 槽位编号；云候选用它回查缓存槽位
    pub id: u32,
    /// 展示文本（云候选带 `☁` 前缀）
    pub text: String,
    pub kind: CandidateKind,
}

/// 云槽位的失败种类；网络失败没有可展示的语义，统一渲染为 invalid-data。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    NoCandidate,
    InvalidData,
    BadFormat,
}

impl SlotError {
    pub fn glyph(self) -> &'static str {
        match self {
            SlotError::NoCandidate => NO_CANDIDATE_GLYPH,
            SlotError::InvalidData => INVALID_DATA_GLYPH,
            SlotError::BadFormat => BAD_FORMAT_GLYPH,
        }
    }
}

/// 槽位子状态：pending（已占位未发请求）/ loading（请求在途）/ 结果 / 错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Loading,
    Result(String),
    Error(SlotError),
}

/// 一次云查询过程中的缓存槽位。
///
/// 不变量：槽位一旦建立，`id` 不再变化；pending -> loading -> 结果/错误
/// 只改写 `state`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudSlot {
    pub id: u32,
    pub state: SlotState,
}

impl CloudSlot {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            state: SlotState::Pending,
        }
    }

    /// 展示文本（不带前缀）。
    pub fn display_text(&self) -> &str {
        match &self.state {
            SlotState::Pending => PENDING_GLYPH,
            SlotState::Loading => LOADING_GLYPH,
            SlotState::Result(text) => text,
            SlotState::Error(err) => err.glyph(),
        }
    }

    /// 是否持有真实结果（只有真实结果可以被选中上屏）。
    pub fn has_result(&self) -> bool {
        matches!(self.state, SlotState::Result(_))
    }

    /// 转成宿主可见候选（带 `☁` 前缀）。
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.id,
            text: format!("{CLOUD_PREFIX}{}", self.display_text()),
            kind: CandidateKind::CloudInput,
        }
    }
}

/// 选词结果：瞬态槽位（占位/加载/错误）选中无效；真实结果原位改写并提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    /// 已处理，不产生提交（槽位仍是瞬态文本）
    AlreadyHandled,
    /// 提交，且必须原位修改已展示的候选（UI 不得新插入一行）
    CommitInPlace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_display_follows_state() {
        let mut slot = CloudSlot::new(3);
        assert_eq!(slot.display_text(), PENDING_GLYPH);
        slot.state = SlotState::Loading;
        assert_eq!(slot.display_text(), LOADING_GLYPH);
        slot.state = SlotState::Result("你好".to_string());
        assert_eq!(slot.display_text(), "你好");
        slot.state = SlotState::Error(SlotError::BadFormat);
        assert_eq!(slot.display_text(), BAD_FORMAT_GLYPH);
        assert_eq!(slot.id, 3);
    }

    #[test]
    fn candidate_view_carries_prefix_and_id() {
        let slot = CloudSlot {
            id: 7,
            state: SlotState::Result("测试".to_string()),
        };
        let c = slot.to_candidate();
        assert_eq!(c.id, 7);
        assert_eq!(c.kind, CandidateKind::CloudInput);
        assert_eq!(c.text, "☁测试");
    }
}
