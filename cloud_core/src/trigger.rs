//! 触发判定：编辑器重建候选列表后，决定是否需要一次云查询。
//!
//! 判定阶梯（顺序即语义）：
//! 1. 列表为空 -> 不动作
//! 2. 首个（最佳）候选不足 2 个字符 -> 清掉记忆的查询串，不动作
//! 3. 归一化查询与上次相同 -> 这是已应答输入的重渲染：
//!    把缓存槽位加前缀后拼接进列表，**不**发新请求
//! 4. 插入点已经是云占位 -> 本插入点已有在途查询，避免重复插入
//! 5. 否则是新查询：重置槽位为 N 个 pending 占位并拼入列表，
//!    返回 `Triggered` 由调用方武装防抖定时器

use crate::config::MIN_UTF8_TRIGGER_LENGTH;
use crate::editor::{self, EditorBackend};
use crate::episode::LookupEpisode;
use crate::model::{Candidate, CandidateKind};

/// 触发判定结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// 未新触发（包括重渲染缓存的情况）
    NotTriggered,
    /// 新触发：调用方应以 `query` 武装防抖定时器
    Triggered { query: String },
}

/// 云占位总是插在首个非 n-best 候选之前。
fn insert_position(candidates: &[Candidate]) -> usize {
    candidates
        .iter()
        .position(|c| c.kind != CandidateKind::NBestMatch)
        .unwrap_or(candidates.len())
}

pub fn process_candidates<E: EditorBackend + ?Sized>(
    episode: &mut LookupEpisode,
    editor: &E,
    candidates: &mut Vec<Candidate>,
) -> TriggerDecision {
    let Some(best) = candidates.first() else {
        return TriggerDecision::NotTriggered;
    };
    // Unicode code point 计数，不是字节长度
    if best.text.chars().count() < MIN_UTF8_TRIGGER_LENGTH {
        episode.clear_last_requested_query();
        return TriggerDecision::NotTriggered;
    }

    let pos = insert_position(candidates);
    let query = editor::normalized_query(editor);

    if query == episode.last_requested_query() {
        // 已应答（或在途）输入的重渲染：拼接缓存，不再请求
        candidates.splice(pos..pos, episode.prefixed_candidates());
        return TriggerDecision::NotTriggered;
    }

    if candidates
        .get(pos)
        .is_some_and(|c| c.kind == CandidateKind::CloudInput)
    {
        return TriggerDecision::NotTriggered;
    }

    episode.reset_slots(editor.config().candidate_count);
    candidates.splice(pos..pos, episode.prefixed_candidates());
    TriggerDecision::Triggered { query }
}
