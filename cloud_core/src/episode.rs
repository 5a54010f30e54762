//! `LookupEpisode`：一次云查询过程的缓存槽位与原位合并。
//!
//! 约定：
//! - 新查询触发时重置槽位：编号 0..N-1 的 pending 占位
//! - 查询在途期间可见列表里的云占位数量恒等于配置的候选数量，
//!   相对顺序与 `id` 顺序一致
//! - 响应到达后按位置改写：槽位 i <- 词 i；返回的词不足时，
//!   多出的槽位保留原文本；`id` 从不重新分配
//! - 只有合并步骤改写槽位（单线程协作模型下天然互斥）

use crate::model::{Candidate, CloudSlot, SelectAction, SlotError, SlotState};

/// 最近一次触发的查询过程状态。
#[derive(Debug, Default)]
pub struct LookupEpisode {
    /// 最近一次已发出（或已命中缓存）的归一化查询串，用于抑制重复请求
    last_requested_query: String,
    /// 缓存槽位（数量 = 配置的候选数量），过程中原位改写
    slots: Vec<CloudSlot>,
}

impl LookupEpisode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_requested_query(&self) -> &str {
        &self.last_requested_query
    }

    /// 发出请求的同时立即记住查询串（而不是等响应），
    /// 让往返期间的再触发能识别“该查询已在请求中”。
    pub fn set_last_requested_query(&mut self, query: &str) {
        self.last_requested_query.clear();
        self.last_requested_query.push_str(query);
    }

    /// 输入过短时清掉记忆的查询串（下次同样输入仍会重新触发）。
    pub fn clear_last_requested_query(&mut self) {
        self.last_requested_query.clear();
    }

    pub fn slots(&self) -> &[CloudSlot] {
        &self.slots
    }

    /// 重置为 N 个新编号的 pending 占位。
    pub fn reset_slots(&mut self, count: usize) {
        self.slots = (0..count).map(|i| CloudSlot::new(i as u32)).collect();
    }

    /// 请求发出后把全部槽位置为 loading。
    pub fn set_loading(&mut self) {
        for slot in &mut self.slots {
            slot.state = SlotState::Loading;
        }
    }

    /// 按位置改写：槽位 i <- 词 i（i < min(槽位数, 词数)）；其余槽位保留原文本。
    pub fn apply_words(&mut self, words: &[String]) {
        for (slot, word) in self.slots.iter_mut().zip(words) {
            slot.state = SlotState::Result(word.clone());
        }
    }

    /// 整批失败：全部槽位改写为对应错误字形。
    pub fn fail_all(&mut self, err: SlotError) {
        for slot in &mut self.slots {
            slot.state = SlotState::Error(err);
        }
    }

    /// 生成带前缀的可见候选（占位插入与缓存重渲染共用）。
    pub fn prefixed_candidates(&self) -> Vec<Candidate> {
        self.slots.iter().map(CloudSlot::to_candidate).collect()
    }

    /// 选词：按 `id` 回查缓存槽位。瞬态槽位选中无效；
    /// 真实结果把文本拷回被选候选并要求原位提交。
    pub fn select(&self, chosen: &mut Candidate) -> SelectAction {
        let Some(slot) = self.slots.iter().find(|s| s.id == chosen.id) else {
            return SelectAction::AlreadyHandled;
        };
        match &slot.state {
            SlotState::Result(text) => {
                chosen.text.clear();
                chosen.text.push_str(text);
                SelectAction::CommitInPlace
            }
            _ => SelectAction::AlreadyHandled,
        }
    }

    /// 查询过程结束（会话结束/输入清空）：丢弃槽位与记忆的查询串。
    pub fn clear(&mut self) {
        self.last_requested_query.clear();
        self.slots.clear();
    }
}
