//! 编辑器协作方接口：云候选引擎消费的宿主能力。
//!
//! 约定：
//! - `raw_text`：用户尚未上屏的原始拼音文本
//! - `full_spelling`：双拼方案下重算出的完整拼音拼写（宿主辅助文本，
//!   可能含声调/光标标记与分隔符）
//! - `refresh_candidate_list`：请求宿主重建候选列表并重绘
//! - 配置每次触发前重新读取，而不是构造时缓存一份

use crate::config::CloudConfig;

pub trait EditorBackend: Send + Sync {
    fn raw_text(&self) -> String;

    /// 重算完整拼音拼写（仅双拼方案会用到）。
    fn full_spelling(&self) -> String;

    fn config(&self) -> CloudConfig;

    fn refresh_candidate_list(&self);
}

impl<E: EditorBackend + ?Sized> EditorBackend for std::sync::Arc<E> {
    fn raw_text(&self) -> String {
        (**self).raw_text()
    }
    fn full_spelling(&self) -> String {
        (**self).full_spelling()
    }
    fn config(&self) -> CloudConfig {
        (**self).config()
    }
    fn refresh_candidate_list(&self) {
        (**self).refresh_candidate_list()
    }
}

/// 归一化查询串：全拼方案直接取原始文本；
/// 双拼方案取完整拼音拼写并去掉空格与 `|` 分隔符后拼接。
pub fn normalized_query<E: EditorBackend + ?Sized>(editor: &E) -> String {
    if !editor.config().double_pinyin {
        return editor.raw_text();
    }
    editor
        .full_spelling()
        .split(|c| c == ' ' || c == '|')
        .collect()
}
