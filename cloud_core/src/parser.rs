//! 响应解析：把云服务返回的 JSON 负载解码为 `ParseOutcome`。
//!
//! 两个来源的负载形状不同：
//! - Google：`["SUCCESS", [[<annotation>, [<词>...], ...], ...]]`
//! - Baidu：`{"status":"T", "result":[[[<词>, ...], ...], <annotation>]}`
//!
//! 解析失败从不向上抛错：所有失败都折叠进 `ParseStatus`，由合并层渲染为
//! 对应的错误字形。解析器无内部状态，同一实例可跨请求复用。

use serde_json::Value;

use crate::config::CloudSource;
use crate::model::INVALID_DATA_GLYPH;

/// 解析状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// 解析成功，`words` 有效
    Ok,
    /// JSON 合法但语义字段缺失/不符（非成功状态、缺 annotation 等）
    InvalidData,
    /// 负载不是合法 JSON，或顶层形状不符
    BadFormat,
    /// 形状合法但候选为空
    NoCandidate,
    /// 没有拿到响应（传输失败或完成前被取消）
    NetworkError,
}

/// 一次响应的解码结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub status: ParseStatus,
    /// 服务端回显的归一化查询串（时效校验用；可靠性因来源而异）
    pub annotation: Option<String>,
    /// 解码出的候选词（仅 `status == Ok` 时有意义）
    pub words: Vec<String>,
}

impl ParseOutcome {
    fn status_only(status: ParseStatus) -> Self {
        Self {
            status,
            annotation: None,
            words: Vec::new(),
        }
    }
}

/// 解析器的唯一能力：把响应字节解码为 `ParseOutcome`。
///
/// `data` 为 `None` 表示传输层没有产出字节流（失败或取消）。
pub trait ResponseParser: Send + Sync {
    fn parse(&self, data: Option<&[u8]>) -> ParseOutcome;
}

impl CloudSource {
    /// 按配置选择解析器，每次请求决定一次。
    pub fn parser(self) -> &'static dyn ResponseParser {
        match self {
            CloudSource::Baidu => &BaiduParser,
            CloudSource::Google => &GoogleParser,
        }
    }
}

pub struct GoogleParser;

impl ResponseParser for GoogleParser {
    fn parse(&self, data: Option<&[u8]>) -> ParseOutcome {
        let Some(data) = data else {
            return ParseOutcome::status_only(ParseStatus::NetworkError);
        };
        let Ok(root) = serde_json::from_slice::<Value>(data) else {
            return ParseOutcome::status_only(ParseStatus::BadFormat);
        };
        let Some(root) = root.as_array() else {
            return ParseOutcome::status_only(ParseStatus::BadFormat);
        };

        if root.len() <= 1 {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        }
        if root[0].as_str() != Some("SUCCESS") {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        }
        let Some(response) = root[1].as_array() else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        let Some(result) = response.first().and_then(Value::as_array) else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        let Some(annotation) = result.first().and_then(Value::as_str) else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        let annotation = annotation.to_string();

        let Some(candidates) = result.get(1).and_then(Value::as_array) else {
            return ParseOutcome {
                status: ParseStatus::InvalidData,
                annotation: Some(annotation),
                words: Vec::new(),
            };
        };
        if candidates.is_empty() {
            return ParseOutcome {
                status: ParseStatus::NoCandidate,
                annotation: Some(annotation),
                words: Vec::new(),
            };
        }

        let words = candidates
            .iter()
            .map(|c| c.as_str().unwrap_or(INVALID_DATA_GLYPH).to_string())
            .collect();
        ParseOutcome {
            status: ParseStatus::Ok,
            annotation: Some(annotation),
            words,
        }
    }
}

pub struct BaiduParser;

impl ResponseParser for BaiduParser {
    fn parse(&self, data: Option<&[u8]>) -> ParseOutcome {
        let Some(data) = data else {
            return ParseOutcome::status_only(ParseStatus::NetworkError);
        };
        let Ok(root) = serde_json::from_slice::<Value>(data) else {
            return ParseOutcome::status_only(ParseStatus::BadFormat);
        };
        let Some(root) = root.as_object() else {
            return ParseOutcome::status_only(ParseStatus::BadFormat);
        };

        if root.get("status").and_then(Value::as_str) != Some("T") {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        }
        let Some(result) = root.get("result").and_then(Value::as_array) else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        if result.len() < 2 {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        }
        let Some(candidates) = result[0].as_array() else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        let Some(annotation) = result[1].as_str() else {
            return ParseOutcome::status_only(ParseStatus::InvalidData);
        };
        // Baidu 的 annotation 用 `'` 分隔音节，去掉后再比对
        let annotation: String = annotation.split('\'').collect();

        if candidates.is_empty() {
            return ParseOutcome {
                status: ParseStatus::NoCandidate,
                annotation: Some(annotation),
                words: Vec::new(),
            };
        }

        // 单个候选子数组为空时替换为 invalid-data 字形，不拒绝整批
        let words = candidates
            .iter()
            .map(|c| {
                c.as_array()
                    .and_then(|entry| entry.first())
                    .and_then(Value::as_str)
                    .unwrap_or(INVALID_DATA_GLYPH)
                    .to_string()
            })
            .collect();
        ParseOutcome {
            status: ParseStatus::Ok,
            annotation: Some(annotation),
            words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: CloudSource, payload: &str) -> ParseOutcome {
        source.parser().parse(Some(payload.as_bytes()))
    }

    #[test]
    fn baidu_well_formed_payload() {
        let outcome = parse(
            CloudSource::Baidu,
            r#"{"status":"T","result":[[["词",1]],"ci"]}"#,
        );
        assert_eq!(outcome.status, ParseStatus::Ok);
        assert_eq!(outcome.annotation.as_deref(), Some("ci"));
        assert_eq!(outcome.words, vec!["词".to_string()]);
    }

    #[test]
    fn baidu_annotation_separators_removed() {
        let outcome = parse(
            CloudSource::Baidu,
            r#"{"status":"T","result":[[["你好",2]],"ni'hao"]}"#,
        );
        assert_eq!(outcome.annotation.as_deref(), Some("nihao"));
    }

    #[test]
    fn baidu_empty_candidate_entry_substitutes_glyph() {
        let outcome = parse(
            CloudSource::Baidu,
            r#"{"status":"T","result":[[["词",1],[]],"ci"]}"#,
        );
        assert_eq!(outcome.status, ParseStatus::Ok);
        assert_eq!(
            outcome.words,
            vec!["词".to_string(), INVALID_DATA_GLYPH.to_string()]
        );
    }

    #[test]
    fn baidu_missing_status_is_invalid() {
        let outcome = parse(CloudSource::Baidu, r#"{"result":[[["词"]],"ci"]}"#);
        assert_eq!(outcome.status, ParseStatus::InvalidData);
    }

    #[test]
    fn baidu_non_success_status_is_invalid() {
        let outcome = parse(CloudSource::Baidu, r#"{"status":"F","result":[]}"#);
        assert_eq!(outcome.status, ParseStatus::InvalidData);
    }

    #[test]
    fn baidu_empty_candidates_is_no_candidate() {
        let outcome = parse(CloudSource::Baidu, r#"{"status":"T","result":[[],"ci"]}"#);
        assert_eq!(outcome.status, ParseStatus::NoCandidate);
        assert_eq!(outcome.annotation.as_deref(), Some("ci"));
    }

    #[test]
    fn google_well_formed_payload() {
        let outcome = parse(
            CloudSource::Google,
            r#"["SUCCESS",[["ceshi",["测试"],[],{}]]]"#,
        );
        assert_eq!(outcome.status, ParseStatus::Ok);
        assert_eq!(outcome.annotation.as_deref(), Some("ceshi"));
        assert_eq!(outcome.words, vec!["测试".to_string()]);
    }

    #[test]
    fn google_failure_status_is_invalid() {
        let outcome = parse(CloudSource::Google, r#"["FAIL"]"#);
        assert_eq!(outcome.status, ParseStatus::InvalidData);
    }

    #[test]
    fn google_empty_candidates_is_no_candidate() {
        let outcome = parse(CloudSource::Google, r#"["SUCCESS",[["ceshi",[]]]]"#);
        assert_eq!(outcome.status, ParseStatus::NoCandidate);
        assert_eq!(outcome.annotation.as_deref(), Some("ceshi"));
    }

    #[test]
    fn google_object_root_is_bad_format() {
        let outcome = parse(CloudSource::Google, r#"{"status":"T"}"#);
        assert_eq!(outcome.status, ParseStatus::BadFormat);
    }

    #[test]
    fn garbage_payload_is_bad_format() {
        for source in [CloudSource::Baidu, CloudSource::Google] {
            let outcome = parse(source, "<html>not json</html>");
            assert_eq!(outcome.status, ParseStatus::BadFormat);
        }
    }

    #[test]
    fn absent_stream_is_network_error() {
        for source in [CloudSource::Baidu, CloudSource::Google] {
            let outcome = source.parser().parse(None);
            assert_eq!(outcome.status, ParseStatus::NetworkError);
            assert_eq!(outcome.annotation, None);
        }
    }
}
