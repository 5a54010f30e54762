//! 请求生命周期：触发 -> 防抖 -> 单飞请求 -> 解析 -> 时效校验 -> 合并。
//!
//! 顺序保证：
//! - 同一时刻至多一个防抖定时器在等待（武装即取代）
//! - 同一时刻至多一个网络请求在途（发出前先取消旧的）
//! - 响应只有仍匹配当前输入才会落到缓存槽位（last-input-wins）
//!
//! `last_requested_query` 在**发出**请求时立即更新（而不是等响应），
//! 使往返期间的再触发能把该查询识别为已请求。

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cloud_core::config::MIN_TRIGGER_LENGTH;
use cloud_core::editor::{self, EditorBackend};
use cloud_core::episode::LookupEpisode;
use cloud_core::model::{CLOUD_PREFIX, Candidate, CandidateKind, CloudSlot, SelectAction, SlotError};
use cloud_core::parser::ParseStatus;
use cloud_core::trigger::{self, TriggerDecision};
use cloud_core::{staleness, url};

use crate::debounce::DebounceScheduler;
use crate::transport::Transport;

/// 云候选会话：宿主每次重建候选列表时调用 `process_candidates`，
/// 其余流程（定时、请求、合并、刷新）由会话自己驱动。
pub struct CloudSession<T, E> {
    shared: Arc<Shared<T, E>>,
}

struct Shared<T, E> {
    transport: T,
    editor: E,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    episode: LookupEpisode,
    timer: DebounceScheduler,
    /// 在途请求任务的所有权；新请求接管并取消旧的
    in_flight: Option<JoinHandle<()>>,
    /// 请求序号：响应任务只清理属于自己的 in_flight 记录
    request_seq: u64,
}

impl<T, E> CloudSession<T, E>
where
    T: Transport + 'static,
    E: EditorBackend + 'static,
{
    pub fn new(transport: T, editor: E) -> Self {
        Self {
            shared: Arc::new(Shared {
                transport,
                editor,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// 触发判定入口；返回是否新触发了一次云查询。
    ///
    /// 新触发只武装防抖定时器，网络请求一律等定时器到点后才发出，
    /// 连续击键因此合并成一次请求。
    pub fn process_candidates(&self, candidates: &mut Vec<Candidate>) -> bool {
        let decision = {
            let mut st = self.shared.state.lock();
            trigger::process_candidates(&mut st.episode, &self.shared.editor, candidates)
        };
        match decision {
            TriggerDecision::Triggered { query } => {
                self.arm(query);
                true
            }
            TriggerDecision::NotTriggered => false,
        }
    }

    fn arm(&self, query: String) {
        let delay = self.shared.editor.config().delay;
        debug!(query = %query, delay_ms = delay.as_millis() as u64, "arming debounce timer");
        let shared = Arc::clone(&self.shared);
        self.shared
            .state
            .lock()
            .timer
            .arm(delay, move || Shared::issue_request(shared, query));
    }

    /// 选词：瞬态槽位返回 `AlreadyHandled`；真实结果把文本拷回
    /// `chosen` 并要求宿主原位提交（不得新插入一行）。
    pub fn select_candidate(&self, chosen: &mut Candidate) -> SelectAction {
        debug_assert_eq!(chosen.kind, CandidateKind::CloudInput);
        self.shared.state.lock().episode.select(chosen)
    }

    /// 同步变体：不经过防抖，阻塞到服务端应答或失败，
    /// 结果直接写进调用方提供的列表而不是缓存槽位。
    pub fn sync_request(&self, query: &str, out: &mut Vec<Candidate>) {
        let config = self.shared.editor.config();
        let request_url = url::query_url(config.source, query, config.candidate_count);
        let data = match self.shared.transport.issue_get_blocking(&request_url) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!(error = %err, "blocking cloud request failed");
                None
            }
        };
        let outcome = config.source.parser().parse(data.as_deref());
        if outcome.status == ParseStatus::Ok {
            out.extend(outcome.words.iter().enumerate().map(|(i, word)| Candidate {
                id: i as u32,
                text: format!("{CLOUD_PREFIX}{word}"),
                kind: CandidateKind::CloudInput,
            }));
        }
    }

    /// 会话结束或输入清空：取消定时器与在途请求，丢弃查询过程状态。
    pub fn reset(&self) {
        let mut st = self.shared.state.lock();
        st.timer.cancel();
        if let Some(in_flight) = st.in_flight.take() {
            in_flight.abort();
        }
        st.episode.clear();
    }

    /// 最近一次已发出的归一化查询串（发出时即更新）。
    pub fn last_requested_query(&self) -> String {
        self.shared.state.lock().episode.last_requested_query().to_string()
    }

    /// 缓存槽位快照（调试/检视用）。
    pub fn cached_slots(&self) -> Vec<CloudSlot> {
        self.shared.state.lock().episode.slots().to_vec()
    }
}

impl<T, E> Shared<T, E>
where
    T: Transport + 'static,
    E: EditorBackend + 'static,
{
    /// 定时器到点后的唯一请求路径。
    async fn issue_request(shared: Arc<Self>, query: String) {
        let config = shared.editor.config();
        let request_url = url::query_url(config.source, &query, config.candidate_count);
        debug!(url = %request_url, "issuing cloud request");

        let seq;
        {
            let mut st = shared.state.lock();
            // 至多一个在途请求：先取消旧的
            if let Some(prev) = st.in_flight.take() {
                prev.abort();
            }
            st.request_seq += 1;
            seq = st.request_seq;
            st.episode.set_last_requested_query(&query);
            st.episode.set_loading();
        }

        let task_shared = Arc::clone(&shared);
        let handle = tokio::spawn(async move {
            let data = match task_shared.transport.issue_get(&request_url).await {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    debug!(error = %err, "cloud request failed");
                    None
                }
            };
            Shared::process_response(&task_shared, data.as_deref());
            let mut st = task_shared.state.lock();
            if st.request_seq == seq {
                st.in_flight = None;
            }
        });
        {
            let mut st = shared.state.lock();
            if st.request_seq == seq {
                st.in_flight = Some(handle);
            }
        }

        Self::refresh_if_editing(&shared);
    }

    /// 响应处理：解析 -> 时效校验 -> 原位合并。
    fn process_response(shared: &Arc<Self>, data: Option<&[u8]>) {
        let config = shared.editor.config();
        let outcome = config.source.parser().parse(data);
        // 与触发判定用同一套归一化，才能和回显逐字比较
        let current = editor::normalized_query(&shared.editor);
        {
            let mut st = shared.state.lock();
            if outcome.status == ParseStatus::NetworkError {
                // 没有响应就没有回显可查：直接可见地失败
                st.episode.fail_all(SlotError::InvalidData);
            }
            if let Some(annotation) = &outcome.annotation {
                if staleness::accepts(config.source, annotation, &current) {
                    match outcome.status {
                        ParseStatus::Ok => st.episode.apply_words(&outcome.words),
                        ParseStatus::NoCandidate => st.episode.fail_all(SlotError::NoCandidate),
                        ParseStatus::InvalidData => st.episode.fail_all(SlotError::InvalidData),
                        ParseStatus::BadFormat => st.episode.fail_all(SlotError::BadFormat),
                        ParseStatus::NetworkError => {}
                    }
                } else {
                    warn!(annotation = %annotation, current = %current, "stale cloud response discarded");
                }
            } else if outcome.status != ParseStatus::NetworkError {
                // 无回显：当作已取消请求的迟到响应，静默丢弃
                debug!("cloud response without annotation, treated as cancelled");
            }
        }
        Self::refresh_if_editing(shared);
    }

    /// 只有原始拼音文本仍达到触发长度才请求重绘
    /// （用户已清空输入时抑制过期刷新）。
    fn refresh_if_editing(shared: &Arc<Self>) {
        if shared.editor.raw_text().chars().count() >= MIN_TRIGGER_LENGTH {
            shared.editor.refresh_candidate_list();
        }
    }
}
