//! 云候选演示 CLI：把一个假想的本地候选列表接到云查询会话上。
//!
//! 没有本地词典引擎（那是宿主的职责），这里用输入行本身伪造一个
//! n-best 候选，完整走一遍 触发 -> 防抖 -> 请求 -> 合并 -> 重渲染。

use std::env;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use cloud_core::config::{CloudConfig, CloudSource};
use cloud_core::editor::EditorBackend;
use cloud_core::model::{Candidate, CandidateKind, SelectAction, SlotState};
use cloud_request::session::CloudSession;
use cloud_request::transport::HttpTransport;

/// CLI 扮演的“编辑器”：只有原始拼音文本和一个重绘通知通道。
struct CliEditor {
    raw: Mutex<String>,
    config: CloudConfig,
    redraw: mpsc::UnboundedSender<()>,
}

impl CliEditor {
    fn set_raw(&self, raw: &str) {
        let mut guard = self.raw.lock().unwrap_or_else(|e| e.into_inner());
        guard.clear();
        guard.push_str(raw);
    }
}

impl EditorBackend for CliEditor {
    fn raw_text(&self) -> String {
        self.raw.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn full_spelling(&self) -> String {
        self.raw_text()
    }

    fn config(&self) -> CloudConfig {
        self.config.clone()
    }

    fn refresh_candidate_list(&self) {
        let _ = self.redraw.send(());
    }
}

fn parse_args() -> CloudConfig {
    let mut config = CloudConfig {
        source: CloudSource::Baidu,
        delay: Duration::from_millis(600),
        candidate_count: 2,
        double_pinyin: false,
    };
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--source" => {
                if let Some(v) = args.next() {
                    config.source = match v.as_str() {
                        "google" => CloudSource::Google,
                        _ => CloudSource::Baidu,
                    };
                }
            }
            "--count" => {
                if let Some(n) = args.next().and_then(|v| v.parse().ok()) {
                    config.candidate_count = n;
                }
            }
            "--delay" => {
                if let Some(ms) = args.next().and_then(|v| v.parse().ok()) {
                    config.delay = Duration::from_millis(ms);
                }
            }
            "--help" | "-h" => print_help(),
            _ => {}
        }
    }
    config
}

fn print_help() -> ! {
    println!(
        "用法：cloud_cli [--source baidu|google] [--count N] [--delay ms]\n交互：输入拼音后回车，等云候选就位；输入 1-9 选择候选上屏；输入 :q 退出"
    );
    std::process::exit(0);
}

fn local_candidates(raw: &str) -> Vec<Candidate> {
    // 没有本地引擎：用原始拼音伪造唯一的 n-best 句子候选
    vec![Candidate {
        id: 0,
        text: raw.to_string(),
        kind: CandidateKind::NBestMatch,
    }]
}

fn render(list: &[Candidate]) {
    for (i, c) in list.iter().enumerate() {
        println!("{}. {}", i + 1, c.text);
    }
}

fn sanitize_input(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '\'')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = parse_args();
    let (redraw_tx, mut redraw_rx) = mpsc::unbounded_channel();
    let editor = Arc::new(CliEditor {
        raw: Mutex::new(String::new()),
        config,
        redraw: redraw_tx,
    });
    let session = CloudSession::new(HttpTransport::new(), Arc::clone(&editor));

    println!("cloud-pinyin demo | 输入拼音后回车（:q 退出）");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown: Vec<Candidate> = Vec::new();

    loop {
        print!("pinyin> ");
        let _ = std::io::stdout().flush();
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let input = line.trim();
        if input == ":q" || input == ":quit" {
            break;
        }

        // 数字：对上一轮展示的列表选词
        if let Ok(n) = input.parse::<usize>() {
            let Some(chosen) = (n >= 1).then(|| shown.get(n - 1)).flatten() else {
                println!("(无效选择)");
                continue;
            };
            let mut chosen = chosen.clone();
            match chosen.kind {
                CandidateKind::CloudInput => match session.select_candidate(&mut chosen) {
                    SelectAction::CommitInPlace => println!("commit: {}", chosen.text),
                    SelectAction::AlreadyHandled => println!("(候选尚未就位)"),
                },
                CandidateKind::NBestMatch => println!("commit: {}", chosen.text),
            }
            continue;
        }

        let raw = sanitize_input(input);
        if raw.is_empty() {
            println!("(忽略：只接受 a-z 和 ' )");
            continue;
        }
        editor.set_raw(&raw);

        let mut list = local_candidates(&raw);
        session.process_candidates(&mut list);
        render(&list);
        shown = list;

        // 等云候选就位：每次重绘通知都重建列表（重渲染路径拼接缓存）
        while let Ok(Some(())) =
            tokio::time::timeout(Duration::from_secs(3), redraw_rx.recv()).await
        {
            let mut list = local_candidates(&raw);
            session.process_candidates(&mut list);
            println!("--------------------");
            render(&list);
            shown = list;
            let settled = session
                .cached_slots()
                .iter()
                .all(|s| !matches!(s.state, SlotState::Loading | SlotState::Pending));
            if settled {
                break;
            }
        }
    }
}
