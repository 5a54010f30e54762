//! 请求 URL 构造：两个来源的模板形状不同，查询串都需要编码。

use crate::config::CloudSource;

const BAIDU_URL_TEMPLATE: &str = "http://olime.baidu.com/py?input=";
const GOOGLE_URL_TEMPLATE: &str = "https://www.google.com/inputtools/request?ime=pinyin&text=";

/// 由归一化拼音串与候选数量生成来源对应的查询 URL。
pub fn query_url(source: CloudSource, query: &str, count: usize) -> String {
    let query = urlencoding::encode(query);
    match source {
        CloudSource::Baidu => format!(
            "{BAIDU_URL_TEMPLATE}{query}&inputtype=py&bg=0&ed={count}&result=hanzi&resultcoding=utf-8&ch_en=1&clientinfo=web&version=1"
        ),
        CloudSource::Google => format!("{GOOGLE_URL_TEMPLATE}{query}&num={count}"),
    }
}
