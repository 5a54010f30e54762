//! 传输抽象：core 不关心字节流来自 reqwest 还是测试脚本。

use async_trait::async_trait;

/// 传输失败。取消在途请求依赖任务 abort，属于尽力而为：
/// 若响应仍然到达，会交给时效校验丢弃。
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request cancelled before completion")]
    Cancelled,
}

/// 异步 GET + 阻塞变体。
///
/// 阻塞变体是给“必须立刻拿到答案”的调用方的逃生口（不走防抖），
/// 不要在事件循环上调用。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn issue_get(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    fn issue_get_blocking(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// 基于 reqwest 的默认传输。
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn issue_get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn issue_get_blocking(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = reqwest::blocking::get(url)?;
        Ok(response.bytes()?.to_vec())
    }
}
