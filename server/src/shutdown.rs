//! シャットダウン制御
//!
//! OSシグナルとは別に、テストや組み込み先からサーバーを止めるためのハンドル。

use tokio::sync::watch;

/// サーバー停止要求を伝えるハンドル
///
/// クローンはすべて同じ停止状態を共有する。
#[derive(Clone, Debug)]
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }
}

impl ShutdownController {
    /// 停止が要求済みか
    pub fn is_shutdown_requested(&self) -> bool {
        *self.tx.borrow()
    }

    /// 停止を要求し、待機中のタスクを起こす
    pub fn request_shutdown(&self) {
        self.tx.send_replace(true);
    }

    /// 停止が要求されるまで待つ
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // 送信側は self が保持しているので閉じることはない
        let _ = rx.wait_for(|requested| *requested).await;
    }
}
