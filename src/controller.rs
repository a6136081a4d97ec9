//! 画面を持たないホスト向けのコントローラ
//!
//! ブラウザ版コンポーネントと同じ状態遷移を、tokioタスクで駆動する。
//! 送信中でも新しいアップロードを受け付け、先行リクエストの応答は捨てる
//!
//! `select_file` / `drop_files` はtokioランタイム上で呼ぶ。
//! ランタイム外では状態を変えずに `ImageGenError::Runtime` を返す

use crate::client::GenerationBackend;
use crate::error::{ImageGenError, Result};
use crate::upload::UploadFile;
use imagegen_common::{validate_upload, UploadChannel, UploadedImage, ViewState};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct ImageGenerator<B: GenerationBackend> {
    state: Arc<Mutex<ViewState>>,
    backend: Arc<B>,
}

impl<B: GenerationBackend> Clone for ImageGenerator<B> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: GenerationBackend> ImageGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::new())),
            backend: Arc::new(backend),
        }
    }

    /// ファイル選択ダイアログの結果
    ///
    /// 受理した場合は送信タスクのハンドルを返す。弾いた場合は `None`
    pub fn select_file(&self, file: Option<UploadFile>) -> Result<Option<JoinHandle<()>>> {
        self.submit(UploadChannel::Picker, file)
    }

    /// ドロップされたファイル（先頭の1件のみ使う）
    pub fn drop_files(&self, files: Vec<UploadFile>) -> Result<Option<JoinHandle<()>>> {
        self.submit(UploadChannel::Drop, files.into_iter().next())
    }

    pub fn reset(&self) -> Option<UploadedImage> {
        self.state.lock().reset()
    }

    /// 現在の画面状態のスナップショット
    pub fn state(&self) -> ViewState {
        self.state.lock().clone()
    }

    pub fn is_processing(&self) -> bool {
        self.state.lock().is_processing()
    }

    fn submit(
        &self,
        channel: UploadChannel,
        file: Option<UploadFile>,
    ) -> Result<Option<JoinHandle<()>>> {
        let content_type = file.as_ref().map(|f| f.content_type.as_str());

        let file = match (validate_upload(channel, content_type), file) {
            (Ok(()), Some(file)) => file,
            (Err(e), _) => {
                self.state.lock().reject(&e);
                return Ok(None);
            }
            // validate_upload は None を必ず弾く
            (Ok(()), None) => return Ok(None),
        };

        // begin より前に確認し、送れないまま処理中にならないようにする
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ImageGenError::Runtime(e.to_string()))?;

        let (token, _replaced) = self.state.lock().begin(file.to_uploaded_image());

        let state = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);

        Ok(Some(runtime.spawn(async move {
            let outcome = backend.generate(&file).await;
            state.lock().resolve(token, outcome);
        })))
    }
}
