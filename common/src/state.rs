//! 画面状態の状態遷移
//!
//! 入力プレビュー・生成結果・エラーメッセージ・処理中フラグの4項目を
//! `Phase` に畳み込み、処理中とエラー/成功が同時に立たないようにする。
//! ただし待機中に弾いたファイルのエラーは、応答が成功しても残る。
//!
//! ```text
//! Idle --begin--> Processing --resolve(Ok)--> Succeeded
//!                     |      --resolve(Err)-> Failed
//! Succeeded/Failed --begin--> Processing
//! (any) --reset--> Idle
//! ```

use crate::error::Error;
use crate::response::GenerationResult;

/// 発行済みリクエストの識別子
///
/// 古いリクエストの応答が新しい状態を上書きしないよう照合に使う
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// ローカルで参照できるアップロード画像
///
/// `preview_url` はブラウザではObject URL、ネイティブではdata URL。
/// 差し替え・リセット時に返却されるので呼び出し側で解放する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub preview_url: String,
    pub file_name: String,
    pub content_type: String,
}

/// 表示フェーズ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// 入力なし
    #[default]
    Idle,
    /// リクエスト送信済み、応答待ち
    ///
    /// 待機中に不正なファイルを受け取った場合は `rejection` に記録する
    Processing {
        token: RequestToken,
        rejection: Option<String>,
    },
    /// 生成結果を受け取った状態
    ///
    /// 待機中に記録した不正ファイルのエラーは成功後も表示し続ける
    Succeeded {
        rejection: Option<String>,
    },
    Failed {
        message: String,
    },
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Processing { .. } => "processing",
            Phase::Succeeded { .. } => "succeeded",
            Phase::Failed { .. } => "failed",
        }
    }
}

/// コンポーネント1個分の画面状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    input: Option<UploadedImage>,
    output: Option<GenerationResult>,
    phase: Phase,
    issued: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_preview(&self) -> Option<&UploadedImage> {
        self.input.as_ref()
    }

    /// 保持している生成結果
    ///
    /// 新しいリクエストが成功するかリセットされるまで前回の結果を保持する
    pub fn generation_result(&self) -> Option<&GenerationResult> {
        self.output.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message.as_str()),
            Phase::Processing { rejection, .. } | Phase::Succeeded { rejection } => {
                rejection.as_deref()
            }
            Phase::Idle => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing { .. })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// 送信前に弾いたファイルのエラーを記録
    ///
    /// 応答待ちの場合は処理中フラグを落とさない
    pub fn reject(&mut self, error: &Error) {
        let message = error.to_string();
        log::debug!("upload rejected in {} phase: {}", self.phase.as_str(), message);

        match &mut self.phase {
            Phase::Processing { rejection, .. } => *rejection = Some(message),
            _ => self.phase = Phase::Failed { message },
        }
    }

    /// 受け付けた画像でリクエストを開始
    ///
    /// # Returns
    /// * 今回のリクエストのトークン
    /// * 差し替えられた以前の入力画像（解放用）
    pub fn begin(&mut self, image: UploadedImage) -> (RequestToken, Option<UploadedImage>) {
        self.issued += 1;
        let token = RequestToken(self.issued);

        log::debug!("request {} started for {}", self.issued, image.file_name);

        let replaced = self.input.replace(image);
        self.phase = Phase::Processing {
            token,
            rejection: None,
        };

        (token, replaced)
    }

    /// リクエスト結果を反映
    ///
    /// トークンが現在の待機中リクエストと一致しない応答は捨てる
    /// （後続のアップロードやリセットで置き換えられたもの）
    ///
    /// # Returns
    /// 反映した場合 `true`
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<GenerationResult, Error>,
    ) -> bool {
        let rejection = match &mut self.phase {
            Phase::Processing {
                token: pending,
                rejection,
            } if *pending == token => rejection.take(),
            _ => {
                log::warn!(
                    "discarding stale response for request {} ({} phase)",
                    token.0,
                    self.phase.as_str()
                );
                return false;
            }
        };

        match outcome {
            Ok(result) => {
                log::debug!("request {} succeeded: {}", token.0, result.image_url);
                self.output = Some(result);
                self.phase = Phase::Succeeded { rejection };
            }
            Err(error) => {
                let message = error.to_string();
                log::debug!("request {} failed: {}", token.0, message);
                self.phase = Phase::Failed { message };
            }
        }

        true
    }

    /// 全項目を初期値に戻す
    ///
    /// # Returns
    /// 保持していた入力画像（解放用）
    pub fn reset(&mut self) -> Option<UploadedImage> {
        log::debug!("reset from {} phase", self.phase.as_str());
        self.output = None;
        self.phase = Phase::Idle;
        self.input.take()
    }
}
