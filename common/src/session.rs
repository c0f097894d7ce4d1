//! 送信セッションの状態機械
//!
//! 画像・動画の各セッションは独立したレコードで、相互依存を持たない。
//! 遷移は Idle → Selected → Submitting → Settled。SelectedとSettledは
//! 新しい選択で常にSelectedへ戻れる（セッション自体に終端はない）。
//!
//! 選択のたびに世代が進み、送信開始時のチケットと確定時の世代を照合する。
//! 選択が入れ替わった後に届いた古い送信の結果は描画せず破棄する。

/// 送信開始時に採番されるトークン。確定時の世代照合に使う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// 1つのメディア枠（画像または動画）の送信セッション
#[derive(Debug, Clone)]
pub struct DetectionSession<O> {
    generation: u64,
    is_submitting: bool,
    outcome: Option<O>,
}

/// 画像セッション
pub type ImageSession = DetectionSession<crate::types::DetectionOutcome>;

/// 動画セッション
pub type VideoSession = DetectionSession<crate::types::PlateListOutcome>;

impl<O> Default for DetectionSession<O> {
    fn default() -> Self {
        Self {
            generation: 0,
            is_submitting: false,
            outcome: None,
        }
    }
}

impl<O> DetectionSession<O> {
    /// 新しいメディア選択
    ///
    /// 前回の結果を消し、送信中であればその送信を放棄する（結果は
    /// 世代不一致により`settle`で破棄される）。
    pub fn select(&mut self) {
        self.generation += 1;
        self.is_submitting = false;
        self.outcome = None;
    }

    /// 送信開始。すでに同じ枠で送信中なら`None`（再入ガード）
    pub fn begin_submit(&mut self) -> Option<SubmissionTicket> {
        if self.is_submitting {
            return None;
        }
        self.is_submitting = true;
        Some(SubmissionTicket {
            generation: self.generation,
        })
    }

    /// 送信の確定
    ///
    /// チケットの世代が現在の選択と一致する場合のみ結果を反映する。
    /// 選択が入れ替わっていた場合は破棄して`false`を返す。
    pub fn settle(&mut self, ticket: SubmissionTicket, outcome: O) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.is_submitting = false;
        self.outcome = Some(outcome);
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn outcome(&self) -> Option<&O> {
        self.outcome.as_ref()
    }
}
