/// 日付範囲のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeError {
    /// 返却日が引き取り日より前
    ReturnBeforePickup,
}

impl std::fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRangeError::ReturnBeforePickup => {
                write!(f, "Return date must not be before pickup date")
            }
        }
    }
}
