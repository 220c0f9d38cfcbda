//! 统一错误处理 - 边界输入校验与配置错误
//!
//! 索引核心操作（插入、删除、查询）对合法输入是全函数，不返回错误；
//! 这里的错误只出现在把原始文本转换成值的边界层以及配置校验中。

/// 可扩展哈希索引可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("无效输入，不是整数: {input:?}")]
    InvalidInput {
        input: String,
    },

    #[error("值不能为负数: {input}")]
    NegativeValue {
        input: String,
    },

    #[error("值超出范围 (最大 {max}): {input}")]
    ValueOutOfRange {
        input: String,
        max: u32,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

impl HashError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { .. } => Some("请输入一个有效的整数"),
            Self::NegativeValue { .. } => Some("只支持非负整数"),
            Self::ValueOutOfRange { .. } => Some("请输入不超过u32::MAX的整数"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 输入校验失败只需要提示用户重新输入
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    /// 是否为输入校验错误
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::NegativeValue { .. } | Self::ValueOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_recoverable() {
        let err = HashError::InvalidInput { input: "abc".into() };
        assert!(err.is_recoverable());
        assert!(err.is_validation_error());
        assert!(err.recovery_suggestion().is_some());

        let err = HashError::InvalidConfig { reason: "bucket_capacity为0".into() };
        assert!(!err.is_recoverable());
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_error_message() {
        let err = HashError::NegativeValue { input: "-3".into() };
        assert_eq!(err.to_string(), "值不能为负数: -3");
    }
}
