//! 错误展示策略
//!
//! 只决定是否把已有的失败码展示给用户，不重新执行校验链。

use crate::control::FieldState;
use crate::value::FailureSet;

/// 字段既无效、又被用户触碰并修改过时，才返回失败码
pub fn surface<S: FieldState + ?Sized>(state: &S) -> Option<&FailureSet> {
    if state.invalid() && state.touched() && state.dirty() {
        Some(state.failures())
    } else {
        None
    }
}
