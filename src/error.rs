use std::sync::Arc;
use thiserror::Error;

/// 被包装操作的失败类型：任意可跨线程传递的错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 即发即忘路径上的错误处理器
pub type ErrorHandler = Arc<dyn Fn(BoxError) + Send + Sync>;

/// 命令层错误
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandError {
    /// 调用方提供的参数无法与命令声明的输入类型调和（调用点编程错误，
    /// 在分发阶段同步暴露，不进入错误处理器）
    #[error("parameter type mismatch: expected={expected}, found={found}")]
    ParameterTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// 被包装操作启动后产生的失败（仅出现在可观察执行路径的返回值上）
    #[error("command operation failed: {0}")]
    Operation(#[source] BoxError),
}

/// 未提供 `on_error` 时的归一化缺省处理器：记录后在任务内重新抛出。
///
/// panic 发生在运行器派生的任务内部，由 tokio 限制在该任务中并经进程
/// panic 钩子暴露，宿主线程不会因此终止，失败也不会无声消失。
pub fn rethrow_handler() -> ErrorHandler {
    Arc::new(|err: BoxError| {
        tracing::error!(error = %err, "command operation failed and no error handler is installed");
        panic!("unhandled command operation failure: {err}");
    })
}
