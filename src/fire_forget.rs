//! 即发即忘运行器
//!
//! 库内所有"启动后不保留句柄"的异步工作都必须经过 [`fire_and_forget`]：
//! 任务与显式的失败续延成对出现，失败要么进入处理器，要么（缺省处理器）
//! 在任务内重新抛出并经 panic 钩子暴露，绝不进入未被观察的失败通道。
//!
use crate::error::{BoxError, ErrorHandler};
use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Handle, Runtime};

/// 独立兜底运行时的工作线程名（也是"任意续延上下文"的落点）
pub const DETACHED_THREAD_NAME: &str = "cmd-detached";

/// 异步执行 `task`，失败时调用 `on_error` 而不是向上传播。
///
/// - `continue_on_captured_context = true`：失败续延在发起调用时的运行时上执行；
/// - `false`：失败续延被转投到独立的兜底运行时（任意上下文）。
///
/// 当前线程没有 tokio 运行时时，整个任务落到兜底运行时上执行，调用本身
/// 依旧是同步且不阻塞的。
pub fn fire_and_forget<F>(task: F, continue_on_captured_context: bool, on_error: ErrorHandler)
where
    F: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    let observed = async move {
        let Err(err) = task.await else { return };

        if continue_on_captured_context {
            (on_error)(err);
        } else {
            detached_runtime().spawn(async move { (on_error)(err) });
        }
    };

    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(observed);
        }
        Err(_) => {
            tracing::debug!("no ambient tokio runtime; running command task on the detached runtime");
            detached_runtime().spawn(observed);
        }
    }
}

fn detached_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();

    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(DETACHED_THREAD_NAME)
            .enable_all()
            .build()
            .expect("failed to build the detached command runtime")
    })
}
