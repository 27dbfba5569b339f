//! 命令契约
//!
//! [`Command`] 是宿主绑定层期望的非泛型形状：查询可执行性、订阅状态通知、
//! 以同步调用触发异步工作（即发即忘）。[`ObservableCommand`] 在其上补充
//! 可观察执行入口，供需要自行等待结果的调用方使用。
//!
use crate::error::{BoxError, CommandError};
use crate::parameter::Parameter;
use crate::state_changed::SubscriptionId;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// 被包装操作产生的可等待结果
pub type CommandFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// 执行谓词：任意（可能缺失的）参数 → 是否允许执行
pub type CanExecuteFn = Arc<dyn Fn(Option<&Parameter>) -> bool + Send + Sync>;

/// 状态通知回调（trait 对象边界上的传参形式）
pub type StateListener = Box<dyn Fn() + Send + Sync>;

pub(crate) fn always_permit() -> CanExecuteFn {
    Arc::new(|_parameter: Option<&Parameter>| true)
}

/// 命令接口契约（两种命令变体共同满足）
pub trait Command: Send + Sync {
    /// 调用执行谓词；构造期已归一化，谓词总是可调用的
    fn can_execute(&self, parameter: Option<&Parameter>) -> bool;

    /// 即发即忘执行：分发后把可等待任务连同续延策略与错误处理器交给运行器。
    ///
    /// 操作自身的失败只会到达 `on_error`；分发阶段的参数类型失配是调用点
    /// 编程错误，同步返回 `Err`，不进入处理器。
    fn execute(&self, parameter: Option<Parameter>) -> Result<(), CommandError>;

    fn subscribe_state_changed(&self, listener: StateListener) -> SubscriptionId;

    fn unsubscribe_state_changed(&self, id: SubscriptionId) -> bool;
}

/// 可观察执行入口：与 `execute` 独立的另一条路径，失败按常规方式传播给
/// 等待者，不触碰 `on_error`。
#[async_trait]
pub trait ObservableCommand: Command {
    async fn execute_observable(&self, parameter: Option<Parameter>) -> Result<(), CommandError>;
}
