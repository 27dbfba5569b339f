//! 带输入参数的异步命令
//!
//! 把一个一元异步操作适配成双入口的命令契约，并在类型擦除边界上完成
//! 三路分发：参数可转为 `T` / 缺参且 `T` 接受缺省 / 类型失配。
//!
use crate::command::{
    CanExecuteFn, Command, CommandFuture, ObservableCommand, StateListener, always_permit,
};
use crate::error::{BoxError, CommandError, ErrorHandler, rethrow_handler};
use crate::fire_forget::fire_and_forget;
use crate::parameter::{ABSENT_TYPE_NAME, CommandInput, Parameter};
use crate::state_changed::{StateChangedEvent, SubscriptionId};
use async_trait::async_trait;
use bon::Builder;
use futures_util::future;
use std::any::type_name;
use std::future::Future;
use std::sync::Arc;

use self::async_command_builder::{IsUnset, SetExecute, State as BuilderState};

type ExecuteFn<T> = Arc<dyn Fn(T) -> CommandFuture + Send + Sync>;

/// 输入类型为 `T` 的异步命令
///
/// 四个字段均在构造期固定：
/// - `execute`：被包装的一元异步操作；未设置时命令是合法的空操作实例；
/// - `continue_on_captured_context`：即发即忘路径的续延上下文策略，缺省 `true`；
/// - `on_error`：即发即忘路径的错误处理器，缺省为"重新抛出"；
/// - `can_execute`：执行谓词，缺省恒为 `true`。
///
/// 每次调用相互独立：不互斥、不排队、不去重。
#[derive(Builder)]
pub struct AsyncCommand<T: CommandInput> {
    execute: Option<ExecuteFn<T>>,
    #[builder(default = true)]
    continue_on_captured_context: bool,
    #[builder(default = rethrow_handler())]
    on_error: ErrorHandler,
    #[builder(default = always_permit())]
    can_execute: CanExecuteFn,
    #[builder(default)]
    state_changed: StateChangedEvent,
}

impl<T: CommandInput, S: BuilderState> AsyncCommandBuilder<T, S> {
    /// 以普通异步闭包设置被包装的操作
    pub fn operation<F, Fut>(self, f: F) -> AsyncCommandBuilder<T, SetExecute<S>>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
        <S as BuilderState>::Execute: IsUnset,
    {
        self.execute(Arc::new(move |input| -> CommandFuture {
            Box::pin(f(input))
        }))
    }
}

impl<T: CommandInput> AsyncCommand<T> {
    /// 可观察执行（强类型入口）：原样返回操作的可等待结果，失败传播给等待者。
    /// 空操作实例直接返回已完成的结果。
    pub fn run(&self, parameter: T) -> CommandFuture {
        match &self.execute {
            Some(op) => (op)(parameter),
            None => Box::pin(future::ready(Ok(()))),
        }
    }

    /// 可观察执行（类型擦除入口）：三路分发。
    ///
    /// 1. 参数可转为 `T` → 转入强类型入口；
    /// 2. 缺参且 `T` 接受缺省取值 → 以缺省值转入；
    /// 3. 其余情况同步返回失配错误。缺参检查先于一切类型名计算，缺参 +
    ///    非空类型确定性地得到 `found = "none"` 的失配错误。
    pub fn dispatch(&self, parameter: Option<Parameter>) -> Result<CommandFuture, CommandError> {
        let Some(parameter) = parameter else {
            return match T::absent() {
                Some(input) => Ok(self.run(input)),
                None => Err(CommandError::ParameterTypeMismatch {
                    expected: type_name::<T>(),
                    found: ABSENT_TYPE_NAME,
                }),
            };
        };

        match parameter.downcast::<T>() {
            Ok(input) => Ok(self.run(input)),
            Err(parameter) => Err(CommandError::ParameterTypeMismatch {
                expected: type_name::<T>(),
                found: parameter.type_name(),
            }),
        }
    }

    /// 同步通知所有订阅者：可执行状态可能已变化
    pub fn raise_state_changed(&self) {
        self.state_changed.raise();
    }

    pub fn state_changed(&self) -> &StateChangedEvent {
        &self.state_changed
    }
}

impl<T: CommandInput> Command for AsyncCommand<T> {
    fn can_execute(&self, parameter: Option<&Parameter>) -> bool {
        (self.can_execute)(parameter)
    }

    fn execute(&self, parameter: Option<Parameter>) -> Result<(), CommandError> {
        let task = self.dispatch(parameter)?;
        fire_and_forget(task, self.continue_on_captured_context, self.on_error.clone());
        Ok(())
    }

    fn subscribe_state_changed(&self, listener: StateListener) -> SubscriptionId {
        self.state_changed.subscribe(listener)
    }

    fn unsubscribe_state_changed(&self, id: SubscriptionId) -> bool {
        self.state_changed.unsubscribe(id)
    }
}

#[async_trait]
impl<T: CommandInput> ObservableCommand for AsyncCommand<T> {
    async fn execute_observable(&self, parameter: Option<Parameter>) -> Result<(), CommandError> {
        self.dispatch(parameter)?
            .await
            .map_err(CommandError::Operation)
    }
}
