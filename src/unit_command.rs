//! 无参异步命令
//!
//! 与 [`AsyncCommand`](crate::AsyncCommand) 同构的双入口契约，包装零元
//! 操作；没有输入类型，因此没有分发逻辑，即发即忘入口忽略接口契约递来的
//! 任何参数值。
//!
use crate::command::{
    CanExecuteFn, Command, CommandFuture, ObservableCommand, StateListener, always_permit,
};
use crate::error::{BoxError, CommandError, ErrorHandler, rethrow_handler};
use crate::fire_forget::fire_and_forget;
use crate::parameter::Parameter;
use crate::state_changed::{StateChangedEvent, SubscriptionId};
use async_trait::async_trait;
use bon::Builder;
use futures_util::future;
use std::future::Future;
use std::sync::Arc;

use self::unit_command_builder::{IsUnset, SetExecute, State as BuilderState};

type ExecuteFn = Arc<dyn Fn() -> CommandFuture + Send + Sync>;

/// 无输入参数的异步命令
#[derive(Builder)]
pub struct UnitCommand {
    execute: Option<ExecuteFn>,
    #[builder(default = true)]
    continue_on_captured_context: bool,
    #[builder(default = rethrow_handler())]
    on_error: ErrorHandler,
    #[builder(default = always_permit())]
    can_execute: CanExecuteFn,
    #[builder(default)]
    state_changed: StateChangedEvent,
}

impl<S: BuilderState> UnitCommandBuilder<S> {
    /// 以普通异步闭包设置被包装的操作
    pub fn operation<F, Fut>(self, f: F) -> UnitCommandBuilder<SetExecute<S>>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
        <S as BuilderState>::Execute: IsUnset,
    {
        self.execute(Arc::new(move || -> CommandFuture { Box::pin(f()) }))
    }
}

impl UnitCommand {
    /// 可观察执行：原样返回操作的可等待结果；空操作实例返回已完成的结果
    pub fn run(&self) -> CommandFuture {
        match &self.execute {
            Some(op) => (op)(),
            None => Box::pin(future::ready(Ok(()))),
        }
    }

    pub fn raise_state_changed(&self) {
        self.state_changed.raise();
    }

    pub fn state_changed(&self) -> &StateChangedEvent {
        &self.state_changed
    }
}

impl Command for UnitCommand {
    fn can_execute(&self, parameter: Option<&Parameter>) -> bool {
        (self.can_execute)(parameter)
    }

    fn execute(&self, _parameter: Option<Parameter>) -> Result<(), CommandError> {
        fire_and_forget(
            self.run(),
            self.continue_on_captured_context,
            self.on_error.clone(),
        );
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
impl ObservableCommand for UnitCommand {
    async fn execute_observable(&self, _parameter: Option<Parameter>) -> Result<(), CommandError> {
        self.run().await.map_err(CommandError::Operation)
    }
}
