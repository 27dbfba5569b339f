//! 异步命令抽象库（asyncmd）
//!
//! 让调用方通过同步的、事件驱动的命令接口触发异步工作，并保证异步工作中
//! 产生的错误既不会被悄悄丢弃，也不会经由"未被观察的失败"通道拖垮宿主进程：
//! - 命令实现（`async_command` / `unit_command`）：带输入参数与无参两种变体，
//!   同时暴露"可观察执行"（返回可等待结果）与"即发即忘执行"（错误转交处理器）
//!   两个入口；
//! - 参数分发（`parameter`）：以类型擦除（Any）方式让非泛型调用点安全到达
//!   泛型化的操作，失配时产生结构化的类型错误；
//! - 即发即忘运行器（`fire_forget`）：启动的可等待任务永远与一个显式的失败
//!   续延成对出现，库内不存在"启动后丢弃"的裸调用；
//! - 状态通知（`state_changed`）：`CanExecute` 可能变化时的多播订阅点。
//!
//! 典型用法：
//! 1. 用 builder 构造命令，提供异步操作与（可选的）错误处理器、执行谓词；
//! 2. 宿主绑定层通过 [`Command`] 契约查询 `can_execute` 并触发 `execute`；
//! 3. 需要自行观察结果的调用方改走 [`ObservableCommand::execute_observable`]
//!    或具体类型上的 `run`。
//!
pub mod async_command;
pub mod command;
pub mod error;
pub mod fire_forget;
pub mod parameter;
pub mod state_changed;
pub mod unit_command;

pub use async_command::AsyncCommand;
pub use command::{CanExecuteFn, Command, CommandFuture, ObservableCommand, StateListener};
pub use error::{BoxError, CommandError, ErrorHandler};
pub use fire_forget::fire_and_forget;
pub use parameter::{CommandInput, Parameter};
pub use state_changed::{StateChangedEvent, SubscriptionId};
pub use unit_command::UnitCommand;
