//! 一个最小的"命令面板"：宿主绑定层把两种命令变体当作 `Arc<dyn Command>`
//! 统一驱动，演示双入口、参数分发失配与状态通知。

use asyncmd::{AsyncCommand, Command, ObservableCommand, Parameter, UnitCommand};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let greet = Arc::new(
        AsyncCommand::builder()
            .operation(|name: String| async move {
                println!("hello, {name}");
                Ok(())
            })
            .can_execute(Arc::new(|p: Option<&Parameter>| p.is_some()))
            .on_error(Arc::new(|err| eprintln!("greet failed: {err}")))
            .build(),
    );

    let refresh = Arc::new(
        UnitCommand::builder()
            .operation(|| async {
                println!("refreshing…");
                Err(anyhow::anyhow!("backend unreachable").into())
            })
            .on_error(Arc::new(|err| eprintln!("refresh failed: {err}")))
            .build(),
    );

    refresh.state_changed().subscribe(|| println!("refresh availability may have changed"));
    refresh.raise_state_changed();

    let palette: Vec<(&str, Arc<dyn Command>)> =
        vec![("greet", greet.clone()), ("refresh", refresh.clone())];

    for (name, command) in &palette {
        let parameter = Parameter::new("world".to_string());
        if command.can_execute(Some(&parameter)) {
            // 即发即忘：错误只会到达 on_error
            if let Err(err) = command.execute(Some(parameter)) {
                eprintln!("{name} rejected the parameter: {err}");
            }
        }
    }

    // 类型失配在分发阶段同步暴露
    if let Err(err) = greet.execute(Some(Parameter::new(42_i32))) {
        eprintln!("expected mismatch: {err}");
    }

    // 可观察路径：调用方自行等待结果
    if let Err(err) = refresh.execute_observable(None).await {
        eprintln!("observed directly: {err}");
    }

    tokio::time::sleep(Duration::from_millis(200)).await;
}
