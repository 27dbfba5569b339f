//! 以宿主绑定层的视角走一遍命令接口契约：两种命令变体作为
//! `Arc<dyn Command>` 并排使用，查询可执行性、订阅状态通知、触发执行。

use asyncmd::{
    AsyncCommand, BoxError, Command, CommandError, ErrorHandler, ObservableCommand, Parameter,
    UnitCommand,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn wait_for(probe: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if probe() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition was not reached in time");
}

#[tokio::test(flavor = "multi_thread")]
async fn a_binding_layer_can_drive_both_variants_through_the_trait() {
    let typed_hits = Arc::new(AtomicUsize::new(0));
    let unit_hits = Arc::new(AtomicUsize::new(0));

    let typed: Arc<dyn Command> = {
        let typed_hits = typed_hits.clone();
        Arc::new(
            AsyncCommand::builder()
                .operation(move |n: u32| {
                    let typed_hits = typed_hits.clone();
                    async move {
                        typed_hits.fetch_add(n as usize, Ordering::SeqCst);
                        Ok(())
                    }
                })
                .can_execute(Arc::new(|p: Option<&Parameter>| p.is_some()))
                .build(),
        )
    };
    let unit: Arc<dyn Command> = {
        let unit_hits = unit_hits.clone();
        Arc::new(
            UnitCommand::builder()
                .operation(move || {
                    let unit_hits = unit_hits.clone();
                    async move {
                        unit_hits.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                })
                .build(),
        )
    };

    let palette: Vec<Arc<dyn Command>> = vec![typed.clone(), unit.clone()];

    // 绑定层按谓词决定是否触发
    assert!(!typed.can_execute(None));
    assert!(typed.can_execute(Some(&Parameter::new(3_u32))));
    assert!(unit.can_execute(None));

    for command in &palette {
        if command.can_execute(Some(&Parameter::new(3_u32))) {
            command
                .execute(Some(Parameter::new(3_u32)))
                .expect("dispatch succeeds");
        }
    }

    wait_for(|| typed_hits.load(Ordering::SeqCst) == 3).await;
    wait_for(|| unit_hits.load(Ordering::SeqCst) == 1).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatches_surface_synchronously_through_the_trait() {
    let handler_calls = Arc::new(Mutex::new(Vec::new()));
    let handler: ErrorHandler = {
        let handler_calls = handler_calls.clone();
        Arc::new(move |err: BoxError| handler_calls.lock().unwrap().push(err.to_string()))
    };

    let command: Arc<dyn Command> = Arc::new(
        AsyncCommand::builder()
            .operation(|_n: u32| async { Ok(()) })
            .on_error(handler)
            .build(),
    );

    let err = command
        .execute(Some(Parameter::new("not a number")))
        .expect_err("string against u32 must fail at the call site");
    assert!(matches!(err, CommandError::ParameterTypeMismatch { .. }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(handler_calls.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn state_change_notifications_reach_trait_level_subscribers() {
    let command: Arc<AsyncCommand<i64>> = Arc::new(AsyncCommand::builder().build());
    let as_trait: Arc<dyn Command> = command.clone();

    let notified = Arc::new(AtomicUsize::new(0));
    let id = {
        let notified = notified.clone();
        as_trait.subscribe_state_changed(Box::new(move || {
            notified.fetch_add(1, Ordering::SeqCst);
        }))
    };

    command.raise_state_changed();
    command.raise_state_changed();
    assert_eq!(notified.load(Ordering::SeqCst), 2);

    assert!(as_trait.unsubscribe_state_changed(id));
    command.raise_state_changed();
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn observable_and_fire_and_forget_paths_stay_independent() {
    let handler_calls = Arc::new(Mutex::new(Vec::new()));
    let command = {
        let handler_calls = handler_calls.clone();
        AsyncCommand::builder()
            .operation(|n: i32| async move {
                if n < 0 {
                    return Err(anyhow::anyhow!("negative input {n}").into());
                }
                Ok(())
            })
            .on_error(Arc::new(move |err: BoxError| {
                handler_calls.lock().unwrap().push(err.to_string())
            }))
            .build()
    };

    // 可观察路径：失败传播给等待者，处理器不被触碰
    let err = command
        .execute_observable(Some(Parameter::new(-1_i32)))
        .await
        .expect_err("failure propagates to the awaiter");
    assert!(matches!(err, CommandError::Operation(_)));
    assert!(handler_calls.lock().unwrap().is_empty());

    // 即发即忘路径：同一个失败只到达处理器
    command
        .execute(Some(Parameter::new(-2_i32)))
        .expect("dispatch succeeds");
    wait_for(|| handler_calls.lock().unwrap().len() == 1).await;
    assert_eq!(
        *handler_calls.lock().unwrap(),
        vec!["negative input -2".to_string()]
    );
}

// 并发触发互不影响：两次即发即忘调用独立启动、独立完成
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_invocations_are_independent() {
    let hits = Arc::new(AtomicUsize::new(0));
    let command = {
        let hits = hits.clone();
        UnitCommand::builder()
            .operation(move || {
                let hits = hits.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .build()
    };

    command.execute(None).expect("first launch");
    command.execute(None).expect("second launch");

    wait_for(|| hits.load(Ordering::SeqCst) == 2).await;
}
