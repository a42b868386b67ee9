// ==========================================
// 后厨计时系统 - 演示入口
// ==========================================
// 用法: kitchen-timer [队列信封 JSON 文件 | http(s)://服务地址] [运行秒数]
// 未指定数据源时使用内置演示订单; HTTP 令牌读取 KITCHEN_API_TOKEN
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use kitchen_timer::app::{get_default_db_path, AppState};
use kitchen_timer::domain::{CookingOrder, OrderItem, Station};
use kitchen_timer::remote::{
    HttpQueueSource, JsonFileQueueSource, KitchenQueueSource, StaticQueueSource,
};
use kitchen_timer::{logging, CookingStage, StationType};
use tokio::sync::broadcast::error::RecvError;

/// 默认运行时长 (秒)
const DEFAULT_RUN_SECS: u64 = 10;

fn demo_order(id: &str, dish: &str, station_type: StationType, priority: u8, estimated_time: u64) -> CookingOrder {
    CookingOrder {
        id: id.to_string(),
        order_number: format!("D-{}", id),
        table_number: None,
        items: vec![OrderItem {
            id: format!("{}-1", id),
            name: dish.to_string(),
            quantity: 1,
            notes: None,
            station_type: Some(station_type),
        }],
        priority,
        estimated_time,
        wait_time: 0,
        stage: CookingStage::Prep,
        assigned_station: None,
        assigned_staff: None,
        created_at: Utc::now(),
    }
}

fn demo_source() -> StaticQueueSource {
    StaticQueueSource::new(
        vec![
            demo_order("1001", "黑椒牛排", StationType::Grill, 4, 8),
            demo_order("1002", "炸薯条", StationType::Fryer, 2, 5),
            demo_order("1003", "提拉米苏", StationType::Dessert, 3, 20),
        ],
        vec![
            Station::new("grill-1", "烤炉", StationType::Grill),
            Station::new("fryer-1", "油炸", StationType::Fryer),
            Station::new("dessert-1", "甜品", StationType::Dessert),
        ],
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 演示模式", kitchen_timer::APP_NAME);
    tracing::info!("系统版本: {}", kitchen_timer::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let source: Arc<dyn KitchenQueueSource> = match args.next() {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            tracing::info!("使用队列服务: {}", url);
            let mut http = HttpQueueSource::new(&url)?;
            if let Ok(token) = std::env::var("KITCHEN_API_TOKEN") {
                http = http.with_token(token);
            }
            Arc::new(http)
        }
        Some(path) => {
            tracing::info!("使用队列文件: {}", path);
            Arc::new(JsonFileQueueSource::new(path))
        }
        None => Arc::new(demo_source()),
    };
    let run_secs = args
        .next()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RUN_SECS);

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let state = AppState::new(db_path, source).map_err(anyhow::Error::msg)?;
    let api = state.kitchen_api.clone();

    // 事件打印
    let mut events = state.events.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => tracing::info!(target: "kitchen_event", "{}", json),
                    Err(e) => tracing::warn!("事件序列化失败: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "事件消费过慢, 已丢弃部分事件");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    if let Err(e) = api.refresh_stations().await {
        tracing::warn!("工位拉取失败: {}", e);
    }
    if let Err(e) = api.refresh_queue().await {
        tracing::warn!("队列拉取失败: {}", e);
    }

    for order in api.queue()? {
        if let Err(e) = api.start_timer(&order.id, order.estimated_time, order.priority) {
            tracing::warn!(order_id = %order.id, "无法开始计时: {}", e);
        }
    }

    tokio::time::sleep(Duration::from_secs(run_secs)).await;

    let stats = api.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    api.shutdown();
    printer.abort();
    Ok(())
}
