//! 訂單簿預測與批次優化示例

use chrono::{Duration, NaiveDate};
use planner::{
    logging, plan_concurrently, Analysis, BatchConfig, OrderFilter, OrderRecord, OrderStatus,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 訂單簿預測與批次優化示例 ===\n");

    let today = NaiveDate::from_ymd_opt(2025, 1, 6).ok_or_else(|| anyhow::anyhow!("無效的日期"))?;

    // 兩年歷史：夏季旺季、逐年成長
    let mut orders = Vec::new();
    for month_offset in 0..24u32 {
        let year = 2023 + (month_offset / 12) as i32;
        let month = month_offset % 12 + 1;
        let seasonal = [0.8, 0.7, 0.9, 1.0, 1.2, 1.4, 1.5, 1.3, 1.1, 1.0, 0.9, 0.8][(month - 1) as usize];
        let growth = 1.0 + month_offset as f64 * 0.01;

        for day in [5, 15, 25] {
            let order_date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| anyhow::anyhow!("無效的日期: {}-{}-{}", year, month, day))?;
            orders.push(
                OrderRecord::new("Q235".to_string(), 400.0 * seasonal * growth, order_date)
                    .with_status(OrderStatus::Completed),
            );
        }
    }

    // 待排產訂單
    let pending = [
        ("Q235", 320.0, -2),
        ("Q235", 180.0, 2),
        ("Q235", 450.0, 6),
        ("Q235", 260.0, 20),
        ("SUS304", 120.0, 5),
        ("SUS304", 90.0, 40),
    ];
    for (material, weight, due_in) in pending {
        orders.push(
            OrderRecord::new(material.to_string(), weight, today)
                .with_delivery_date(today + Duration::days(due_in)),
        );
    }

    let config = BatchConfig::new(Decimal::from(600), Decimal::new(15, 2), today);
    let filter = OrderFilter::none().with_material("Q235".to_string());
    let outcome = plan_concurrently(&orders, 6, &filter, &config);

    let forecast = outcome.forecast?;
    println!("預測（Q235）:");
    for point in &forecast.points {
        println!(
            "  - {}: {:.1} kg（{:.1} ~ {:.1}，季節 {:.2}）",
            point.period, point.forecast_value, point.lower_bound, point.upper_bound, point.seasonal_component
        );
    }
    match &forecast.accuracy {
        Analysis::Available(report) => println!("回測 MAPE: {:.1}% ({:?})", report.mape, report.accuracy),
        Analysis::InsufficientData { required, actual } => {
            println!("回測資料不足: 需要 {} 期，實際 {} 期", required, actual)
        }
    }

    let plan = outcome.batches?;
    println!("\n批次計劃:");
    for batch in &plan.batches {
        println!(
            "  - {}: {} 筆, {} kg, 效率 {}%, 緊急度 {}",
            batch.id,
            batch.order_count(),
            batch.total_weight,
            batch.efficiency.round_dp(1),
            batch.urgency
        );
    }
    for recommendation in &plan.recommendations {
        println!("  ! {}", recommendation.message);
    }

    println!("\n{}", serde_json::to_string_pretty(&plan.statistics)?);

    Ok(())
}
