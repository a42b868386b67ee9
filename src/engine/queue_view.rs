// ==========================================
// 后厨计时系统 - 队列视图 (过滤 + 排序)
// ==========================================
// 只生成视图, 不改变队列本身的人工顺序
// ==========================================

use crate::domain::order::CookingOrder;
use crate::domain::preferences::{QueueFilter, QueueSort, QueueSortField, SortDirection};
use crate::domain::station::Station;
use std::cmp::Ordering;

pub fn matches(order: &CookingOrder, filter: &QueueFilter, stations: &[Station]) -> bool {
    if let Some(stage) = filter.stage {
        if order.stage != stage {
            return false;
        }
    }

    if let Some(station_id) = &filter.station_id {
        if order.assigned_station.as_deref() != Some(station_id.as_str()) {
            return false;
        }
    }

    if let Some(kind) = filter.station_type {
        let station_kind = order
            .assigned_station
            .as_deref()
            .and_then(|id| stations.iter().find(|s| s.id == id))
            .map(|s| s.station_type);
        if station_kind != Some(kind) && order.preferred_station_type() != Some(kind) {
            return false;
        }
    }

    if let Some(min) = filter.min_priority {
        if order.priority < min {
            return false;
        }
    }

    true
}

/// 生成过滤排序后的视图; Manual 排序保留原顺序
pub fn build_view<'a>(
    queue: &'a [CookingOrder],
    filter: &QueueFilter,
    sort: &QueueSort,
    stations: &[Station],
) -> Vec<&'a CookingOrder> {
    let mut view: Vec<&CookingOrder> = queue
        .iter()
        .filter(|o| matches(o, filter, stations))
        .collect();

    let key = |a: &CookingOrder, b: &CookingOrder| -> Ordering {
        match sort.field {
            QueueSortField::Manual => Ordering::Equal,
            QueueSortField::Priority => a.priority.cmp(&b.priority),
            QueueSortField::WaitTime => a.wait_time.cmp(&b.wait_time),
            QueueSortField::EstimatedTime => a.estimated_time.cmp(&b.estimated_time),
        }
    };

    if sort.field != QueueSortField::Manual {
        // sort_by 为稳定排序, 相等元素保留人工顺序
        view.sort_by(|a, b| match sort.direction {
            SortDirection::Asc => key(a, b),
            SortDirection::Desc => key(b, a),
        });
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CookingStage;
    use chrono::Utc;

    fn order(id: &str, priority: u8, wait: u64, stage: CookingStage) -> CookingOrder {
        CookingOrder {
            id: id.to_string(),
            order_number: id.to_uppercase(),
            table_number: None,
            items: Vec::new(),
            priority,
            estimated_time: 300,
            wait_time: wait,
            stage,
            assigned_station: None,
            assigned_staff: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_priority_desc_is_stable() {
        let queue = vec![
            order("a", 2, 10, CookingStage::Prep),
            order("b", 5, 5, CookingStage::Prep),
            order("c", 2, 1, CookingStage::Cooking),
        ];
        let sort = QueueSort {
            field: QueueSortField::Priority,
            direction: SortDirection::Desc,
        };
        let ids: Vec<&str> = build_view(&queue, &QueueFilter::default(), &sort, &[])
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_filter_by_stage_and_priority() {
        let queue = vec![
            order("a", 2, 10, CookingStage::Prep),
            order("b", 5, 5, CookingStage::Prep),
            order("c", 4, 1, CookingStage::Cooking),
        ];
        let filter = QueueFilter {
            stage: Some(CookingStage::Prep),
            min_priority: Some(3),
            ..Default::default()
        };
        let view = build_view(&queue, &filter, &QueueSort::default(), &[]);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "b");
    }

    #[test]
    fn test_manual_sort_keeps_order() {
        let queue = vec![
            order("x", 1, 99, CookingStage::Prep),
            order("y", 5, 0, CookingStage::Prep),
        ];
        let view = build_view(&queue, &QueueFilter::default(), &QueueSort::default(), &[]);
        assert_eq!(view[0].id, "x");
        assert_eq!(view[1].id, "y");
    }
}
