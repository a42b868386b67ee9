// ==========================================
// 后厨计时系统 - 自动分配工位
// ==========================================
// 规则 (顺序执行):
// 1) 只考虑可接单工位 (AVAILABLE / BUSY)
// 2) 订单首个菜品指定了工位类型时, 优先同类型工位
// 3) 同一候选集中选负载最低者, 负载相同取在手订单最少者, 再相同取ID字典序
// ==========================================

use crate::domain::order::CookingOrder;
use crate::domain::station::Station;

pub fn pick_station<'a>(order: &CookingOrder, stations: &'a [Station]) -> Option<&'a Station> {
    let candidates: Vec<&Station> = stations
        .iter()
        .filter(|s| s.status.accepts_orders())
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let preferred: Vec<&Station> = match order.preferred_station_type() {
        Some(kind) => candidates
            .iter()
            .copied()
            .filter(|s| s.station_type == kind)
            .collect(),
        None => Vec::new(),
    };

    let pool = if preferred.is_empty() { candidates } else { preferred };

    pool.into_iter().min_by(|a, b| {
        a.capacity
            .cmp(&b.capacity)
            .then(a.active_orders.len().cmp(&b.active_orders.len()))
            .then(a.id.cmp(&b.id))
    })
}
