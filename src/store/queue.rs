// ==========================================
// 后厨计时系统 - 出餐队列操作
// ==========================================
// 队列顺序即人工顺序; 重排通过移除 + 插入完成
// 队列长度变化后重新判定高峰模式
// ==========================================

use super::core::KitchenStore;
use super::error::{validate_priority, KitchenError, KitchenResult};
use crate::domain::order::CookingOrder;
use crate::domain::types::TimerStatus;
use crate::engine::assignment;
use crate::engine::events::KitchenEvent;
use crate::engine::queue_view;

impl KitchenStore {
    // ==========================================
    // 查询
    // ==========================================

    pub fn queue(&self) -> &[CookingOrder] {
        &self.queue
    }

    pub fn order(&self, order_id: &str) -> Option<&CookingOrder> {
        self.queue.iter().find(|o| o.id == order_id)
    }

    /// 按持久化的过滤/排序偏好生成视图
    pub fn queue_view(&self) -> Vec<&CookingOrder> {
        queue_view::build_view(
            &self.queue,
            &self.preferences.queue_filter,
            &self.preferences.queue_sort,
            &self.stations,
        )
    }

    fn order_position(&self, order_id: &str) -> KitchenResult<usize> {
        self.queue
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| KitchenError::OrderNotFound(order_id.to_string()))
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 整体替换队列 (远端拉取成功后)
    pub fn set_queue(&mut self, orders: Vec<CookingOrder>) {
        self.queue = orders;
        self.rebuild_station_orders();
        self.refresh_rush_mode();
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// 新订单入队; 开启自动分配时为未指定工位的订单分配工位
    pub fn on_new_order(&mut self, mut order: CookingOrder) -> KitchenResult<()> {
        validate_priority(order.priority)?;
        if self.queue.iter().any(|o| o.id == order.id) {
            return Err(KitchenError::InvalidInput(format!(
                "订单已在队列中: order_id={}",
                order.id
            )));
        }

        let auto_station = if self.preferences.auto_assign && order.assigned_station.is_none() {
            assignment::pick_station(&order, &self.stations).map(|s| s.id.clone())
        } else {
            None
        };

        if let Some(station_id) = auto_station {
            tracing::info!(order_id = %order.id, station_id = %station_id, "自动分配工位");
            order.assigned_station = Some(station_id);
        }

        if let Some(station_id) = order.assigned_station.clone() {
            if let Some(station) = self.stations.iter_mut().find(|s| s.id == station_id) {
                if !station.active_orders.contains(&order.id) {
                    station.active_orders.push(order.id.clone());
                }
            }
        }

        tracing::info!(order_id = %order.id, priority = order.priority, "新订单入队");
        self.queue.push(order);
        self.refresh_rush_mode();
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(())
    }

    /// 订单出餐完成: 出队, 从工位摘除, 未完成的计时器一并完成
    pub fn on_order_complete(&mut self, order_id: &str) -> KitchenResult<CookingOrder> {
        let idx = self.order_position(order_id)?;
        let order = self.queue.remove(idx);

        for station in self.stations.iter_mut() {
            station.detach_order(order_id);
        }

        let pending_timer = self
            .timer_for_order(order_id)
            .filter(|t| {
                matches!(
                    t.status,
                    TimerStatus::Running | TimerStatus::Overdue | TimerStatus::Paused
                )
            })
            .map(|t| t.id.clone());
        if let Some(timer_id) = pending_timer {
            self.complete_timer(&timer_id)?;
        }

        tracing::info!(order_id, "订单出餐完成");
        self.refresh_rush_mode();
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(order)
    }

    /// 将订单移动到 new_index (超出末尾时放到末尾), 其余元素相对顺序不变
    pub fn reorder_queue(&mut self, order_id: &str, new_index: usize) -> KitchenResult<()> {
        let idx = self.order_position(order_id)?;
        let order = self.queue.remove(idx);
        let target = new_index.min(self.queue.len());
        self.queue.insert(target, order);

        tracing::debug!(order_id, from = idx, to = target, "队列重排");
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(())
    }

    /// 修改订单优先级 (同步到计时器)
    pub fn update_order_priority(&mut self, order_id: &str, priority: u8) -> KitchenResult<()> {
        validate_priority(priority)?;
        let idx = self.order_position(order_id)?;
        self.queue[idx].priority = priority;

        if let Some(timer_id) = self.order_index.get(order_id).cloned() {
            if let Some(timer) = self.timers.get_mut(&timer_id) {
                timer.priority = priority;
            }
        }

        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(())
    }

    /// 指派工位: 从原工位摘除, 挂到新工位
    pub fn assign_order_to_station(&mut self, order_id: &str, station_id: &str) -> KitchenResult<()> {
        let idx = self.order_position(order_id)?;
        if !self.stations.iter().any(|s| s.id == station_id) {
            return Err(KitchenError::StationNotFound(station_id.to_string()));
        }

        for station in self.stations.iter_mut() {
            if station.id == station_id {
                if !station.active_orders.iter().any(|id| id == order_id) {
                    station.active_orders.push(order_id.to_string());
                }
            } else {
                station.detach_order(order_id);
            }
        }
        self.queue[idx].assigned_station = Some(station_id.to_string());

        tracing::info!(order_id, station_id, "订单指派工位");
        self.emit(KitchenEvent::StationChanged {
            station_id: station_id.to_string(),
        });
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(())
    }

    pub fn assign_order_to_staff(&mut self, order_id: &str, staff_id: &str) -> KitchenResult<()> {
        if staff_id.trim().is_empty() {
            return Err(KitchenError::InvalidInput("staff_id 不能为空".to_string()));
        }
        let idx = self.order_position(order_id)?;
        self.queue[idx].assigned_staff = Some(staff_id.to_string());

        tracing::info!(order_id, staff_id, "订单指派员工");
        self.emit(KitchenEvent::QueueChanged {
            length: self.queue.len(),
        });
        Ok(())
    }

    // ==========================================
    // 内部
    // ==========================================

    /// 按队列中的 assigned_station 重建工位在手订单
    pub(super) fn rebuild_station_orders(&mut self) {
        for station in self.stations.iter_mut() {
            station.active_orders = self
                .queue
                .iter()
                .filter(|o| o.assigned_station.as_deref() == Some(station.id.as_str()))
                .map(|o| o.id.clone())
                .collect();
        }
    }

    pub(super) fn refresh_rush_mode(&mut self) {
        let rush = self.policy.is_rush(self.queue.len());
        if rush == self.rush_mode {
            return;
        }

        self.rush_mode = rush;
        tracing::info!(rush, queue_length = self.queue.len(), "高峰模式切换");
        self.emit(KitchenEvent::RushModeChanged { active: rush });

        if rush {
            let alert = self.policy.rush_alert(self.queue.len(), self.now());
            self.push_alert(alert);
        }
    }
}
