// ==========================================
// 后厨计时系统 - 计时器操作
// ==========================================
// 状态流转:
//   start:    (无/IDLE/已完成) → RUNNING
//   pause:    RUNNING | OVERDUE → PAUSED
//   resume:   PAUSED → RUNNING (累计暂停时长)
//   complete: RUNNING | OVERDUE | PAUSED → COMPLETED
//   reset:    任意 → IDLE
// ==========================================

use super::core::KitchenStore;
use super::error::{validate_priority, KitchenError, KitchenResult};
use crate::domain::alert::KitchenAlert;
use crate::domain::timer::CookingTimer;
use crate::domain::types::{CookingStage, DuplicateStartPolicy, TimerStatus};
use crate::engine::events::KitchenEvent;
use crate::engine::progress;

impl KitchenStore {
    // ==========================================
    // 查询
    // ==========================================

    pub fn timer(&self, timer_id: &str) -> Option<&CookingTimer> {
        self.timers.get(timer_id)
    }

    pub fn timer_for_order(&self, order_id: &str) -> Option<&CookingTimer> {
        self.order_index
            .get(order_id)
            .and_then(|timer_id| self.timers.get(timer_id))
    }

    /// 全部计时器: 优先级高在前, 同优先级按开始时间
    pub fn timers(&self) -> Vec<&CookingTimer> {
        let mut list: Vec<&CookingTimer> = self.timers.values().collect();
        list.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.start_time.cmp(&b.start_time))
                .then(a.id.cmp(&b.id))
        });
        list
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.values().filter(|t| t.status.is_active()).count()
    }

    fn timer_mut(&mut self, timer_id: &str) -> KitchenResult<&mut CookingTimer> {
        self.timers
            .get_mut(timer_id)
            .ok_or_else(|| KitchenError::TimerNotFound(timer_id.to_string()))
    }

    fn invalid_transition(from: TimerStatus, to: TimerStatus) -> KitchenError {
        KitchenError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn emit_timer_changed(&self, timer_id: &str) {
        if let Some(timer) = self.timers.get(timer_id) {
            self.emit(KitchenEvent::TimerChanged {
                timer_id: timer.id.clone(),
                order_id: timer.order_id.clone(),
                status: Some(timer.status),
            });
        }
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 开始计时
    ///
    /// 同一订单已有未完成计时器时按 duplicate_start_policy 处理;
    /// 已完成的旧计时器直接被替换
    pub fn start_timer(
        &mut self,
        order_id: &str,
        estimated_duration: u64,
        priority: u8,
    ) -> KitchenResult<CookingTimer> {
        if order_id.trim().is_empty() {
            return Err(KitchenError::InvalidInput("order_id 不能为空".to_string()));
        }
        if estimated_duration == 0 {
            return Err(KitchenError::InvalidInput(
                "estimated_duration 必须大于 0".to_string(),
            ));
        }
        validate_priority(priority)?;

        let now = self.now();

        if let Some(existing_id) = self.order_index.get(order_id).cloned() {
            let existing_status = self.timers.get(&existing_id).map(|t| t.status);
            match existing_status {
                Some(TimerStatus::Completed) | None => {
                    self.drop_timer(&existing_id);
                }
                // 重置后的计时器沿用原 id 重新开始
                Some(TimerStatus::Idle) => {
                    return self.restart_existing(&existing_id, estimated_duration, priority);
                }
                Some(_) => match self.config.duplicate_start_policy {
                    DuplicateStartPolicy::Reject => {
                        tracing::warn!(order_id, timer_id = %existing_id, "重复开始计时被拒绝");
                        return Err(KitchenError::DuplicateTimer {
                            order_id: order_id.to_string(),
                            timer_id: existing_id,
                        });
                    }
                    DuplicateStartPolicy::Restart => {
                        return self.restart_existing(&existing_id, estimated_duration, priority);
                    }
                },
            }
        }

        let timer = CookingTimer::start(order_id, estimated_duration, priority, now);
        self.order_index
            .insert(order_id.to_string(), timer.id.clone());
        self.timers.insert(timer.id.clone(), timer.clone());

        tracing::info!(
            order_id,
            timer_id = %timer.id,
            estimated_duration,
            "开始计时"
        );
        self.emit_timer_changed(&timer.id);
        Ok(timer)
    }

    fn restart_existing(
        &mut self,
        timer_id: &str,
        estimated_duration: u64,
        priority: u8,
    ) -> KitchenResult<CookingTimer> {
        let now = self.now();
        let timer = self.timer_mut(timer_id)?;
        timer.reset();
        timer.estimated_duration = estimated_duration;
        timer.remaining_time = estimated_duration as f64;
        timer.priority = priority;
        timer.status = TimerStatus::Running;
        timer.start_time = Some(now);
        let restarted = timer.clone();

        tracing::info!(order_id = %restarted.order_id, timer_id, "已有计时器重新开始");
        self.emit_timer_changed(timer_id);
        Ok(restarted)
    }

    pub fn pause_timer(&mut self, timer_id: &str) -> KitchenResult<()> {
        let now = self.now();
        let warning_pct = self.policy.warning_pct();
        let critical_pct = self.policy.critical_pct();
        let timer = self.timer_mut(timer_id)?;
        if !timer.status.is_active() {
            return Err(Self::invalid_transition(timer.status, TimerStatus::Paused));
        }

        let snap = progress::snapshot(timer.elapsed_at(now), timer.estimated_duration);
        timer.elapsed = snap.elapsed;
        timer.remaining_time = snap.remaining_time;
        timer.progress = snap.progress;
        timer.overdue_time = snap.overdue_time;
        timer.color_code = progress::color_for(snap.progress, warning_pct, critical_pct);
        timer.status = TimerStatus::Paused;
        timer.paused_time = Some(now);

        tracing::debug!(timer_id, "暂停计时");
        self.emit_timer_changed(timer_id);
        Ok(())
    }

    /// 恢复计时: 本次暂停时长计入 total_paused_ms
    pub fn resume_timer(&mut self, timer_id: &str) -> KitchenResult<()> {
        let now = self.now();
        let timer = self.timer_mut(timer_id)?;
        if timer.status != TimerStatus::Paused {
            return Err(Self::invalid_transition(timer.status, TimerStatus::Running));
        }

        if let Some(paused_at) = timer.paused_time.take() {
            timer.total_paused_ms += (now - paused_at).num_milliseconds().max(0);
        }
        timer.status = if timer.is_overdue {
            TimerStatus::Overdue
        } else {
            TimerStatus::Running
        };

        tracing::debug!(timer_id, total_paused_ms = timer.total_paused_ms, "恢复计时");
        self.emit_timer_changed(timer_id);
        Ok(())
    }

    /// 完成计时
    ///
    /// actual_duration 取 start_time 到当前的墙钟差 (含暂停)
    pub fn complete_timer(&mut self, timer_id: &str) -> KitchenResult<CookingTimer> {
        let now = self.now();
        let timer = self.timer_mut(timer_id)?;
        match timer.status {
            TimerStatus::Running | TimerStatus::Overdue | TimerStatus::Paused => {}
            other => return Err(Self::invalid_transition(other, TimerStatus::Completed)),
        }

        let elapsed = timer.elapsed_at(now);
        if let Some(paused_at) = timer.paused_time.take() {
            timer.total_paused_ms += (now - paused_at).num_milliseconds().max(0);
        }

        let snap = progress::snapshot(elapsed, timer.estimated_duration);
        timer.elapsed = snap.elapsed;
        timer.remaining_time = 0.0;
        timer.is_overdue = timer.is_overdue || snap.exceeded;
        timer.overdue_time = snap.overdue_time;
        timer.status = TimerStatus::Completed;
        timer.stage = CookingStage::Ready;
        timer.progress = 100.0;
        timer.completed_time = Some(now);
        timer.actual_duration = timer
            .start_time
            .map(|start| ((now - start).num_milliseconds().max(0) as f64) / 1000.0);
        let completed = timer.clone();

        tracing::info!(
            timer_id,
            order_id = %completed.order_id,
            actual_duration = ?completed.actual_duration,
            overdue = completed.is_overdue,
            "计时完成"
        );
        self.sync_order_stage(&completed.order_id, CookingStage::Ready);
        self.emit_timer_changed(timer_id);
        Ok(completed)
    }

    pub fn reset_timer(&mut self, timer_id: &str) -> KitchenResult<()> {
        let timer = self.timer_mut(timer_id)?;
        timer.reset();

        tracing::debug!(timer_id, "重置计时");
        self.emit_timer_changed(timer_id);
        Ok(())
    }

    pub fn remove_timer(&mut self, timer_id: &str) -> KitchenResult<CookingTimer> {
        let timer = self
            .drop_timer(timer_id)
            .ok_or_else(|| KitchenError::TimerNotFound(timer_id.to_string()))?;

        self.emit(KitchenEvent::TimerChanged {
            timer_id: timer.id.clone(),
            order_id: timer.order_id.clone(),
            status: None,
        });
        Ok(timer)
    }

    /// 推进出餐阶段 (同步到队列中的订单)
    pub fn advance_stage(&mut self, timer_id: &str, stage: CookingStage) -> KitchenResult<()> {
        let timer = self.timer_mut(timer_id)?;
        if timer.status == TimerStatus::Completed {
            return Err(KitchenError::InvalidInput(format!(
                "计时器已完成, 不能修改阶段: timer_id={}",
                timer_id
            )));
        }
        timer.stage = stage;
        let order_id = timer.order_id.clone();

        self.sync_order_stage(&order_id, stage);
        self.emit(KitchenEvent::StageChanged {
            timer_id: timer_id.to_string(),
            stage,
        });
        Ok(())
    }

    fn sync_order_stage(&mut self, order_id: &str, stage: CookingStage) {
        if let Some(order) = self.queue.iter_mut().find(|o| o.id == order_id) {
            order.stage = stage;
        }
    }

    /// 用给定耗时刷新单个活动计时器
    ///
    /// 非活动计时器 (IDLE/PAUSED/COMPLETED) 不做任何修改, 返回空列表;
    /// is_overdue 一旦为 true 保持到 reset
    pub fn on_timer_update(&mut self, timer_id: &str, elapsed: f64) -> KitchenResult<Vec<KitchenAlert>> {
        let now = self.now();
        let warning_pct = self.policy.warning_pct();
        let critical_pct = self.policy.critical_pct();

        let timer = self
            .timers
            .get_mut(timer_id)
            .ok_or_else(|| KitchenError::TimerNotFound(timer_id.to_string()))?;
        if !timer.status.is_active() {
            return Ok(Vec::new());
        }

        let snap = progress::snapshot(elapsed, timer.estimated_duration);
        let was_overdue = timer.is_overdue;

        timer.elapsed = snap.elapsed;
        timer.remaining_time = snap.remaining_time;
        timer.progress = snap.progress;
        timer.is_overdue = was_overdue || snap.exceeded;
        timer.overdue_time = snap.overdue_time;
        timer.color_code = progress::color_for(snap.progress, warning_pct, critical_pct);
        timer.status = if timer.is_overdue {
            TimerStatus::Overdue
        } else {
            TimerStatus::Running
        };

        let raised = self.policy.check_timer(timer, now);
        let became_overdue = !was_overdue && timer.is_overdue;
        let order_id = timer.order_id.clone();

        if became_overdue {
            tracing::warn!(timer_id, order_id = %order_id, "计时器超时");
            self.emit_timer_changed(timer_id);
        }
        for alert in &raised {
            self.push_alert(alert.clone());
        }

        Ok(raised)
    }
}
