// ==========================================
// 后厨计时系统 - 工位操作
// ==========================================
// 负载为人工设置值, 超过告警阈值时生成工位负载告警
// ==========================================

use super::core::KitchenStore;
use super::error::{KitchenError, KitchenResult};
use crate::domain::station::{Station, MAX_STATION_CAPACITY};
use crate::domain::types::StationStatus;
use crate::engine::events::KitchenEvent;

fn validate_capacity(capacity: u8) -> KitchenResult<()> {
    if capacity > MAX_STATION_CAPACITY {
        return Err(KitchenError::InvalidInput(format!(
            "capacity 必须在 0~{} 之间, 实际为 {}",
            MAX_STATION_CAPACITY, capacity
        )));
    }
    Ok(())
}

impl KitchenStore {
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, station_id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == station_id)
    }

    fn station_index(&self, station_id: &str) -> KitchenResult<usize> {
        self.stations
            .iter()
            .position(|s| s.id == station_id)
            .ok_or_else(|| KitchenError::StationNotFound(station_id.to_string()))
    }

    /// 整体替换工位列表 (远端拉取成功后)
    pub fn set_stations(&mut self, mut stations: Vec<Station>) -> KitchenResult<()> {
        for station in &stations {
            validate_capacity(station.capacity)?;
        }
        for station in stations.iter_mut() {
            self.carry_capacity_latch(station);
        }
        self.stations = stations;
        self.rebuild_station_orders();

        let ids: Vec<String> = self.stations.iter().map(|s| s.id.clone()).collect();
        for station_id in ids {
            self.check_station_capacity(&station_id);
            self.emit(KitchenEvent::StationChanged { station_id });
        }
        Ok(())
    }

    /// 新增或替换单个工位
    pub fn upsert_station(&mut self, mut station: Station) -> KitchenResult<()> {
        validate_capacity(station.capacity)?;
        let station_id = station.id.clone();
        self.carry_capacity_latch(&mut station);

        match self.stations.iter_mut().find(|s| s.id == station_id) {
            Some(existing) => *existing = station,
            None => self.stations.push(station),
        }
        // active_orders 以队列中的分配为准
        self.rebuild_station_orders();

        self.check_station_capacity(&station_id);
        self.emit(KitchenEvent::StationChanged { station_id });
        Ok(())
    }

    pub fn update_station_capacity(&mut self, station_id: &str, capacity: u8) -> KitchenResult<()> {
        validate_capacity(capacity)?;
        let idx = self.station_index(station_id)?;
        self.stations[idx].capacity = capacity;

        tracing::debug!(station_id, capacity, "更新工位负载");
        self.check_station_capacity(station_id);
        self.emit(KitchenEvent::StationChanged {
            station_id: station_id.to_string(),
        });
        Ok(())
    }

    pub fn update_station_status(&mut self, station_id: &str, status: StationStatus) -> KitchenResult<()> {
        let idx = self.station_index(station_id)?;
        self.stations[idx].status = status;

        tracing::info!(station_id, status = %status, "更新工位状态");
        self.emit(KitchenEvent::StationChanged {
            station_id: station_id.to_string(),
        });
        Ok(())
    }

    pub fn assign_staff_to_station(&mut self, station_id: &str, staff_id: &str) -> KitchenResult<()> {
        if staff_id.trim().is_empty() {
            return Err(KitchenError::InvalidInput("staff_id 不能为空".to_string()));
        }
        let idx = self.station_index(station_id)?;
        let station = &mut self.stations[idx];
        if !station.assigned_staff.iter().any(|s| s == staff_id) {
            station.assigned_staff.push(staff_id.to_string());
        }

        self.emit(KitchenEvent::StationChanged {
            station_id: station_id.to_string(),
        });
        Ok(())
    }

    /// 移除员工; 返回该员工原本是否在此工位
    pub fn remove_staff_from_station(&mut self, station_id: &str, staff_id: &str) -> KitchenResult<bool> {
        let idx = self.station_index(station_id)?;
        let station = &mut self.stations[idx];
        let before = station.assigned_staff.len();
        station.assigned_staff.retain(|s| s != staff_id);
        let removed = station.assigned_staff.len() != before;

        if removed {
            self.emit(KitchenEvent::StationChanged {
                station_id: station_id.to_string(),
            });
        }
        Ok(removed)
    }

    /// 同 id 工位被替换时沿用负载告警闩锁
    fn carry_capacity_latch(&self, incoming: &mut Station) {
        if let Some(existing) = self.station(&incoming.id) {
            incoming.capacity_alerted = existing.capacity_alerted;
        }
    }

    fn check_station_capacity(&mut self, station_id: &str) {
        let now = self.now();
        let alert = match self.stations.iter_mut().find(|s| s.id == station_id) {
            Some(station) => self.policy.check_station(station, now),
            None => None,
        };
        if let Some(alert) = alert {
            tracing::warn!(station_id, "工位负载过高");
            self.push_alert(alert);
        }
    }
}
