use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::dataset::Record;
use crate::domain::DashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Completed,
    InProgress,
    Pending,
}

impl RouteStatus {
    pub const ALL: [RouteStatus; 3] = [
        RouteStatus::Completed,
        RouteStatus::InProgress,
        RouteStatus::Pending,
    ];
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteStatus::Completed => "Completed",
            RouteStatus::InProgress => "In Progress",
            RouteStatus::Pending => "Pending",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub vehicle: String,
    pub distance_km: u32,
    pub status: RouteStatus,
    pub date: NaiveDate,
}

impl Record for Route {
    type Status = RouteStatus;
    const COLUMNS: &'static [&'static str] = &[
        "Route ID",
        "Route Name",
        "Driver",
        "Vehicle",
        "Distance",
        "Date",
        "Status",
    ];

    fn id(&self) -> String {
        self.id.clone()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.driver, &self.vehicle, &self.id]
    }

    fn status(&self) -> RouteStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.driver.clone(),
            self.vehicle.clone(),
            format!("{} km", self.distance_km),
            self.date.format("%Y-%m-%d").to_string(),
            self.status.to_string(),
        ]
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            4 => self.distance_km.cmp(&other.distance_km),
            5 => self.date.cmp(&other.date),
            6 => (self.status as u8).cmp(&(other.status as u8)),
            _ => {
                let a = self.cells();
                let b = other.cells();
                a.get(column).cmp(&b.get(column))
            }
        }
    }
}

const SEED: [(&str, &str, &str, &str, u32, RouteStatus, &str); 15] = [
    ("RT001", "Jakarta - Bandung", "Ahmad Yani", "B 1234 XYZ", 150, RouteStatus::Completed, "2025-12-01"),
    ("RT002", "Surabaya - Malang", "Budi Santoso", "L 5678 ABC", 90, RouteStatus::InProgress, "2025-12-02"),
    ("RT003", "Medan - Pematang Siantar", "Citra Dewi", "BB 9012 DEF", 128, RouteStatus::Pending, "2025-12-03"),
    ("RT004", "Semarang - Solo", "Dedi Kurniawan", "H 3456 GHI", 110, RouteStatus::Completed, "2025-12-01"),
    ("RT005", "Yogyakarta - Semarang", "Eka Putri", "AB 7890 JKL", 120, RouteStatus::InProgress, "2025-12-04"),
    ("RT006", "Palembang - Jambi", "Fajar Rahman", "BG 2345 MNO", 220, RouteStatus::Completed, "2025-12-02"),
    ("RT007", "Makassar - Pare-Pare", "Gita Sari", "DD 6789 PQR", 155, RouteStatus::Pending, "2025-12-05"),
    ("RT008", "Banjarmasin - Balikpapan", "Hendra Wijaya", "DA 0123 STU", 380, RouteStatus::InProgress, "2025-12-03"),
    ("RT009", "Denpasar - Singaraja", "Indah Permata", "DK 4567 VWX", 95, RouteStatus::Completed, "2025-12-01"),
    ("RT010", "Manado - Tomohon", "Joko Susilo", "DB 8901 YZA", 25, RouteStatus::Pending, "2025-12-04"),
    ("RT011", "Pontianak - Singkawang", "Kartika Sari", "KB 2345 BCD", 145, RouteStatus::Completed, "2025-12-02"),
    ("RT012", "Batam - Tanjung Pinang", "Lukman Hakim", "BP 6789 EFG", 180, RouteStatus::InProgress, "2025-12-05"),
    ("RT013", "Lampung - Palembang", "Maya Angelina", "BE 0123 HIJ", 240, RouteStatus::Pending, "2025-12-03"),
    ("RT014", "Padang - Bukittinggi", "Nanda Pratama", "BA 4567 KLM", 92, RouteStatus::Completed, "2025-12-01"),
    ("RT015", "Pekanbaru - Dumai", "Oki Setiawan", "BM 8901 NOP", 188, RouteStatus::InProgress, "2025-12-04"),
];

pub fn seed_routes() -> Result<Vec<Route>, DashError> {
    SEED.iter()
        .map(|&(id, name, driver, vehicle, distance_km, status, date)| {
            Ok(Route {
                id: id.to_string(),
                name: name.to_string(),
                driver: driver.to_string(),
                vehicle: vehicle.to_string(),
                distance_km,
                status,
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetView, StatusFilter, ViewState, visible_records};

    #[test]
    fn seeds_are_unique() {
        let routes = seed_routes().unwrap();
        assert_eq!(routes.len(), 15);
        let mut ids: Vec<_> = routes.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn search_covers_vehicle_and_driver() {
        let routes = seed_routes().unwrap();
        let order: Vec<usize> = (0..routes.len()).collect();
        let mut state = ViewState::new(10);
        state.query = "xyz".to_string();
        let found = visible_records(&routes, &order, &state);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].vehicle, "B 1234 XYZ");
        state.query = "SARI".to_string();
        let found: Vec<_> = visible_records(&routes, &order, &state).iter().map(|r| r.id.clone()).collect();
        assert_eq!(found, vec!["RT007", "RT011"]);
    }

    #[test]
    fn filter_by_status_paginates() {
        let mut view = DatasetView::new(seed_routes().unwrap(), 5);
        assert_eq!(view.page_count(), 3);
        view.set_status_filter(StatusFilter::Only(RouteStatus::Completed));
        assert_eq!(view.filtered_len(), 6);
        assert_eq!(view.page_count(), 2);
        assert_eq!(view.showing_range(), (1, 5, 6));
    }

    #[test]
    fn distance_sorts_numerically() {
        let mut view = DatasetView::new(seed_routes().unwrap(), 20);
        view.sort_by(4, true);
        let first: Vec<u32> = view.page_records().iter().take(3).map(|r| r.distance_km).collect();
        assert_eq!(first, vec![25, 90, 92]);
        view.sort_by(4, false);
        assert_eq!(view.page_records()[0].id, "RT008");
    }
}
