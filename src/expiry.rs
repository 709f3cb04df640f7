use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::dataset::Record;
use crate::domain::DashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpiryStatus {
    Critical,
    Danger,
    Warning,
    Safe,
}

impl ExpiryStatus {
    pub const ALL: [ExpiryStatus; 4] = [
        ExpiryStatus::Critical,
        ExpiryStatus::Danger,
        ExpiryStatus::Warning,
        ExpiryStatus::Safe,
    ];
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExpiryStatus::Critical => "critical",
            ExpiryStatus::Danger => "danger",
            ExpiryStatus::Warning => "warning",
            ExpiryStatus::Safe => "safe",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Dairy,
    Bakery,
    Fresh,
    Meat,
    Seafood,
    Vegetables,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Dairy,
        Category::Bakery,
        Category::Fresh,
        Category::Meat,
        Category::Seafood,
        Category::Vegetables,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Fresh => "Fresh",
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::Vegetables => "Vegetables",
            Category::Other => "Other",
        }
    }
}

pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

pub fn classify(days: i64) -> ExpiryStatus {
    if days <= 1 {
        ExpiryStatus::Critical
    } else if days <= 3 {
        ExpiryStatus::Danger
    } else if days <= 7 {
        ExpiryStatus::Warning
    } else {
        ExpiryStatus::Safe
    }
}

pub fn status_text(days: i64) -> String {
    match days {
        d if d < 0 => "Expired".to_string(),
        0 => "Expires Today".to_string(),
        1 => "1 Day Left".to_string(),
        d => format!("{d} Days Left"),
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub expiry: NaiveDate,
    pub days_left: i64,
    pub status: ExpiryStatus,
}

impl Product {
    /// Builds a product whose status is derived from `expiry` as seen on `today`.
    pub fn new(id: u32, name: &str, category: Category, expiry: NaiveDate, today: NaiveDate) -> Self {
        let days_left = days_until(expiry, today);
        Self {
            id,
            name: name.to_string(),
            category,
            expiry,
            days_left,
            status: classify(days_left),
        }
    }

    pub fn status_text(&self) -> String {
        status_text(self.days_left)
    }
}

impl Record for Product {
    type Status = ExpiryStatus;
    const COLUMNS: &'static [&'static str] = &["Product", "Category", "Expiry Date", "Status"];

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.name, self.category.name()]
    }

    fn status(&self) -> ExpiryStatus {
        self.status
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.name().to_string(),
            self.expiry.format("%Y-%m-%d").to_string(),
            self.status_text(),
        ]
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            2 | 3 => self.expiry.cmp(&other.expiry),
            _ => {
                let a = self.cells();
                let b = other.cells();
                a.get(column).cmp(&b.get(column))
            }
        }
    }
}

/// Counters for the cards above the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiryStats {
    pub total: usize,
    pub critical: usize,
    pub danger: usize,
    pub warning: usize,
}

impl ExpiryStats {
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(
            ExpiryStats {
                total: products.len(),
                ..Default::default()
            },
            |mut stats, p| {
                match p.status {
                    ExpiryStatus::Critical => stats.critical += 1,
                    ExpiryStatus::Danger => stats.danger += 1,
                    ExpiryStatus::Warning => stats.warning += 1,
                    ExpiryStatus::Safe => {}
                }
                stats
            },
        )
    }
}

pub fn next_product_id(products: &[Product]) -> u32 {
    products.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

const SEED: [(u32, &str, Category, &str); 8] = [
    (1, "Susu Ultra Milk", Category::Dairy, "2025-12-10"),
    (2, "Roti Tawar Sari Roti", Category::Bakery, "2025-12-08"),
    (3, "Yogurt Cimory", Category::Dairy, "2025-12-15"),
    (4, "Keju Kraft", Category::Dairy, "2025-12-06"),
    (5, "Telur Ayam", Category::Fresh, "2025-12-12"),
    (6, "Daging Sapi", Category::Meat, "2025-12-07"),
    (7, "Ikan Salmon", Category::Seafood, "2025-12-20"),
    (8, "Sayuran Organik", Category::Vegetables, "2025-12-09"),
];

pub fn seed_products(today: NaiveDate) -> Result<Vec<Product>, DashError> {
    SEED.iter()
        .map(|&(id, name, category, expiry)| {
            let expiry = NaiveDate::parse_from_str(expiry, "%Y-%m-%d")?;
            Ok(Product::new(id, name, category, expiry, today))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetView;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 5).unwrap()
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify(-3), ExpiryStatus::Critical);
        assert_eq!(classify(1), ExpiryStatus::Critical);
        assert_eq!(classify(2), ExpiryStatus::Danger);
        assert_eq!(classify(3), ExpiryStatus::Danger);
        assert_eq!(classify(7), ExpiryStatus::Warning);
        assert_eq!(classify(8), ExpiryStatus::Safe);
    }

    #[test]
    fn texts() {
        assert_eq!(status_text(-1), "Expired");
        assert_eq!(status_text(0), "Expires Today");
        assert_eq!(status_text(1), "1 Day Left");
        assert_eq!(status_text(5), "5 Days Left");
    }

    #[test]
    fn seed_statuses_follow_reference_date() {
        let products = seed_products(today()).unwrap();
        let statuses: Vec<_> = products.iter().map(|p| p.status).collect();
        use ExpiryStatus::*;
        assert_eq!(
            statuses,
            vec![Warning, Danger, Safe, Critical, Warning, Danger, Safe, Warning]
        );
        assert_eq!(
            ExpiryStats::from_products(&products),
            ExpiryStats { total: 8, critical: 1, danger: 2, warning: 3 }
        );
    }

    #[test]
    fn later_reference_date_expires_everything() {
        let late = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let products = seed_products(late).unwrap();
        assert!(products.iter().all(|p| p.status_text() == "Expired"));
    }

    #[test]
    fn ids_stay_unique_after_delete() {
        let mut view = DatasetView::new(seed_products(today()).unwrap(), 10);
        assert!(view.delete("3").is_some());
        let id = next_product_id(view.records());
        assert_eq!(id, 9);
        let expiry = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();
        view.add(Product::new(id, "Tahu", Category::Other, expiry, today()));
        let ids: Vec<String> = view.records().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["1", "2", "4", "5", "6", "7", "8", "9"]);
        assert_eq!(ExpiryStats::from_products(view.records()).critical, 2);
    }

    #[test]
    fn search_matches_category() {
        let mut view = DatasetView::new(seed_products(today()).unwrap(), 10);
        view.set_query("dairy");
        assert_eq!(view.filtered_len(), 3);
    }
}
