use std::collections::HashSet;

use serde::Deserialize;

use crate::error::PanelError;

// Discord select menus accept at most 25 options
pub const MAX_JOBS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[serde(alias = "ميناء")]
    Port,
    #[serde(alias = "خارج الميناء")]
    OutsidePort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rewards {
    pub exp: u32,
    pub money: u32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            exp: 250,
            money: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobEntry {
    pub name: String,
    pub icon: String,
    pub emoji: String,
    pub experience: String,
    pub location_type: LocationType,
    #[serde(default)]
    pub rewards: Option<Rewards>,
}

impl JobEntry {
    /// Configured rewards, falling back to the default payout.
    pub fn rewards(&self) -> Rewards {
        self.rewards.unwrap_or_default()
    }
}

/// Read-only job table. Iteration order is the order of the configuration file and also the order
/// of the select menu options.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    entries: Vec<JobEntry>,
}

impl JobCatalog {
    pub fn new(entries: Vec<JobEntry>) -> Result<Self, PanelError> {
        if entries.is_empty() {
            return Err(PanelError::InvalidCatalog(
                "at least one job is required".to_string(),
            ));
        }
        if entries.len() > MAX_JOBS {
            return Err(PanelError::InvalidCatalog(format!(
                "{} jobs configured, a select menu holds at most {MAX_JOBS}",
                entries.len()
            )));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = entries.iter().find(|e| !seen.insert(e.name.as_str())) {
            return Err(PanelError::InvalidCatalog(format!(
                "job {:?} is defined more than once",
                duplicate.name
            )));
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Result<&JobEntry, PanelError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| PanelError::JobNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn job(name: &str, location_type: LocationType, rewards: Option<Rewards>) -> JobEntry {
        JobEntry {
            name: name.to_string(),
            icon: "📦".to_string(),
            emoji: "🏢".to_string(),
            experience: "1".to_string(),
            location_type,
            rewards,
        }
    }

    pub fn sample_catalog() -> JobCatalog {
        JobCatalog::new(vec![
            JobEntry {
                name: "شركة الشحن".to_string(),
                icon: "🚚".to_string(),
                emoji: "🏢".to_string(),
                experience: "متوسط".to_string(),
                location_type: LocationType::Port,
                rewards: Some(Rewards {
                    exp: 300,
                    money: 700,
                }),
            },
            job("المزرعة", LocationType::OutsidePort, None),
            job("المنجم", LocationType::OutsidePort, None),
        ])
        .unwrap()
    }

    #[test]
    fn lookup() {
        let catalog = sample_catalog();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("المنجم").unwrap().name, "المنجم");
        assert!(matches!(
            catalog.get("غير موجود"),
            Err(PanelError::JobNotFound(name)) if name == "غير موجود"
        ));
    }

    #[test]
    fn default_rewards() {
        let entry = job("المزرعة", LocationType::OutsidePort, None);
        assert_eq!(
            entry.rewards(),
            Rewards {
                exp: 250,
                money: 500
            }
        );
    }

    #[test]
    fn catalog_validation() {
        assert!(matches!(
            JobCatalog::new(Vec::new()),
            Err(PanelError::InvalidCatalog(_))
        ));

        let duplicated = vec![
            job("a", LocationType::Port, None),
            job("b", LocationType::Port, None),
            job("a", LocationType::OutsidePort, None),
        ];
        assert!(matches!(
            JobCatalog::new(duplicated),
            Err(PanelError::InvalidCatalog(_))
        ));

        let too_many = (0..=MAX_JOBS)
            .map(|i| job(&i.to_string(), LocationType::Port, None))
            .collect();
        assert!(matches!(
            JobCatalog::new(too_many),
            Err(PanelError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn location_aliases() {
        let port: LocationType = serde_json::from_str("\"ميناء\"").unwrap();
        let outside: LocationType = serde_json::from_str("\"outside_port\"").unwrap();
        assert_eq!(port, LocationType::Port);
        assert_eq!(outside, LocationType::OutsidePort);
    }
}
