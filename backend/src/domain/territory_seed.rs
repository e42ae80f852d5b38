//! Sample territories inserted into an empty store at startup.

use tracing::info;

use crate::domain::ports::{TerritoryRepository, TerritoryRepositoryError};
use crate::domain::{Demographics, Territory, TerritoryId};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held territories and was left untouched.
    Skipped {
        /// Number of territories already present.
        existing: usize,
    },
    /// The sample territories were inserted.
    Seeded {
        /// Number of territories inserted.
        inserted: usize,
    },
}

struct SampleTerritory {
    name: &'static str,
    zip_prefix: &'static str,
    population: i64,
    median_income: i64,
    industries: [&'static str; 3],
    growth_rate: f64,
}

const SAMPLES: [SampleTerritory; 5] = [
    SampleTerritory {
        name: "Northwest Region",
        zip_prefix: "9810",
        population: 2_500_000,
        median_income: 75_000,
        industries: ["Technology", "Healthcare", "Finance"],
        growth_rate: 3.2,
    },
    SampleTerritory {
        name: "Southeast Region",
        zip_prefix: "3030",
        population: 1_800_000,
        median_income: 65_000,
        industries: ["Manufacturing", "Logistics", "Healthcare"],
        growth_rate: 2.8,
    },
    SampleTerritory {
        name: "Southwest Region",
        zip_prefix: "8500",
        population: 1_200_000,
        median_income: 58_000,
        industries: ["Tourism", "Real Estate", "Technology"],
        growth_rate: 4.1,
    },
    SampleTerritory {
        name: "Northeast Region",
        zip_prefix: "0210",
        population: 3_200_000,
        median_income: 82_000,
        industries: ["Finance", "Education", "Biotech"],
        growth_rate: 2.1,
    },
    SampleTerritory {
        name: "Central Region",
        zip_prefix: "6060",
        population: 2_100_000,
        median_income: 68_000,
        industries: ["Manufacturing", "Transportation", "Finance"],
        growth_rate: 1.9,
    },
];

impl SampleTerritory {
    fn to_territory(&self) -> Territory {
        let mut demographics = Demographics::new();
        demographics.insert("population", self.population);
        demographics.insert("medianIncome", self.median_income);
        demographics.insert("primaryIndustries", self.industries.to_vec());
        demographics.insert("growthRate", self.growth_rate);

        Territory {
            id: TerritoryId::UNASSIGNED,
            name: self.name.to_owned(),
            zip_codes: (1..=5)
                .map(|suffix| format!("{}{suffix}", self.zip_prefix))
                .collect(),
            demographics,
        }
    }
}

/// The five sample territories, unsaved.
#[must_use]
pub fn sample_territories() -> Vec<Territory> {
    SAMPLES.iter().map(SampleTerritory::to_territory).collect()
}

/// Insert the sample territories when the store is empty.
///
/// # Errors
/// Propagates the first repository failure; territories inserted before the
/// failure stay in place.
pub async fn seed_sample_territories<R>(repo: &R) -> Result<SeedOutcome, TerritoryRepositoryError>
where
    R: TerritoryRepository + ?Sized,
{
    info!("starting territory seeding");
    let existing = repo.list_all().await?.len();
    if existing > 0 {
        info!(existing, "store already contains territories, skipping seeding");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let samples = sample_territories();
    for territory in &samples {
        repo.create(territory).await?;
    }
    info!(inserted = samples.len(), "territory seeding completed");
    Ok(SeedOutcome::Seeded {
        inserted: samples.len(),
    })
}
