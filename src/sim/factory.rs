//! Race construction
//!
//! Picks a length from the class bucket, draws distinct horses from the
//! catalog and numbers them into lanes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::horse::{Racer, Terrain};
use super::race::Race;
use crate::catalog::Catalog;
use crate::consts::*;

/// Race distance class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthClass {
    #[default]
    Short,
    Middle,
    Long,
}

impl LengthClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthClass::Short => "Short",
            LengthClass::Middle => "Middle",
            LengthClass::Long => "Long",
        }
    }

    /// Possible race lengths in furlongs
    pub fn lengths(&self) -> &'static [f64] {
        match self {
            LengthClass::Short => &SHORT_LENGTHS,
            LengthClass::Middle => &MIDDLE_LENGTHS,
            LengthClass::Long => &LONG_LENGTHS,
        }
    }
}

impl fmt::Display for LengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "sprint" | "0" => Ok(LengthClass::Short),
            "middle" | "mid" | "1" => Ok(LengthClass::Middle),
            "long" | "route" | "2" => Ok(LengthClass::Long),
            other => Err(format!("unknown length class: {other}")),
        }
    }
}

/// Number of horses for a race, uniform in the configured range
pub fn random_field_size<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    rng.random_range(min..=max.max(min))
}

/// Build a race of `n` distinct horses (fewer if the catalog is smaller)
pub fn build_race<R: Rng + ?Sized>(
    catalog: &Catalog,
    n: usize,
    length_class: LengthClass,
    terrain: Terrain,
    rng: &mut R,
) -> Race {
    let lengths = length_class.lengths();
    let length = lengths[rng.random_range(0..lengths.len())];

    if n > catalog.len() {
        log::warn!(
            "Requested {} horses but catalog only has {}; clamping",
            n,
            catalog.len()
        );
    }

    let racers: Vec<Racer> = catalog
        .sample(n, rng)
        .into_iter()
        .enumerate()
        .map(|(i, horse)| {
            let mut racer = Racer::new(horse);
            racer.set_number(i as u32 + 1);
            racer
        })
        .collect();

    log::debug!(
        "Built {} race: {} furlongs on {}, {} horses",
        length_class,
        length,
        terrain,
        racers.len()
    );
    Race::new(racers, length, terrain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::horse::Horse;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn catalog_of(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| Horse::new(format!("Horse {i}"), 50, 50, 50, 6.0))
                .collect(),
        )
    }

    fn lanes(race: &Race) -> Vec<u32> {
        race.racers().iter().filter_map(|r| r.number()).collect()
    }

    #[test]
    fn test_length_comes_from_bucket() {
        let catalog = catalog_of(12);
        let mut rng = Pcg32::seed_from_u64(5);
        for class in [LengthClass::Short, LengthClass::Middle, LengthClass::Long] {
            for _ in 0..50 {
                let race = build_race(&catalog, 5, class, Terrain::Dirt, &mut rng);
                assert!(class.lengths().contains(&race.length()));
            }
        }
    }

    #[test]
    fn test_field_size_bounds() {
        let catalog = catalog_of(12);
        let mut rng = Pcg32::seed_from_u64(9);
        for n in [5, 11] {
            let race = build_race(&catalog, n, LengthClass::Middle, Terrain::Grass, &mut rng);
            assert_eq!(race.racers().len(), n);
            assert_eq!(lanes(&race), (1..=n as u32).collect::<Vec<_>>());
        }
        for _ in 0..200 {
            let n = random_field_size(&mut rng, MIN_FIELD_SIZE, MAX_FIELD_SIZE);
            assert!((5..=11).contains(&n));
        }
    }

    #[test]
    fn test_horses_are_distinct() {
        let catalog = catalog_of(11);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let race = build_race(&catalog, 11, LengthClass::Short, Terrain::Mud, &mut rng);
            let names: HashSet<&str> = race.racers().iter().map(|r| r.name()).collect();
            assert_eq!(names.len(), 11);
        }
    }

    #[test]
    fn test_clamps_to_catalog_size() {
        let catalog = catalog_of(3);
        let mut rng = Pcg32::seed_from_u64(1);
        let race = build_race(&catalog, 10, LengthClass::Short, Terrain::Dirt, &mut rng);
        assert_eq!(race.racers().len(), 3);
        assert_eq!(lanes(&race), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_catalog_builds_empty_race() {
        let catalog = Catalog::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut race = build_race(&catalog, 7, LengthClass::Long, Terrain::Dirt, &mut rng);
        assert!(race.racers().is_empty());
        assert_eq!(race.run(&mut rng), None);
    }

    #[test]
    fn test_seed_reproduces_selection() {
        let catalog = catalog_of(12);
        let build = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let race = build_race(&catalog, 8, LengthClass::Long, Terrain::Dirt, &mut rng);
            let names: Vec<String> = race.racers().iter().map(|r| r.name().to_string()).collect();
            (race.length(), names, lanes(&race))
        };
        assert_eq!(build(77), build(77));
    }

    #[test]
    fn test_length_class_parsing() {
        assert_eq!("short".parse::<LengthClass>(), Ok(LengthClass::Short));
        assert_eq!("Middle".parse::<LengthClass>(), Ok(LengthClass::Middle));
        assert_eq!("2".parse::<LengthClass>(), Ok(LengthClass::Long));
        assert!("marathon".parse::<LengthClass>().is_err());
    }
}
