//! Local bonus-point allocation from each fixture's `bps` ranking.
//!
//! Only the first three `bps` entries listed for each side are candidates; the
//! provider lists its leaders first. Ties are compared between adjacent ranks
//! only, so when the top three scores are all equal the second-placed player
//! lands in both the 3-point and 2-point tiers and is credited with both.

use anyhow::Result;

use crate::error::ScoringError;
use crate::models::{Fixture, PerformanceEntry};

pub const BPS_IDENTIFIER: &str = "bps";
const CANDIDATES_PER_SIDE: usize = 3;

/// Bonus tiers for one gameweek. Rebuilt from scratch on every standings request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusAward {
    pub three: Vec<u32>,
    pub two: Vec<u32>,
    pub one: Vec<u32>,
}

impl BonusAward {
    /// Sum of every tier the player appears in.
    pub fn points_for(&self, player_id: u32) -> i32 {
        let mut points = 0;
        if self.three.contains(&player_id) {
            points += 3;
        }
        if self.two.contains(&player_id) {
            points += 2;
        }
        if self.one.contains(&player_id) {
            points += 1;
        }
        points
    }

    fn extend(&mut self, other: BonusAward) {
        self.three.extend(other.three);
        self.two.extend(other.two);
        self.one.extend(other.one);
    }
}

/// Allocates bonus for every fixture of a gameweek that carries a `bps` block.
pub fn allocate_gameweek(fixtures: &[Fixture]) -> Result<BonusAward> {
    let mut award = BonusAward::default();
    for fixture in fixtures {
        for stat in fixture
            .stats
            .iter()
            .filter(|s| s.identifier == BPS_IDENTIFIER)
        {
            award.extend(allocate_fixture(fixture.id, &stat.home, &stat.away)?);
        }
    }
    Ok(award)
}

/// Ranks one fixture's six candidates and assigns the 3/2/1 tiers.
pub fn allocate_fixture(
    fixture_id: u32,
    home: &[PerformanceEntry],
    away: &[PerformanceEntry],
) -> Result<BonusAward, ScoringError> {
    check_side(fixture_id, "home", home)?;
    check_side(fixture_id, "away", away)?;

    let mut candidates: Vec<PerformanceEntry> = home
        .iter()
        .zip(away.iter())
        .take(CANDIDATES_PER_SIDE)
        .flat_map(|(h, a)| [*h, *a])
        .collect();
    // Stable, so equal scores keep home-then-away listing order.
    candidates.sort_by(|a, b| b.value.cmp(&a.value));
    candidates.truncate(3);

    let (first, second, third) = (candidates[0], candidates[1], candidates[2]);
    let mut award = BonusAward::default();

    if first.value == second.value {
        award.three.push(first.player_id);
        award.three.push(second.player_id);
    } else {
        award.three.push(first.player_id);
        award.two.push(second.player_id);
    }

    if second.value == third.value {
        award.two.push(second.player_id);
        award.two.push(third.player_id);
    } else {
        award.one.push(third.player_id);
    }

    Ok(award)
}

fn check_side(
    fixture_id: u32,
    side: &'static str,
    entries: &[PerformanceEntry],
) -> Result<(), ScoringError> {
    if entries.len() < CANDIDATES_PER_SIDE {
        return Err(ScoringError::ShortBonusSide {
            fixture_id,
            side,
            found: entries.len(),
        });
    }
    Ok(())
}
