//! Rolling a parsed dice spec into a per-die breakdown.

use serde::{Deserialize, Serialize};

use crate::source::RandomSource;
use crate::spec::{DiceModifier, DiceSpec};

/// Reroll cap per die. At the cap the last face stands.
pub const MAX_REROLLS_PER_DIE: usize = 10;

/// One die's outcome, including its full reroll history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    /// Every face this die showed, in order. The last entry is final.
    pub faces: Vec<i64>,

    /// Whether this die counts toward the total after keep/drop.
    pub kept: bool,
}

impl DieRoll {
    /// The face that stands after rerolls.
    pub fn final_face(&self) -> i64 {
        self.faces.last().copied().unwrap_or(0)
    }
}

/// The outcome of rolling a dice spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    pub spec: DiceSpec,
    /// Per-die outcomes in roll order.
    pub dice: Vec<DieRoll>,
    /// Sum of kept final faces.
    pub total: i64,
}

impl RollOutcome {
    /// Per-die face list like `6, 5, 4, (2)`.
    ///
    /// Dropped dice are parenthesized; rerolled dice show their history as
    /// `1->4`.
    pub fn faces(&self) -> String {
        let faces: Vec<String> = self
            .dice
            .iter()
            .map(|die| {
                let history = die
                    .faces
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join("->");
                if die.kept {
                    history
                } else {
                    format!("({})", history)
                }
            })
            .collect();
        faces.join(", ")
    }

    /// Format a breakdown like `4d6kh3[6, 5, 4, (2)] = 15`.
    pub fn breakdown(&self) -> String {
        format!("{}[{}] = {}", self.spec, self.faces(), self.total)
    }
}

/// Roll `spec` using `source`, applying modifiers in order.
pub fn roll(spec: &DiceSpec, source: &mut dyn RandomSource) -> RollOutcome {
    let mut dice: Vec<DieRoll> = (0..spec.count)
        .map(|_| DieRoll {
            faces: vec![source.random_range(1, spec.sides as i64)],
            kept: true,
        })
        .collect();

    for modifier in &spec.modifiers {
        match *modifier {
            DiceModifier::RerollBelow(threshold) => {
                for die in dice.iter_mut().filter(|d| d.kept) {
                    let mut rerolls = 0;
                    while die.final_face() < threshold && rerolls < MAX_REROLLS_PER_DIE {
                        die.faces.push(source.random_range(1, spec.sides as i64));
                        rerolls += 1;
                    }
                }
            }
            DiceModifier::KeepHighest(n) => keep(&mut dice, n as usize, Extreme::Highest),
            DiceModifier::KeepLowest(n) => keep(&mut dice, n as usize, Extreme::Lowest),
            DiceModifier::DropHighest(n) => drop_extreme(&mut dice, n as usize, Extreme::Highest),
            DiceModifier::DropLowest(n) => drop_extreme(&mut dice, n as usize, Extreme::Lowest),
        }
    }

    let total = dice
        .iter()
        .filter(|d| d.kept)
        .map(DieRoll::final_face)
        .sum();

    RollOutcome {
        spec: spec.clone(),
        dice,
        total,
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Highest,
    Lowest,
}

/// Indices of currently-kept dice sorted toward the given extreme,
/// ties broken by roll order.
fn ranked_kept(dice: &[DieRoll], extreme: Extreme) -> Vec<usize> {
    let mut indices: Vec<usize> = dice
        .iter()
        .enumerate()
        .filter(|(_, d)| d.kept)
        .map(|(i, _)| i)
        .collect();
    match extreme {
        Extreme::Highest => indices.sort_by_key(|&i| (-dice[i].final_face(), i)),
        Extreme::Lowest => indices.sort_by_key(|&i| (dice[i].final_face(), i)),
    }
    indices
}

/// Keep only the `n` most extreme of the currently-kept dice.
fn keep(dice: &mut [DieRoll], n: usize, extreme: Extreme) {
    for &i in ranked_kept(dice, extreme).iter().skip(n) {
        dice[i].kept = false;
    }
}

/// Drop the `n` most extreme of the currently-kept dice.
fn drop_extreme(dice: &mut [DieRoll], n: usize, extreme: Extreme) {
    for &i in ranked_kept(dice, extreme).iter().take(n) {
        dice[i].kept = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::source::{FixedRolls, ThreadRngSource};

    use super::*;

    fn spec(raw: &str) -> DiceSpec {
        DiceSpec::parse(raw).unwrap()
    }

    #[test]
    fn plain_roll_in_range() {
        let spec = spec("3d6");
        let mut src = ThreadRngSource;
        for _ in 0..100 {
            let outcome = roll(&spec, &mut src);
            assert!((3..=18).contains(&outcome.total));
            assert_eq!(outcome.dice.len(), 3);
        }
    }

    #[test]
    fn fixed_faces_sum() {
        let outcome = roll(&spec("2d6"), &mut FixedRolls::new(vec![4, 5]));
        assert_eq!(outcome.total, 9);
        assert_eq!(outcome.breakdown(), "2d6[4, 5] = 9");
    }

    #[test]
    fn keep_highest_sums_top_faces() {
        let outcome = roll(&spec("4d6kh3"), &mut FixedRolls::new(vec![6, 2, 5, 4]));
        assert_eq!(outcome.total, 15);
        assert_eq!(outcome.breakdown(), "4d6kh3[6, (2), 5, 4] = 15");
    }

    #[test]
    fn keep_lowest_advantage_inverse() {
        let outcome = roll(&spec("2d20kl1"), &mut FixedRolls::new(vec![17, 3]));
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn drop_lowest() {
        let outcome = roll(&spec("4d6dl1"), &mut FixedRolls::new(vec![1, 3, 3, 6]));
        assert_eq!(outcome.total, 12);
        assert!(!outcome.dice[0].kept);
    }

    #[test]
    fn drop_highest_tie_breaks_by_roll_order() {
        let outcome = roll(&spec("3d6dh1"), &mut FixedRolls::new(vec![5, 5, 2]));
        // The first 5 is the one dropped.
        assert!(!outcome.dice[0].kept);
        assert_eq!(outcome.total, 7);
    }

    #[test]
    fn reroll_below_replaces_low_faces() {
        let outcome = roll(&spec("3d6r2"), &mut FixedRolls::new(vec![1, 5, 3, 4]));
        // First die shows 1, rerolls into 4; the others stand.
        assert_eq!(outcome.dice[0].faces, vec![1, 4]);
        assert_eq!(outcome.total, 12);
        assert_eq!(outcome.breakdown(), "3d6r2[1->4, 5, 3] = 12");
    }

    #[test]
    fn reroll_cap_terminates() {
        // Constant 1 against r2 can never satisfy the threshold.
        let outcome = roll(&spec("1d6r2"), &mut FixedRolls::constant(1));
        assert_eq!(outcome.dice[0].faces.len(), 1 + MAX_REROLLS_PER_DIE);
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn keep_then_total_only_kept() {
        let outcome = roll(&spec("4d6kh3"), &mut FixedRolls::new(vec![6, 6, 1, 1]));
        let kept: Vec<i64> = outcome
            .dice
            .iter()
            .filter(|d| d.kept)
            .map(DieRoll::final_face)
            .collect();
        assert_eq!(kept, vec![6, 6, 1]);
        assert_eq!(outcome.total, 13);
    }
}
