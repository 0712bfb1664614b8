use hsw_core::errors::SweepError;
use hsw_core::{ElementBinding, SweepElement};
use indexmap::IndexMap;

/// Lazy cursor over the cartesian product of the sweep expansions.
///
/// Combinations come out in declaration order with the last sweep entry
/// varying fastest. Without sweep entries the space holds exactly one empty
/// combination, so every experiment submits at least one run point.
#[derive(Debug, Clone)]
pub struct SweepSpace {
    expansions: Vec<Vec<ElementBinding>>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl SweepSpace {
    /// Expands every sweep entry up front; the product itself stays lazy.
    pub fn new(sweep: Option<&IndexMap<String, SweepElement>>) -> Result<Self, SweepError> {
        let mut expansions = Vec::new();
        if let Some(sweep) = sweep {
            for element in sweep.values() {
                expansions.push(element.expand()?);
            }
        }
        // An empty candidate list empties the whole product.
        let exhausted = expansions.iter().any(Vec::is_empty);
        let cursor = vec![0; expansions.len()];
        Ok(Self {
            expansions,
            cursor,
            exhausted,
        })
    }

    /// Number of combinations the space produces in total.
    pub fn cardinality(&self) -> usize {
        self.expansions.iter().map(Vec::len).product()
    }

    /// Produces the next combination, or `None` once the space is exhausted.
    ///
    /// Exhaustion is final; build a fresh space to enumerate again.
    pub fn next_combination(&mut self) -> Option<Vec<ElementBinding>> {
        if self.exhausted {
            return None;
        }
        let combination = self
            .cursor
            .iter()
            .zip(&self.expansions)
            .map(|(&idx, expansion)| expansion[idx].clone())
            .collect();
        self.advance();
        Some(combination)
    }

    fn advance(&mut self) {
        for position in (0..self.cursor.len()).rev() {
            self.cursor[position] += 1;
            if self.cursor[position] < self.expansions[position].len() {
                return;
            }
            self.cursor[position] = 0;
        }
        self.exhausted = true;
    }
}
