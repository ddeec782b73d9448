use crate::state::relay::LineId;

/// Fixed line registry paired with the logical on/off vector the game plays against.
///
/// Both vectors share indices and never change length after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBoard {
    lines: Vec<LineId>,
    on: Vec<bool>,
}

impl LineBoard {
    /// Build a board where every line starts switched on.
    pub fn new(lines: Vec<LineId>) -> Self {
        let on = vec![true; lines.len()];
        Self { lines, on }
    }

    /// Switch every line back on.
    pub fn reset(&mut self) {
        self.on.iter_mut().for_each(|flag| *flag = true);
    }

    /// Switch off the lowest-index line that is still on and return its identifier.
    pub fn switch_off_first_on(&mut self) -> Option<LineId> {
        let index = self.on.iter().position(|flag| *flag)?;
        self.on[index] = false;
        Some(self.lines[index])
    }

    /// Number of lines still on.
    pub fn remaining(&self) -> usize {
        self.on.iter().filter(|flag| **flag).count()
    }

    /// Iterate `(identifier, on)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (LineId, bool)> + '_ {
        self.lines.iter().copied().zip(self.on.iter().copied())
    }
}
