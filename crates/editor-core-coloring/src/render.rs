//! Per-line styling instructions handed to the rendering pipeline.
//!
//! Ranges are absolute character offsets, already clamped to the queried line.

use crate::color::Rgba;
use std::ops::Range;

/// Receiver of per-line styling instructions.
///
/// Instructions arrive in application order: when two instructions cover the same character,
/// the later one wins.
pub trait LineStyler {
    /// Apply a foreground color to `range`. `None` means "leave the color unchanged".
    fn set_foreground(&mut self, range: Range<usize>, color: Option<Rgba>);

    /// Apply an opacity to `range`.
    fn set_opacity(&mut self, range: Range<usize>, opacity: f32);
}

/// An owned styling instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum LineInstruction {
    /// See [`LineStyler::set_foreground`].
    Foreground {
        /// Clamped character range.
        range: Range<usize>,
        /// Color to apply, `None` to leave it unchanged.
        color: Option<Rgba>,
    },
    /// See [`LineStyler::set_opacity`].
    Opacity {
        /// Clamped character range.
        range: Range<usize>,
        /// Opacity to apply.
        opacity: f32,
    },
}

impl LineInstruction {
    /// The character range the instruction applies to.
    pub fn range(&self) -> &Range<usize> {
        match self {
            Self::Foreground { range, .. } | Self::Opacity { range, .. } => range,
        }
    }
}

impl LineStyler for Vec<LineInstruction> {
    fn set_foreground(&mut self, range: Range<usize>, color: Option<Rgba>) {
        self.push(LineInstruction::Foreground { range, color });
    }

    fn set_opacity(&mut self, range: Range<usize>, opacity: f32) {
        self.push(LineInstruction::Opacity { range, opacity });
    }
}

/// Resolve instructions into the effective per-character foreground and opacity of a line.
///
/// Later instructions overwrite earlier ones. Characters no instruction touches stay `None`;
/// a `Foreground { color: None }` instruction leaves the previous value in place.
pub fn resolve_line(
    line: Range<usize>,
    instructions: &[LineInstruction],
) -> Vec<(Option<Rgba>, Option<f32>)> {
    let mut cells = vec![(None, None); line.len()];
    for instruction in instructions {
        let range = instruction.range();
        let from = range.start.max(line.start) - line.start;
        let to = range.end.min(line.end).saturating_sub(line.start);
        if from >= to {
            continue;
        }

        for cell in &mut cells[from..to] {
            match instruction {
                LineInstruction::Foreground { color: Some(c), .. } => cell.0 = Some(*c),
                LineInstruction::Foreground { color: None, .. } => {}
                LineInstruction::Opacity { opacity, .. } => cell.1 = Some(*opacity),
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_instruction_wins() {
        let red = Rgba::rgb(255, 0, 0);
        let blue = Rgba::rgb(0, 0, 255);
        let mut instructions = Vec::new();
        instructions.set_foreground(0..4, Some(red));
        instructions.set_foreground(2..6, Some(blue));
        instructions.set_foreground(0..6, None);
        instructions.set_opacity(5..6, 0.5);

        let cells = resolve_line(0..6, &instructions);
        assert_eq!(
            cells,
            vec![
                (Some(red), None),
                (Some(red), None),
                (Some(blue), None),
                (Some(blue), None),
                (Some(blue), None),
                (Some(blue), Some(0.5)),
            ]
        );
    }

    #[test]
    fn test_resolve_line_uses_absolute_offsets() {
        let green = Rgba::rgb(0, 255, 0);
        let instructions = vec![LineInstruction::Foreground {
            range: 11..13,
            color: Some(green),
        }];

        let cells = resolve_line(10..14, &instructions);
        assert_eq!(
            cells.iter().map(|c| c.0).collect::<Vec<_>>(),
            vec![None, Some(green), Some(green), None]
        );
    }
}
