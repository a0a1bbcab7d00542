use crate::{Position, Rectangle, Size};

/// A rectangular selection spanning two corner pixels, both inclusive.
///
/// `anchor` and `lead` stay exactly where the caller put them; the
/// rectangle is only normalized when read through [`Selection::min`],
/// [`Selection::max`] or [`Selection::as_rectangle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub lead: Position,

    /// Set by `end_selection`; a locked selection no longer follows
    /// `update_selection`.
    pub locked: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new((0, 0))
    }
}

impl Selection {
    pub fn new(pos: impl Into<Position>) -> Self {
        let pos = pos.into();
        Self {
            anchor: pos,
            lead: pos,
            locked: false,
        }
    }

    pub fn min(&self) -> Position {
        self.anchor.min(self.lead)
    }

    pub fn max(&self) -> Position {
        self.anchor.max(self.lead)
    }

    /// Size of the selected area; both corners count, so a single-pixel
    /// selection is 1x1. Spans wider than `i32::MAX` saturate; the corners
    /// are caller-supplied and unbounded.
    pub fn size(&self) -> Size {
        Size::new(span(self.anchor.x, self.lead.x), span(self.anchor.y, self.lead.y))
    }

    pub fn as_rectangle(&self) -> Rectangle {
        Rectangle::from_min_size(self.min(), self.size())
    }

    pub fn is_inside(&self, pos: impl Into<Position>) -> bool {
        self.as_rectangle().is_inside(pos)
    }
}

fn span(a: i32, b: i32) -> i32 {
    a.abs_diff(b).saturating_add(1).min(i32::MAX as u32) as i32
}

impl From<(i32, i32, i32, i32)> for Selection {
    fn from(value: (i32, i32, i32, i32)) -> Self {
        Selection {
            anchor: (value.0, value.1).into(),
            lead: (value.2, value.3).into(),
            locked: false,
        }
    }
}
