use ratatui::layout::{Rect, Size};

/// Return a `Rect` of the given size centered within `area`.  If `size` is
/// larger than `area` in either dimension, the result is clipped to `area`
/// in that dimension.  When the leftover space is odd, the extra column or
/// row goes to the right/bottom.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
