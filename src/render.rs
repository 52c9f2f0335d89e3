//! The drawing side of the game: the interface the simulator draws through,
//! and an implementation of it on top of a Ratatui buffer
use crate::consts;
use crate::game::{Cell, Grid};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::{Color, Style},
    text::Line,
    widgets::Widget,
};

/// Something that a frame of the game can be drawn on.
///
/// The simulator calls these in a fixed order every tick, starting with
/// `clear_frame()`.
pub(crate) trait Renderer {
    fn clear_frame(&mut self);
    fn draw_score(&mut self, score: u32);
    fn draw_cell(&mut self, cell: Cell, color: Color, shape: Shape);
    fn draw_border(&mut self);
    fn draw_terminal_overlay(&mut self);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Shape {
    Square,
    Circle,
}

impl Shape {
    fn symbols(self) -> [char; 2] {
        match self {
            Shape::Square => consts::SQUARE_SYMBOLS,
            Shape::Circle => consts::CIRCLE_SYMBOLS,
        }
    }
}

/// The colours used for drawing the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    pub(crate) head: Color,
    /// Colour of the second, fourth, ... segments
    pub(crate) body_odd: Color,
    /// Colour of the third, fifth, ... segments
    pub(crate) body_even: Color,
    pub(crate) food: Color,
    pub(crate) border: Color,
    pub(crate) text: Color,
}

impl Palette {
    /// Return the colour for the snake segment at `index` (0 = head)
    pub(crate) fn segment(&self, index: usize) -> Color {
        if index == 0 {
            self.head
        } else if index % 2 == 1 {
            self.body_odd
        } else {
            self.body_even
        }
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            head: consts::HEAD_COLOR,
            body_odd: consts::BODY_ODD_COLOR,
            body_even: consts::BODY_EVEN_COLOR,
            food: consts::FOOD_COLOR,
            border: consts::BORDER_COLOR,
            text: consts::TEXT_COLOR,
        }
    }
}

/// An off-screen frame of the game.
///
/// The top row holds the score bar; below it, each grid cell takes up two
/// terminal columns and one row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Screen {
    grid: Grid,
    palette: Palette,
    buf: Buffer,
}

impl Screen {
    pub(crate) fn new(grid: Grid, palette: Palette) -> Screen {
        let size = Screen::size_for(grid);
        Screen {
            grid,
            palette,
            buf: Buffer::empty(Rect::from((Position::ORIGIN, size))),
        }
    }

    /// The size of the frame needed to display `grid`
    pub(crate) fn size_for(grid: Grid) -> Size {
        Size {
            width: grid.width().saturating_mul(2),
            height: grid.height().saturating_add(1),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &Buffer {
        &self.buf
    }

    fn grid_area(&self) -> Rect {
        let area = self.buf.area;
        Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        }
    }

    fn put(&mut self, cell: Cell, symbols: [char; 2], style: Style) {
        let Some(y) = cell.row.checked_add(1) else {
            return;
        };
        let Some(x) = cell.col.checked_mul(2) else {
            return;
        };
        for (dx, symbol) in (0..).zip(symbols) {
            let Some(x) = x.checked_add(dx) else {
                return;
            };
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(symbol);
                c.set_style(style);
            }
        }
    }
}

impl Renderer for Screen {
    fn clear_frame(&mut self) {
        self.buf.reset();
    }

    fn draw_score(&mut self, score: u32) {
        let area = Rect {
            height: 1,
            ..self.buf.area
        };
        let style = Style::new()
            .fg(self.palette.text)
            .add_modifier(consts::SCORE_BAR_MODIFIER);
        Line::styled(format!(" Score: {score}"), style).render(area, &mut self.buf);
    }

    fn draw_cell(&mut self, cell: Cell, color: Color, shape: Shape) {
        self.put(cell, shape.symbols(), Style::new().fg(color));
    }

    fn draw_border(&mut self) {
        let style = Style::new().fg(self.palette.border);
        for cell in self.grid.walls() {
            self.put(cell, consts::SQUARE_SYMBOLS, style);
        }
    }

    fn draw_terminal_overlay(&mut self) {
        let width = u16::try_from(consts::GAME_OVER_TEXT.chars().count()).unwrap_or(u16::MAX);
        let label_area = center_rect(self.grid_area(), Size::new(width, 1));
        let style = Style::new()
            .fg(self.palette.text)
            .add_modifier(consts::SCORE_BAR_MODIFIER);
        Line::styled(consts::GAME_OVER_TEXT, style).render(label_area, &mut self.buf);
    }
}

impl Widget for &Screen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let target = center_rect(area, self.buf.area.as_size());
        for (src, dest) in self.buf.area.positions().zip(target.positions()) {
            if let (Some(from), Some(to)) = (self.buf.cell(src), buf.cell_mut(dest)) {
                *to = from.clone();
            }
        }
    }
}

/// A renderer that just remembers what it was asked to draw
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Recorder {
    pub(crate) calls: Vec<Draw>,
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Draw {
    Clear,
    Score(u32),
    Cell(Cell, Color, Shape),
    Border,
    Overlay,
}

#[cfg(test)]
impl Recorder {
    /// Return the calls made since the last `clear_frame()`
    pub(crate) fn last_frame(&self) -> &[Draw] {
        let start = self
            .calls
            .iter()
            .rposition(|&d| d == Draw::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }
}

#[cfg(test)]
impl Renderer for Recorder {
    fn clear_frame(&mut self) {
        self.calls.push(Draw::Clear);
    }

    fn draw_score(&mut self, score: u32) {
        self.calls.push(Draw::Score(score));
    }

    fn draw_cell(&mut self, cell: Cell, color: Color, shape: Shape) {
        self.calls.push(Draw::Cell(cell, color, shape));
    }

    fn draw_border(&mut self) {
        self.calls.push(Draw::Border);
    }

    fn draw_terminal_overlay(&mut self) {
        self.calls.push(Draw::Overlay);
    }
}
