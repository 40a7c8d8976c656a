//! Reusable page structures built from [`Canvas`] primitives.
//!
//! Every helper takes the current vertical position and returns the position just below what
//! it drew, so templates read top to bottom.

use crate::canvas::{rgb, Canvas, Color, Rect, BLACK, WHITE};

/// Background of even striped rows.
pub const STRIPE_LIGHT: Color = rgb(248, 249, 250);
/// Thin border around table rows and boxes.
pub const RULE: Color = rgb(230, 230, 230);
/// Dark slate used for most table headers.
pub const SLATE: Color = rgb(52, 73, 94);
/// Body text inside tables and summaries.
pub const INK: Color = rgb(52, 58, 64);
/// Section headings.
pub const HEADING: Color = rgb(70, 70, 70);
/// Field labels.
pub const LABEL: Color = rgb(50, 50, 50);
/// Secondary notes and footers.
pub const MUTED: Color = rgb(100, 100, 100);

/// Column layout for a header band followed by striped rows.
#[derive(Debug, Clone)]
pub struct Table {
    left: i32,
    right: i32,
    columns: Vec<i32>,
    header_height: i32,
    header_fill: Color,
    header_outline: Option<Color>,
    header_text: Color,
    header_size: f32,
    row_height: i32,
    stripes: [Color; 2],
    border: Option<Color>,
    text: Color,
    size: f32,
    column_sizes: Vec<Option<f32>>,
}

impl Table {
    /// Creates a table spanning `left..=right` whose first column starts at `text_x`.
    /// Each following column starts `widths[i]` pixels after the previous one.
    pub fn new(left: i32, right: i32, text_x: i32, widths: &[i32]) -> Self {
        let columns = widths
            .iter()
            .scan(text_x, |x, width| {
                let start = *x;
                *x += width;
                Some(start)
            })
            .collect::<Vec<_>>();

        Self {
            left,
            right,
            column_sizes: vec![None; columns.len()],
            columns,
            header_height: 40,
            header_fill: SLATE,
            header_outline: None,
            header_text: WHITE,
            header_size: 16.0,
            row_height: 45,
            stripes: [STRIPE_LIGHT, WHITE],
            border: Some(RULE),
            text: INK,
            size: 16.0,
        }
    }

    pub fn with_header(mut self, height: i32, fill: Color, text: Color) -> Self {
        self.header_height = height;
        self.header_fill = fill;
        self.header_text = text;
        self
    }

    pub fn with_header_outline(mut self, outline: Color) -> Self {
        self.header_outline = Some(outline);
        self
    }

    pub fn with_header_size(mut self, size: f32) -> Self {
        self.header_size = size;
        self
    }

    pub fn with_row_height(mut self, height: i32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_stripes(mut self, even: Color, odd: Color) -> Self {
        self.stripes = [even, odd];
        self
    }

    /// Border drawn around each row, or none.
    pub fn with_border(mut self, border: Option<Color>) -> Self {
        self.border = border;
        self
    }

    pub fn with_text(mut self, color: Color, size: f32) -> Self {
        self.text = color;
        self.size = size;
        self
    }

    /// Overrides the font size of one body column.
    pub fn with_column_size(mut self, column: usize, size: f32) -> Self {
        if let Some(slot) = self.column_sizes.get_mut(column) {
            *slot = Some(size);
        }
        self
    }

    /// Left edge of the text in `column`.
    pub fn column_x(&self, column: usize) -> i32 {
        self.columns.get(column).copied().unwrap_or(self.left)
    }

    pub fn draw_header(&self, canvas: &mut Canvas, y: i32, titles: &[&str]) -> i32 {
        let bottom = y + self.header_height;
        canvas.rect(
            Rect::new(self.left, y, self.right, bottom),
            Some(self.header_fill),
            Some(self.header_outline.unwrap_or(self.header_fill)),
            1,
        );
        let text_y = y + centered_offset(self.header_height, self.header_size);
        for (x, title) in self.columns.iter().zip(titles) {
            canvas.text(*x, text_y, title, self.header_size, self.header_text);
        }
        bottom
    }

    /// Draws row number `index` (which selects the stripe) and returns the next row's top.
    pub fn draw_row<S: AsRef<str>>(&self, canvas: &mut Canvas, y: i32, index: usize, cells: &[S]) -> i32 {
        let bottom = y + self.row_height;
        canvas.rect(
            Rect::new(self.left, y, self.right, bottom),
            Some(self.stripes[index % 2]),
            self.border,
            1,
        );
        for (column, (x, cell)) in self.columns.iter().zip(cells).enumerate() {
            let size = self.column_sizes[column].unwrap_or(self.size);
            let text_y = y + centered_offset(self.row_height, size);
            canvas.text(*x, text_y, cell.as_ref(), size, self.text);
        }
        bottom
    }

    pub fn draw_rows<S: AsRef<str>>(&self, canvas: &mut Canvas, mut y: i32, rows: &[Vec<S>]) -> i32 {
        for (index, cells) in rows.iter().enumerate() {
            y = self.draw_row(canvas, y, index, cells);
        }
        y
    }
}

fn centered_offset(height: i32, size: f32) -> i32 {
    ((height as f32 - size) / 2.0).round() as i32
}

/// Label/value rows at a fixed pitch, optionally on alternating background bands.
#[derive(Debug, Clone)]
pub struct FieldList {
    label_x: i32,
    value_x: i32,
    pitch: i32,
    size: f32,
    label_color: Color,
    value_color: Color,
    band: Option<(i32, i32, [Color; 2])>,
}

impl FieldList {
    pub fn new(label_x: i32, value_x: i32, pitch: i32) -> Self {
        Self {
            label_x,
            value_x,
            pitch,
            size: 16.0,
            label_color: LABEL,
            value_color: BLACK,
            band: None,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_colors(mut self, label: Color, value: Color) -> Self {
        self.label_color = label;
        self.value_color = value;
        self
    }

    /// Paints alternating 30-pixel bands from `left` to `right` behind each row.
    pub fn with_stripes(mut self, left: i32, right: i32, even: Color, odd: Color) -> Self {
        self.band = Some((left, right, [even, odd]));
        self
    }

    /// Draws the rows starting at `y`. Empty labels are skipped but still take a row.
    pub fn draw<L, V>(&self, canvas: &mut Canvas, mut y: i32, fields: &[(L, V)]) -> i32
    where
        L: AsRef<str>,
        V: AsRef<str>,
    {
        for (index, (label, value)) in fields.iter().enumerate() {
            if let Some((left, right, stripes)) = self.band {
                canvas.fill(Rect::new(left, y - 5, right, y + 25), stripes[index % 2]);
            }
            if !label.as_ref().is_empty() {
                canvas.text(self.label_x, y, label.as_ref(), self.size, self.label_color);
            }
            canvas.text(self.value_x, y, value.as_ref(), self.size, self.value_color);
            y += self.pitch;
        }
        y
    }
}

/// Label/value rows on alternating 30-pixel bands spanning `band`.
pub fn striped_fields<L, V>(
    canvas: &mut Canvas,
    band: (i32, i32),
    columns: (i32, i32),
    y: i32,
    stripes: [Color; 2],
    fields: &[(L, V)],
) -> i32
where
    L: AsRef<str>,
    V: AsRef<str>,
{
    FieldList::new(columns.0, columns.1, 30)
        .with_stripes(band.0, band.1, stripes[0], stripes[1])
        .draw(canvas, y, fields)
}

/// Single-column lines on alternating 30-pixel bands spanning `band`.
pub fn striped_lines<S: AsRef<str>>(
    canvas: &mut Canvas,
    band: (i32, i32),
    x: i32,
    y: i32,
    stripes: [Color; 2],
    lines: &[S],
) -> i32 {
    let mut y = y;
    for (index, line) in lines.iter().enumerate() {
        canvas.fill(Rect::new(band.0, y - 5, band.1, y + 25), stripes[index % 2]);
        canvas.text(x, y, line.as_ref(), 16.0, LABEL);
        y += 30;
    }
    y
}

/// Label/value pairs at two x positions, as used in totals boxes.
pub fn summary_block<L, V>(
    canvas: &mut Canvas,
    (label_x, value_x): (i32, i32),
    y: i32,
    pitch: i32,
    size: f32,
    color: Color,
    pairs: &[(L, V)],
) -> i32
where
    L: AsRef<str>,
    V: AsRef<str>,
{
    FieldList::new(label_x, value_x, pitch)
        .with_size(size)
        .with_colors(color, color)
        .draw(canvas, y, pairs)
}

/// Lines of text at a fixed pitch.
pub fn bullet_list<S: AsRef<str>>(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    pitch: i32,
    size: f32,
    color: Color,
    lines: &[S],
) -> i32 {
    let mut y = y;
    for line in lines {
        canvas.text(x, y, line.as_ref(), size, color);
        y += pitch;
    }
    y
}

/// Draws `text` horizontally centered on the page and returns its left edge.
pub fn centered_title(canvas: &mut Canvas, y: i32, text: &str, size: f32, color: Color) -> i32 {
    let width = canvas.text_width(text, size);
    let x = ((canvas.width() as f32 - width) / 2.0).round() as i32;
    canvas.text(x, y, text, size, color);
    x
}

/// Draws `text` so that it ends `margin` pixels from the right edge and returns its left edge.
pub fn right_aligned(canvas: &mut Canvas, margin: i32, y: i32, text: &str, size: f32, color: Color) -> i32 {
    let width = canvas.text_width(text, size).ceil() as i32;
    let x = (canvas.width() as i32 - margin - width).max(0);
    canvas.text(x, y, text, size, color);
    x
}
