use ratatui::prelude::*;

/// Character grid the real-time games draw into before it is handed to
/// ratatui as a block of lines.
pub struct Canvas {
    width: usize,
    height: usize,
    background: Style,
    cells: Vec<Vec<(char, Style)>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Style) -> Self {
        Self {
            width,
            height,
            background,
            cells: vec![vec![(' ', background); width]; height],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = (' ', self.background);
            }
        }
    }

    /// Writes outside the grid are dropped.
    pub fn set(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y][x] = (ch, style);
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.cells.get(y).and_then(|row| row.get(x)).map(|(ch, _)| *ch)
    }

    pub fn text(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, ch, style);
        }
    }

    pub fn centered_text(&mut self, y: i32, text: &str, style: Style) {
        let len = text.chars().count() as i32;
        let (w, _) = self.size();
        self.text(w as i32 / 2 - len / 2, y, text, style);
    }

    /// Box outline using `|` for the sides and `-` for top and bottom.
    pub fn border(&mut self, style: Style) {
        let (w, h) = self.size();
        let (w, h) = (w as i32, h as i32);
        for y in 0..h {
            self.set(0, y, '|', style);
            self.set(w - 1, y, '|', style);
        }
        for x in 0..w {
            self.set(x, 0, '-', style);
            self.set(x, h - 1, '-', style);
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut canvas = Canvas::new(4, 3, Style::default());
        assert_eq!(canvas.size(), (4, 3));
        canvas.set(-1, 0, 'x', Style::default());
        canvas.set(4, 0, 'x', Style::default());
        canvas.set(0, 3, 'x', Style::default());
        canvas.set(3, 2, 'o', Style::default());
        assert_eq!(canvas.get(3, 2), Some('o'));
        let lines = canvas.into_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans.len(), 4);
    }

    #[test]
    fn border_and_text() {
        let mut canvas = Canvas::new(10, 4, Style::default());
        canvas.border(Style::default());
        canvas.centered_text(1, "hi", Style::default());
        assert_eq!(canvas.get(0, 1), Some('|'));
        assert_eq!(canvas.get(5, 0), Some('-'));
        assert_eq!(canvas.get(4, 1), Some('h'));
        assert_eq!(canvas.get(5, 1), Some('i'));
        canvas.clear();
        assert_eq!(canvas.get(0, 1), Some(' '));
    }
}
