use std::io::Write;

use anyhow::{Context, Result};
use tilt_2048_core::Coordinate;
use tilt_2048_rendering::{Color, RenderingBackend, Scene};

const CELL_WIDTH: usize = 6;

/// Draws scenes as a text grid, optionally painted with ANSI truecolor.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    colored: bool,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn separator(&self, columns: u32) -> String {
        let segment = "-".repeat(CELL_WIDTH);
        let mut line = String::from("+");
        for _ in 0..columns {
            line.push_str(&segment);
            line.push('+');
        }
        line
    }

    fn cell(&self, value: u32, fill: Color) -> String {
        let label = if value == 0 {
            String::from(".")
        } else {
            value.to_string()
        };
        let text = format!("{label:^width$}", width = CELL_WIDTH);
        if !self.colored {
            return text;
        }
        let [red, green, blue] = fill.to_rgb_u8();
        format!("\x1b[30;48;2;{red};{green};{blue}m{text}\x1b[0m")
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let separator = self.separator(scene.columns);
        let mut frame = String::new();
        frame.push_str(&format!("score: {}  moves: {}", scene.score, scene.moves));
        if scene.paused {
            frame.push_str("  [paused]");
        }
        frame.push('\n');
        frame.push_str(&separator);
        frame.push('\n');

        for y in 0..scene.rows {
            frame.push('|');
            for x in 0..scene.columns {
                let cell = Coordinate::new(
                    i32::try_from(x).unwrap_or(i32::MAX),
                    i32::try_from(y).unwrap_or(i32::MAX),
                );
                let (value, fill) = scene
                    .tile_at(cell)
                    .map_or((0, scene.background), |tile| (tile.value, tile.color));
                frame.push_str(&self.cell(value, fill));
                frame.push('|');
            }
            frame.push('\n');
            frame.push_str(&separator);
            frame.push('\n');
        }

        self.out
            .write_all(frame.as_bytes())
            .context("failed to draw the board")?;
        self.out.flush().context("failed to flush the board")
    }

    fn announce(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{message}").context("failed to write message")
    }
}
