#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tilt 2048 adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use thiserror::Error;
use tilt_2048_core::Coordinate;
use tilt_2048_world::{query, World, WorldError};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from hue (degrees), saturation and lightness.
    ///
    /// Saturation and lightness are fractions in `0.0..=1.0`; the hue wraps.
    #[must_use]
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);
        let sector = hue.rem_euclid(360.0) / 60.0;

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let offset = lightness - chroma / 2.0;

        let (red, green, blue) = match sector as u32 {
            0 => (chroma, secondary, 0.0),
            1 => (secondary, chroma, 0.0),
            2 => (0.0, chroma, secondary),
            3 => (0.0, secondary, chroma),
            4 => (secondary, 0.0, chroma),
            _ => (chroma, 0.0, secondary),
        };

        Self::new(red + offset, green + offset, blue + offset, 1.0)
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Channels quantised to bytes, alpha dropped.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            quantise_channel(self.red),
            quantise_channel(self.green),
            quantise_channel(self.blue),
        ]
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn quantise_channel(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Maps tile values to display colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    empty: Color,
    border: Color,
    ramp: Vec<Color>,
}

impl Palette {
    /// Number of distinct colors assigned to non-empty values.
    pub const RAMP_LENGTH: usize = 20;

    /// Hue distance between consecutive ramp entries, in degrees.
    pub const HUE_STEP: f32 = 18.0;

    /// Creates a palette from explicit colors. `ramp[i]` paints value `2^(i+1)`.
    ///
    /// An empty ramp paints every non-empty value with the border color.
    #[must_use]
    pub fn new(empty: Color, border: Color, ramp: Vec<Color>) -> Self {
        Self {
            empty,
            border,
            ramp,
        }
    }

    /// Color of a cell holding `value`.
    ///
    /// Values beyond the ramp reuse its last entry.
    #[must_use]
    pub fn color_for(&self, value: u32) -> Color {
        if value == 0 {
            return self.empty;
        }
        let index = usize::try_from(value.ilog2().saturating_sub(1)).unwrap_or(usize::MAX);
        self.ramp
            .get(index)
            .or_else(|| self.ramp.last())
            .copied()
            .unwrap_or(self.border)
    }

    /// Color used for the board frame and cell separators.
    #[must_use]
    pub const fn border(&self) -> Color {
        self.border
    }
}

impl Default for Palette {
    fn default() -> Self {
        let ramp = (0..Self::RAMP_LENGTH)
            .map(|index| Color::from_hsl(index as f32 * Self::HUE_STEP, 0.8, 0.5))
            .collect();
        Self::new(
            Color::from_rgb_u8(0xD6, 0xD2, 0xD2),
            Color::from_rgb_u8(0xDD, 0xDD, 0xDD),
            ramp,
        )
    }
}

/// Presentation of a single occupied cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Slot the tile occupies once its animation settles.
    pub cell: Coordinate,
    /// Value written on the tile.
    pub value: u32,
    /// Current position in cell units.
    pub position: Vec2,
    /// Current scale factor.
    pub scale: f32,
    /// Fill color.
    pub color: Color,
}

/// Scene description of the board at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Fill color of empty cells.
    pub background: Color,
    /// Color of the board frame.
    pub border: Color,
    /// Occupied cells, sampled at the world clock.
    pub tiles: Vec<TilePresentation>,
    /// Whether the session is paused.
    pub paused: bool,
    /// Current score.
    pub score: u64,
    /// Accepted tilts in the current game.
    pub moves: u32,
}

impl Scene {
    /// Lightening applied to tiles while the session is paused.
    pub const PAUSED_FADE: f32 = 0.6;

    /// Captures the current state of `world`.
    pub fn capture(world: &World, palette: &Palette) -> Result<Self, RenderingError> {
        let (columns, rows) = query::dimensions(world);
        let paused = query::is_paused(world);
        let tiles = query::tile_snapshots(world)?
            .into_iter()
            .map(|snapshot| {
                let color = palette.color_for(snapshot.value);
                TilePresentation {
                    cell: snapshot.cell,
                    value: snapshot.value,
                    position: snapshot.position,
                    scale: snapshot.scale,
                    color: if paused {
                        color.lighten(Self::PAUSED_FADE)
                    } else {
                        color
                    },
                }
            })
            .collect();

        Ok(Self {
            columns,
            rows,
            background: palette.color_for(0),
            border: palette.border(),
            tiles,
            paused,
            score: query::score(world),
            moves: query::moves(world),
        })
    }

    /// Tile that settles into `cell`, if any.
    #[must_use]
    pub fn tile_at(&self, cell: Coordinate) -> Option<&TilePresentation> {
        self.tiles.iter().find(|tile| tile.cell == cell)
    }
}

/// Rendering backend capable of presenting Tilt 2048 scenes.
pub trait RenderingBackend {
    /// Draws `scene`, replacing whatever the backend showed before.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Shows a line of text outside the board.
    fn announce(&mut self, message: &str) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// The world could not describe one of its tiles.
    #[error("failed to sample the board: {0}")]
    World(#[from] WorldError),
}
