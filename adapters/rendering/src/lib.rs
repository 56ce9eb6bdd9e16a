#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tiger Run adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use tiger_run_core::{
    CellCoord, CellKind, Direction, DollarId, DollarState, GamePhase, GameSnapshot, Scoreboard,
    TigerSnapshot,
};

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

    /// Returns the same color with its alpha scaled by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        Self {
            alpha: self.alpha * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to draw every element of a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Impassable cells.
    pub wall: Color,
    /// Walkable cells.
    pub path: Color,
    /// Bank cells.
    pub bank: Color,
    /// Dollar tokens.
    pub dollar: Color,
    /// The player's tiger.
    pub tiger: Color,
    /// The pursuing monkey.
    pub monkey: Color,
    /// Score line and announcements.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Color::from_rgb_u8(38, 70, 34),
            path: Color::from_rgb_u8(214, 196, 150),
            bank: Color::from_rgb_u8(70, 110, 180),
            dollar: Color::from_rgb_u8(60, 160, 70),
            tiger: Color::from_rgb_u8(235, 130, 30),
            monkey: Color::from_rgb_u8(120, 72, 40),
            text: Color::from_rgb_u8(250, 250, 250),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction pressed on this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the adapter detected a start or restart request on this frame.
    pub start: bool,
}

/// Describes the square cell grid that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_length: f32,
}

impl GridPresentation {
    /// Default side length of a cell in world units.
    pub const DEFAULT_CELL_LENGTH: f32 = 48.0;

    /// Number of cell layers reserved above the grid for the score panel.
    pub const HUD_CELL_LAYERS: u32 = 2;

    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
    ) -> std::result::Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Calculates the total height including the score panel above the grid.
    #[must_use]
    pub fn height_with_hud(&self) -> f32 {
        self.height() + Self::HUD_CELL_LAYERS as f32 * self.cell_length
    }

    /// Top-left corner of `cell` in world units, relative to the grid origin.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// Center of `cell` in world units, relative to the grid origin.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Unit vector pointing in `direction`, using screen coordinates where rows grow downwards.
#[must_use]
pub fn facing_vector(direction: Direction) -> Vec2 {
    let (column, row) = direction.offset();
    Vec2::new(column as f32, row as f32)
}

/// Dollar drawn within the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneDollar {
    /// Identifier allocated to the dollar by the world.
    pub id: DollarId,
    /// Cell the dollar occupies.
    pub cell: CellCoord,
    /// Fraction of the pickup fade already played; `0.0` for dollars still in play.
    pub fade: f32,
}

/// Scene description combining the maze, its inhabitants and the score line.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Cell grid that composes the play area.
    pub grid: GridPresentation,
    /// Terrain in row-major order.
    pub cells: Vec<CellKind>,
    /// Tiger state.
    pub tiger: TigerSnapshot,
    /// Monkey cell, if the maze has one.
    pub monkey: Option<CellCoord>,
    /// Dollars that are still visible.
    pub dollars: Vec<SceneDollar>,
    /// Score totals shown in the score line.
    pub scores: Scoreboard,
    /// Current session phase.
    pub phase: GamePhase,
    /// Announcement text currently shown, if any.
    pub announcement: Option<String>,
}

impl Scene {
    /// Builds a scene from a world snapshot.
    ///
    /// `fade_progress` reports how far the pickup fade of a collecting dollar
    /// has played. Collected dollars are left out of the scene.
    pub fn from_snapshot<F>(
        snapshot: &GameSnapshot,
        cell_length: f32,
        fade_progress: F,
        announcement: Option<String>,
    ) -> std::result::Result<Self, RenderingError>
    where
        F: Fn(DollarId) -> Option<f32>,
    {
        let grid = GridPresentation::new(snapshot.columns, snapshot.rows, cell_length)?;
        let expected = usize::try_from(u64::from(snapshot.columns) * u64::from(snapshot.rows))
            .unwrap_or(usize::MAX);
        if snapshot.cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                expected,
                found: snapshot.cells.len(),
            });
        }

        let dollars = snapshot
            .dollars
            .iter()
            .filter_map(|dollar| {
                let fade = match dollar.state {
                    DollarState::Active => 0.0,
                    DollarState::Collecting => fade_progress(dollar.id).unwrap_or(0.0),
                    DollarState::Collected => return None,
                };
                Some(SceneDollar {
                    id: dollar.id,
                    cell: dollar.cell,
                    fade,
                })
            })
            .collect();

        Ok(Self {
            grid,
            cells: snapshot.cells.clone(),
            tiger: snapshot.tiger,
            monkey: snapshot.monkey,
            dollars,
            scores: snapshot.scores,
            phase: snapshot.phase,
            announcement,
        })
    }

    /// Terrain at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn cell_kind(&self, cell: CellCoord) -> Option<CellKind> {
        if cell.column() >= self.grid.columns || cell.row() >= self.grid.rows {
            return None;
        }
        let index = usize::try_from(cell.row() * self.grid.columns + cell.column()).ok()?;
        self.cells.get(index).copied()
    }

    /// Every cell of the grid paired with its terrain, in row-major order.
    pub fn terrain(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.grid.columns.max(1);
        (0u32..)
            .zip(self.cells.iter().copied())
            .map(move |(index, kind)| (CellCoord::new(index % columns, index / columns), kind))
    }

    /// Score line shown above the grid.
    #[must_use]
    pub fn hud_line(&self) -> String {
        let Scoreboard {
            carried,
            banked,
            monkey,
        } = self.scores;
        format!("Carrying ${carried}   Bank ${banked}   Monkey ${monkey}")
    }
}

/// Renders a snapshot as plain text, one line per maze row.
///
/// Walls, paths and banks use the layout symbols `#`, `.` and `B`. Dollars in
/// play are drawn as `D`, dollars being collected as `d`, the monkey as `M`
/// and the tiger as `T`.
#[must_use]
pub fn text_frame(snapshot: &GameSnapshot) -> String {
    let mut frame = String::new();
    for row in 0..snapshot.rows {
        for column in 0..snapshot.columns {
            let cell = CellCoord::new(column, row);
            let symbol = if snapshot.tiger.cell == cell {
                'T'
            } else if snapshot.monkey == Some(cell) {
                'M'
            } else if let Some(dollar) = snapshot.visible_dollar_at(cell) {
                if dollar.state == DollarState::Active {
                    'D'
                } else {
                    'd'
                }
            } else {
                match snapshot.cell_at(cell) {
                    Some(CellKind::Wall) | None => '#',
                    Some(CellKind::Path) => '.',
                    Some(CellKind::Bank) => 'B',
                }
            };
            frame.push(symbol);
        }
        frame.push('\n');
    }
    frame
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Colors used to draw the scene.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Tiger Run scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may replace the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell length must be a positive finite number.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
    /// The snapshot's terrain does not cover its declared dimensions.
    CellCountMismatch {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells present in the snapshot.
        found: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell length must be positive (received {cell_length})")
            }
            Self::CellCountMismatch { expected, found } => {
                write!(f, "snapshot holds {found} cells but its dimensions need {expected}")
            }
        }
    }
}

impl Error for RenderingError {}
