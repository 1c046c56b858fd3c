//! Board renderer
//!
//! [`render`] turns a position, an orientation and an optional highlight into
//! a [`Frame`]: a flat list of draw commands in painting order. There is no
//! diffing; each frame describes the whole board.
//!
//! Painting order:
//! 1. 64 tiles in the theme's light/dark colors
//! 2. highlight tiles for the from/to squares
//! 3. one sprite per occupied square

use super::layout::{CanvasLayout, Orientation, Rect};
use super::theme::{BoardTheme, Rgba};
use crate::game::BoardController;
use shakmaty::{Board, Color, Role, Square};

/// Meaning of a highlighted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightTone {
    /// Last move or a suggested move
    Default,
    /// Trainer feedback for a right answer
    Correct,
    /// Trainer feedback for a wrong answer
    Incorrect,
}

/// Origin and destination squares to recolor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub from: Square,
    pub to: Square,
    pub tone: HighlightTone,
}

/// Image for one piece kind, e.g. `wp` for a white pawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSprite {
    pub color: Color,
    pub role: Role,
}

impl PieceSprite {
    pub fn key(&self) -> String {
        format!("{}{}", self.color.char(), self.role.char())
    }

    /// Asset path of the image, relative to the asset root
    pub fn asset_path(&self) -> String {
        format!("pieces/{}.png", self.key())
    }

    /// All twelve sprites, black pieces first
    pub fn all() -> impl Iterator<Item = PieceSprite> {
        [Color::Black, Color::White].into_iter().flat_map(|color| {
            Role::ALL
                .into_iter()
                .map(move |role| PieceSprite { color, role })
        })
    }
}

/// One primitive on the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: Rgba },
    Sprite { rect: Rect, sprite: PieceSprite },
}

/// Everything needed to paint the board once
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub layout: CanvasLayout,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn sprites(&self) -> impl Iterator<Item = (&Rect, &PieceSprite)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Sprite { rect, sprite } => Some((rect, sprite)),
            DrawCommand::Fill { .. } => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &Rgba)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Fill { rect, color } => Some((rect, color)),
            DrawCommand::Sprite { .. } => None,
        })
    }
}

/// Inputs of the renderer
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub orientation: Orientation,
    pub highlight: Option<Highlight>,
}

impl<'a> BoardView<'a> {
    pub fn of(controller: &'a BoardController) -> Self {
        Self {
            board: controller.board(),
            orientation: controller.orientation(),
            highlight: controller.highlight(),
        }
    }

    /// Drop plain last-move highlights, keep trainer feedback
    pub fn without_last_move(mut self) -> Self {
        if matches!(self.highlight, Some(h) if h.tone == HighlightTone::Default) {
            self.highlight = None;
        }
        self
    }
}

/// Paint the whole board
pub fn render(view: &BoardView<'_>, theme: BoardTheme, layout: CanvasLayout) -> Frame {
    let (light, dark) = theme.colors();
    let mut commands = Vec::with_capacity(64 + 2 + 32);

    for row in 0..8 {
        for col in 0..8 {
            let square = view.orientation.square_at(col, row);
            let color = if is_dark(square) { dark } else { light };
            commands.push(DrawCommand::Fill {
                rect: layout.tile_rect(col, row),
                color,
            });
        }
    }

    if let Some(highlight) = view.highlight {
        for square in [highlight.from, highlight.to] {
            commands.push(DrawCommand::Fill {
                rect: layout.square_rect(square, view.orientation),
                color: highlight.tone.color(),
            });
        }
    }

    for square in Square::ALL {
        if let Some(piece) = view.board.piece_at(square) {
            commands.push(DrawCommand::Sprite {
                rect: layout.square_rect(square, view.orientation),
                sprite: PieceSprite {
                    color: piece.color,
                    role: piece.role,
                },
            });
        }
    }

    Frame { layout, commands }
}

fn is_dark(square: Square) -> bool {
    (u32::from(square.file()) + u32::from(square.rank())) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::theme::{HIGHLIGHT_CORRECT, HIGHLIGHT_DEFAULT};

    fn start_board() -> Board {
        Board::default()
    }

    fn view(board: &Board, orientation: Orientation) -> BoardView<'_> {
        BoardView {
            board,
            orientation,
            highlight: None,
        }
    }

    #[test]
    fn test_start_position_paints_tiles_then_pieces() {
        let board = start_board();
        let frame = render(
            &view(&board, Orientation::WhiteBottom),
            BoardTheme::Walnut,
            CanvasLayout::default(),
        );
        assert_eq!(frame.fills().count(), 64);
        assert_eq!(frame.sprites().count(), 32);
        assert!(matches!(frame.commands[0], DrawCommand::Fill { .. }));
        assert!(matches!(frame.commands[64], DrawCommand::Sprite { .. }));
    }

    #[test]
    fn test_a1_is_dark_in_both_orientations() {
        let board = start_board();
        let layout = CanvasLayout::new(800.0, 1.0);
        let (_, dark) = BoardTheme::Walnut.colors();

        for orientation in [Orientation::WhiteBottom, Orientation::BlackBottom] {
            let frame = render(&view(&board, orientation), BoardTheme::Walnut, layout);
            let a1 = layout.square_rect(Square::A1, orientation);
            let (_, color) = frame.fills().find(|(rect, _)| **rect == a1).unwrap();
            assert_eq!(*color, dark);
        }
    }

    #[test]
    fn test_flip_mirrors_sprites() {
        let board = start_board();
        let layout = CanvasLayout::new(800.0, 1.0);
        let white_king = PieceSprite {
            color: Color::White,
            role: Role::King,
        };

        let normal = render(&view(&board, Orientation::WhiteBottom), BoardTheme::Walnut, layout);
        let flipped = render(&view(&board, Orientation::BlackBottom), BoardTheme::Walnut, layout);

        let (normal_rect, _) = normal.sprites().find(|(_, s)| **s == white_king).unwrap();
        let (flipped_rect, _) = flipped.sprites().find(|(_, s)| **s == white_king).unwrap();

        assert_eq!((normal_rect.x, normal_rect.y), (400.0, 700.0));
        assert_eq!((flipped_rect.x, flipped_rect.y), (300.0, 0.0));
    }

    #[test]
    fn test_highlight_painted_between_tiles_and_pieces() {
        let board = start_board();
        let mut v = view(&board, Orientation::WhiteBottom);
        v.highlight = Some(Highlight {
            from: Square::E2,
            to: Square::E4,
            tone: HighlightTone::Correct,
        });

        let frame = render(&v, BoardTheme::Walnut, CanvasLayout::default());
        assert_eq!(
            frame.commands[64],
            DrawCommand::Fill {
                rect: CanvasLayout::default().square_rect(Square::E2, Orientation::WhiteBottom),
                color: HIGHLIGHT_CORRECT,
            }
        );
        assert!(matches!(frame.commands[65], DrawCommand::Fill { .. }));
        assert!(matches!(frame.commands[66], DrawCommand::Sprite { .. }));
    }

    #[test]
    fn test_without_last_move_keeps_feedback() {
        let board = start_board();
        let mut v = view(&board, Orientation::WhiteBottom);
        v.highlight = Some(Highlight {
            from: Square::E2,
            to: Square::E4,
            tone: HighlightTone::Default,
        });
        assert!(v.without_last_move().highlight.is_none());

        v.highlight = Some(Highlight {
            from: Square::E2,
            to: Square::E4,
            tone: HighlightTone::Incorrect,
        });
        assert!(v.without_last_move().highlight.is_some());
        assert_eq!(HighlightTone::Default.color(), HIGHLIGHT_DEFAULT);
    }

    #[test]
    fn test_sprite_keys() {
        let keys: Vec<String> = PieceSprite::all().map(|s| s.key()).collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0], "bp");
        assert_eq!(keys[11], "wk");
        assert_eq!(
            PieceSprite {
                color: Color::White,
                role: Role::Knight
            }
            .asset_path(),
            "pieces/wn.png"
        );
    }
}
