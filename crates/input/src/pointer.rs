//! Mouse mapping: terminal cells to board coordinates.

use crate::types::{Coord, InputEvent};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Where the board is drawn on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardViewport {
    /// Leftmost column of the board
    pub left: u16,
    /// Topmost row of the board
    pub top: u16,
    /// Terminal columns per tile
    pub cell_width: u16,
    /// Terminal rows per tile
    pub cell_height: u16,
    /// Tiles per board side
    pub side: u8,
}

impl BoardViewport {
    pub fn new(left: u16, top: u16, cell_width: u16, cell_height: u16, side: u8) -> Self {
        Self {
            left,
            top,
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            side,
        }
    }

    /// Board cell under a terminal position, `None` outside the board or
    /// when a cell dimension is zero.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Coord> {
        let dx = column.checked_sub(self.left)?;
        let dy = row.checked_sub(self.top)?;
        let col = dx.checked_div(self.cell_width)?;
        let row = dy.checked_div(self.cell_height)?;
        let side = u16::from(self.side);
        if col >= side || row >= side {
            return None;
        }
        Some(Coord::new(row as u8, col as u8))
    }
}

/// Map a mouse event to pointer input. Only the left button drives selection.
pub fn map_mouse_event(event: MouseEvent, viewport: &BoardViewport) -> Option<InputEvent> {
    let coord = viewport.hit_test(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(coord)),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerMove {
            coord,
            x: f32::from(event.column),
            y: f32::from(event.row),
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_hit_test() {
        let viewport = BoardViewport::new(10, 2, 4, 2, 6);
        assert_eq!(viewport.hit_test(10, 2), Some(Coord::new(0, 0)));
        assert_eq!(viewport.hit_test(13, 3), Some(Coord::new(0, 0)));
        assert_eq!(viewport.hit_test(14, 4), Some(Coord::new(1, 1)));
        assert_eq!(viewport.hit_test(33, 13), Some(Coord::new(5, 5)));
        assert_eq!(viewport.hit_test(34, 13), None);
        assert_eq!(viewport.hit_test(9, 5), None);
        assert_eq!(viewport.hit_test(12, 1), None);
    }

    #[test]
    fn test_zero_sized_cells_hit_nothing() {
        let viewport = BoardViewport {
            left: 0,
            top: 0,
            cell_width: 0,
            cell_height: 1,
            side: 4,
        };
        assert_eq!(viewport.hit_test(3, 0), None);

        let flat = BoardViewport {
            cell_width: 2,
            cell_height: 0,
            ..viewport
        };
        assert_eq!(flat.hit_test(1, 1), None);
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 0), &viewport),
            Some(InputEvent::PointerDown(None))
        );
    }

    #[test]
    fn test_mouse_buttons() {
        let viewport = BoardViewport::new(0, 0, 2, 1, 4);
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2), &viewport),
            Some(InputEvent::PointerDown(Some(Coord::new(2, 1))))
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 2), &viewport),
            Some(InputEvent::PointerMove {
                coord: None,
                x: 50.0,
                y: 2.0
            })
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &viewport),
            Some(InputEvent::PointerUp)
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), &viewport),
            None
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Moved, 0, 0), &viewport),
            None
        );
    }

    #[test]
    fn test_press_outside_board_maps_to_none() {
        let viewport = BoardViewport::new(5, 5, 2, 1, 4);
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), &viewport),
            Some(InputEvent::PointerDown(None))
        );
    }
}
