//! UI utilities shared by the components.

use ratatui::layout::{Position, Rect};

/// Returns the index of the item rect containing `(x, y)`.
///
/// The container is checked first so clicks elsewhere on screen skip the
/// per-item scan. Empty item rects never match.
pub fn find_target_index_by_mouse_position(container: &Rect, items: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    items.iter().position(|item| item.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_item_under_cursor() {
        let container = Rect::new(0, 0, 30, 1);
        let items = [Rect::new(0, 0, 9, 1), Rect::new(10, 0, 10, 1), Rect::new(30, 0, 0, 1)];
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 12, 0), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 9, 0), None);
        assert_eq!(find_target_index_by_mouse_position(&container, &items, 3, 4), None);
    }
}
