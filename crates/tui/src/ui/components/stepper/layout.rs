//! Geometry of a rendered stepper.
//!
//! The stepper lays out its own labels, so the rect of every label is known
//! as soon as the container area is. [`StepperLayout`] keeps those rects by
//! step index; the indicator geometry is measured from them relative to the
//! label strip.

use ratatui::layout::{Constraint, Layout, Rect};
use stepline_types::{Direction, Step};
use unicode_width::UnicodeWidthStr;

use crate::ui::utils::find_target_index_by_mouse_position;

/// Columns between two labels in horizontal mode.
const LABEL_GAP: u16 = 1;

/// Position and size of the indicator along the stepper's axis, relative to
/// the start of the label strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorGeometry {
    pub offset: u16,
    pub size: u16,
}

impl IndicatorGeometry {
    /// Linear interpolation toward `target`, rounded to whole cells.
    pub fn lerp(self, target: IndicatorGeometry, t: f32) -> IndicatorGeometry {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u16, to: u16| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u16;
        IndicatorGeometry {
            offset: mix(self.offset, target.offset),
            size: mix(self.size, target.size),
        }
    }
}

/// Text rendered for the label at `position`.
pub fn label_text(position: usize, label: &str) -> String {
    format!(" {}. {} ", position + 1, label)
}

fn label_width(position: usize, label: &str) -> u16 {
    u16::try_from(label_text(position, label).width()).unwrap_or(u16::MAX)
}

/// Areas of a stepper computed for one container rect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperLayout {
    pub direction: Direction,
    /// Container the layout was computed for.
    pub area: Rect,
    /// Strip holding the labels; indicator offsets are relative to it.
    pub labels: Rect,
    /// Strip the indicator slides along.
    pub track: Rect,
    /// Area of the sliding content panels.
    pub panel: Rect,
    /// Label rect per step index. Labels that do not fit get an empty rect.
    pub items: Vec<Rect>,
}

impl StepperLayout {
    pub fn compute(area: Rect, steps: &[Step], direction: Direction) -> Self {
        match direction {
            Direction::Horizontal => Self::horizontal(area, steps),
            Direction::Vertical => Self::vertical(area, steps),
        }
    }

    fn horizontal(area: Rect, steps: &[Step]) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(1), // labels
            Constraint::Length(1), // indicator
            Constraint::Min(0),    // panel
        ])
        .split(area);
        let labels = rows[0];
        let right = labels.right();

        let mut cursor = labels.x;
        let items = steps
            .iter()
            .enumerate()
            .map(|(position, step)| {
                if cursor >= right {
                    return Rect::new(right, labels.y, 0, labels.height);
                }
                let width = label_width(position, &step.label).min(right - cursor);
                let rect = Rect::new(cursor, labels.y, width, labels.height);
                cursor = cursor.saturating_add(width).saturating_add(LABEL_GAP);
                rect
            })
            .collect();

        Self {
            direction: Direction::Horizontal,
            area,
            labels,
            track: rows[1],
            panel: rows[2],
            items,
        }
    }

    fn vertical(area: Rect, steps: &[Step]) -> Self {
        let widest = steps
            .iter()
            .enumerate()
            .map(|(position, step)| label_width(position, &step.label))
            .max()
            .unwrap_or(0);
        let columns = Layout::horizontal([
            Constraint::Length(widest.min(area.width / 2)), // labels
            Constraint::Length(1),                          // indicator
            Constraint::Length(1),                          // gutter
            Constraint::Min(0),                             // panel
        ])
        .split(area);
        let labels = columns[0];
        let bottom = labels.bottom();

        let items = (0..steps.len())
            .map(|position| {
                let y = labels.y.saturating_add(u16::try_from(position).unwrap_or(u16::MAX));
                if y >= bottom {
                    Rect::new(labels.x, bottom, labels.width, 0)
                } else {
                    Rect::new(labels.x, y, labels.width, 1)
                }
            })
            .collect();

        Self {
            direction: Direction::Vertical,
            area,
            labels,
            track: columns[1],
            panel: columns[3],
            items,
        }
    }

    /// Indicator geometry for the label at `index`; `None` before the first
    /// layout or for an unknown index.
    pub fn measure(&self, index: usize) -> Option<IndicatorGeometry> {
        if self.area.is_empty() {
            return None;
        }
        let item = self.items.get(index)?;
        Some(match self.direction {
            Direction::Horizontal => IndicatorGeometry {
                offset: item.x.saturating_sub(self.labels.x),
                size: item.width,
            },
            Direction::Vertical => IndicatorGeometry {
                offset: item.y.saturating_sub(self.labels.y),
                size: item.height,
            },
        })
    }

    /// Index of the label under the given terminal cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        find_target_index_by_mouse_position(&self.labels, &self.items, column, row)
    }

    /// Rect covered by the indicator for `geometry`, clipped to the track.
    pub fn indicator_rect(&self, geometry: IndicatorGeometry) -> Rect {
        let rect = match self.direction {
            Direction::Horizontal => Rect::new(
                self.track.x.saturating_add(geometry.offset),
                self.track.y,
                geometry.size,
                self.track.height,
            ),
            Direction::Vertical => Rect::new(
                self.track.x,
                self.track.y.saturating_add(geometry.offset),
                self.track.width,
                geometry.size,
            ),
        };
        rect.intersection(self.track)
    }

    /// Visible part of a panel shifted by `fraction` of the panel extent along
    /// the axis, plus the `(rows, columns)` scroll that keeps its content
    /// anchored. `None` once the panel is entirely off-screen.
    pub fn slide_rect(&self, fraction: f32) -> Option<(Rect, (u16, u16))> {
        let panel = self.panel;
        let extent = match self.direction {
            Direction::Horizontal => panel.width,
            Direction::Vertical => panel.height,
        };
        let shift = (fraction * f32::from(extent)).round() as i32;
        let distance = u16::try_from(shift.unsigned_abs()).unwrap_or(u16::MAX);
        if extent == 0 || distance >= extent {
            return None;
        }

        let visible = extent - distance;
        let (lead, scroll) = if shift >= 0 { (distance, 0) } else { (0, distance) };
        Some(match self.direction {
            Direction::Horizontal => (Rect::new(panel.x + lead, panel.y, visible, panel.height), (0, scroll)),
            Direction::Vertical => (Rect::new(panel.x, panel.y + lead, panel.width, visible), (scroll, 0)),
        })
    }
}
