// src/editor/terrain.rs

use crate::editor::brush::{group_brushes, BrushGroup};
use crate::editor::commands::{Action, BrushSize, ClickTarget};
use crate::map::TerrainLabels;
use crate::profile::{Profile, ScreenLayout};
use log::debug;
use std::collections::BTreeMap;

/// A viewport-local square with the terrain it should receive.
#[derive(Debug, Clone, Copy)]
pub struct TerrainSquare<'a> {
    pub x: i64,
    pub y: i64,
    pub labels: &'a TerrainLabels,
}

type GroupKey<'a> = (&'a str, &'a str, Option<&'a str>, Option<&'a str>);

/// Menus whose entries paint area terrain and accept the larger brushes.
fn accepts_large_brushes(menu: &str) -> bool {
    menu.starts_with("Ground") || menu.starts_with("Brush")
}

/// Clicks that apply terrain labels to one page. Squares are grouped by their
/// full label set; a group is skipped when its menu or first category is not
/// in the profile.
pub fn paint_terrain(squares: &[TerrainSquare<'_>], profile: &Profile, layout: &ScreenLayout) -> Vec<Action> {
    let mut groups: BTreeMap<GroupKey<'_>, Vec<usize>> = BTreeMap::new();
    for (idx, square) in squares.iter().enumerate() {
        let labels = square.labels;
        let (Some(menu), Some(cat1)) = (labels.menu.as_deref(), labels.cat1.as_deref()) else {
            continue;
        };
        groups
            .entry((menu, cat1, labels.cat2.as_deref(), labels.direction.as_deref()))
            .or_default()
            .push(idx);
    }

    let mut actions = Vec::new();
    for ((menu, cat1, cat2, direction), members) in groups {
        let (Some(menu_at), Some(cat1_at)) = (profile.lookup(menu), profile.lookup(cat1)) else {
            debug!("Profile '{}' has no entry for '{}' / '{}'; skipping {} squares", profile.name, menu, cat1, members.len());
            continue;
        };
        actions.push(Action::click(menu_at, ClickTarget::Menu { label: menu.to_string() }));
        actions.push(Action::click(cat1_at, ClickTarget::Menu { label: cat1.to_string() }));
        for label in [cat2, direction].into_iter().flatten() {
            if let Some(at) = profile.lookup(label) {
                actions.push(Action::click(at, ClickTarget::Menu { label: label.to_string() }));
            }
        }

        let brush_groups = if accepts_large_brushes(menu) {
            let coords: Vec<(i64, i64)> = members.iter().map(|&idx| (squares[idx].x, squares[idx].y)).collect();
            group_brushes(&coords)
                .groups()
                .into_iter()
                .map(|group| BrushGroup {
                    size: group.size,
                    cells: group.cells.into_iter().map(|local| members[local]).collect(),
                })
                .collect()
        } else {
            vec![BrushGroup {
                size: BrushSize::One,
                cells: members,
            }]
        };

        for group in brush_groups {
            actions.push(Action::click(
                group.size.selector(&layout.brushes),
                ClickTarget::Brush { side: group.size.side() },
            ));
            for idx in group.cells {
                let square = &squares[idx];
                actions.push(Action::click(
                    layout.cell_position(square.x, square.y),
                    ClickTarget::Cell { x: square.x, y: square.y },
                ));
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ScreenPoint;

    fn labels(menu: &str, cat1: &str, cat2: Option<&str>) -> TerrainLabels {
        TerrainLabels {
            menu: Some(menu.to_string()),
            cat1: Some(cat1.to_string()),
            cat2: cat2.map(str::to_string),
            direction: None,
        }
    }

    fn profile() -> Profile {
        let mut menu = BTreeMap::new();
        menu.insert("Ground 1".to_string(), ScreenPoint::new(1, 1));
        menu.insert("Foliage".to_string(), ScreenPoint::new(2, 2));
        menu.insert("Grass".to_string(), ScreenPoint::new(3, 3));
        menu.insert("Tree A".to_string(), ScreenPoint::new(4, 4));
        menu.insert("Heavy".to_string(), ScreenPoint::new(5, 5));
        Profile {
            name: "test".to_string(),
            menu,
        }
    }

    fn targets(actions: &[Action]) -> Vec<ClickTarget> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Click { target, .. } => Some(target.clone()),
                _ => None,
            })
            .collect()
    }

    fn menu(label: &str) -> ClickTarget {
        ClickTarget::Menu { label: label.to_string() }
    }

    #[test]
    fn test_ground_groups_use_large_brushes() {
        let grass = labels("Ground 1", "Grass", None);
        let mut squares: Vec<TerrainSquare> = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .map(|(x, y)| TerrainSquare { x, y, labels: &grass })
            .collect();
        squares.push(TerrainSquare { x: 10, y: 10, labels: &grass });

        let layout = ScreenLayout::builtin().unwrap();
        let actions = paint_terrain(&squares, &profile(), &layout);
        assert_eq!(
            targets(&actions),
            vec![
                menu("Ground 1"),
                menu("Grass"),
                ClickTarget::Brush { side: 1 },
                ClickTarget::Cell { x: 10, y: 10 },
                ClickTarget::Brush { side: 3 },
                ClickTarget::Cell { x: 1, y: 1 },
            ]
        );
    }

    #[test]
    fn test_other_menus_paint_single_squares() {
        let trees = labels("Foliage", "Tree A", Some("Heavy"));
        let squares: Vec<TerrainSquare> = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .map(|(x, y)| TerrainSquare { x, y, labels: &trees })
            .collect();
        let layout = ScreenLayout::builtin().unwrap();
        let actions = paint_terrain(&squares, &profile(), &layout);
        let targets = targets(&actions);
        assert_eq!(&targets[..4], &[menu("Foliage"), menu("Tree A"), menu("Heavy"), ClickTarget::Brush { side: 1 }]);
        assert_eq!(targets.len(), 4 + 9);
    }

    #[test]
    fn test_unknown_labels_are_skipped() {
        let unknown_menu = labels("Water", "Grass", None);
        let unknown_cat = labels("Ground 1", "Snow", None);
        let partial = TerrainLabels {
            menu: Some("Ground 1".to_string()),
            ..TerrainLabels::default()
        };
        let squares = [
            TerrainSquare { x: 0, y: 0, labels: &unknown_menu },
            TerrainSquare { x: 1, y: 0, labels: &unknown_cat },
            TerrainSquare { x: 2, y: 0, labels: &partial },
        ];
        let layout = ScreenLayout::builtin().unwrap();
        assert!(paint_terrain(&squares, &profile(), &layout).is_empty());
    }

    #[test]
    fn test_missing_secondary_labels_form_their_own_group() {
        let bare = labels("Foliage", "Tree A", None);
        let heavy = labels("Foliage", "Tree A", Some("Heavy"));
        let squares = [
            TerrainSquare { x: 0, y: 0, labels: &heavy },
            TerrainSquare { x: 1, y: 0, labels: &bare },
        ];
        let layout = ScreenLayout::builtin().unwrap();
        let actions = paint_terrain(&squares, &profile(), &layout);
        // Absent labels sort first, so the bare group is painted before "Heavy".
        assert_eq!(
            targets(&actions),
            vec![
                menu("Foliage"),
                menu("Tree A"),
                ClickTarget::Brush { side: 1 },
                ClickTarget::Cell { x: 1, y: 0 },
                menu("Foliage"),
                menu("Tree A"),
                menu("Heavy"),
                ClickTarget::Brush { side: 1 },
                ClickTarget::Cell { x: 0, y: 0 },
            ]
        );
    }

    #[test]
    fn test_unknown_secondary_labels_are_not_clicked() {
        let grass = labels("Ground 1", "Grass", Some("Unheard Of"));
        let squares = [TerrainSquare { x: 0, y: 0, labels: &grass }];
        let layout = ScreenLayout::builtin().unwrap();
        let actions = paint_terrain(&squares, &profile(), &layout);
        assert_eq!(
            targets(&actions),
            vec![menu("Ground 1"), menu("Grass"), ClickTarget::Brush { side: 1 }, ClickTarget::Cell { x: 0, y: 0 }]
        );
    }
}
