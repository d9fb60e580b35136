//! Masonry layout: geometry and the greedy shortest-column packer
//!
//! Each incoming image is scaled to the column width and appended to the
//! currently shortest column. Greedy balanced bin packing: not globally
//! optimal, but O(images x columns), order-stable, and deterministic
//! down to the tie-break (first column attaining the minimum height).

use super::data::SizedImage;

/// Fraction of a raw column slot reserved for inter-brick spacing.
const SPACING_FACTOR: f32 = 0.005;

/// Derived sizing constants for the wall, computed from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGeometry {
    /// Number of columns, fixed for the engine lifetime.
    pub columns: usize,
    /// Usable brick width inside one column.
    pub column_width: f32,
    /// Vertical gap rendered between bricks.
    pub spacing: f32,
}

impl WallGeometry {
    /// Split the viewport width into `columns` slots, reserving a small
    /// spacing allowance inside each slot.
    pub fn for_viewport(viewport_width: f32, columns: usize) -> Self {
        let raw = viewport_width / columns as f32;
        let spacing = raw * SPACING_FACTOR;
        WallGeometry {
            columns,
            column_width: raw - spacing / 2.0,
            spacing,
        }
    }
}

/// One rendered image placed within a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub id: String,
    pub url: String,
    /// Display width (the column width at layout time).
    pub width: f32,
    /// Display height, aspect-ratio-preserving scale of the intrinsic size.
    pub height: f32,
}

/// An ordered stack of bricks and its accumulated display height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub bricks: Vec<Brick>,
    pub height: f32,
}

/// Index of the shortest column; ties resolve to the lowest index.
fn shortest_column(columns: &[Column]) -> usize {
    let mut index = 0;
    let mut best = columns.first().map(|c| c.height).unwrap_or(0.0);
    for (i, column) in columns.iter().enumerate().skip(1) {
        if column.height < best {
            best = column.height;
            index = i;
        }
    }
    index
}

/// Append one page of images to the column set, in arrival order.
///
/// An empty `images` slice leaves the columns untouched.
pub fn layout_bricks(columns: &mut [Column], geometry: &WallGeometry, images: &[SizedImage]) {
    for image in images {
        let width = geometry.column_width;
        let scale = width / image.width as f32;
        let height = image.height as f32 * scale;

        let target = shortest_column(columns);
        columns[target].bricks.push(Brick {
            id: image.id.clone(),
            url: image.url.clone(),
            width,
            height,
        });
        columns[target].height += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(id: &str, width: u32, height: u32) -> SizedImage {
        SizedImage {
            id: id.to_string(),
            url: format!("https://example.com/{id}.jpg"),
            width,
            height,
        }
    }

    fn test_geometry() -> WallGeometry {
        WallGeometry {
            columns: 2,
            column_width: 100.0,
            spacing: 1.0,
        }
    }

    #[test]
    fn test_geometry_for_viewport() {
        let g = WallGeometry::for_viewport(400.0, 2);
        let raw = 200.0;
        let spacing = raw * 0.005;
        assert_eq!(g.columns, 2);
        assert_eq!(g.spacing, spacing);
        assert_eq!(g.column_width, raw - spacing / 2.0);
    }

    #[test]
    fn test_layout_balances_columns() {
        let mut cols = vec![Column::default(), Column::default()];
        let images = [sized("a", 100, 200), sized("b", 100, 100), sized("c", 100, 50)];

        layout_bricks(&mut cols, &test_geometry(), &images);

        // a -> col0 (200), b -> col1 (100), c -> shorter col1 (150)
        assert_eq!(cols[0].bricks.len(), 1);
        assert_eq!(cols[1].bricks.len(), 2);
        assert_eq!(cols[0].height, 200.0);
        assert_eq!(cols[1].height, 150.0);
        assert_eq!(cols[1].bricks[0].id, "b");
        assert_eq!(cols[1].bricks[1].id, "c");
    }

    #[test]
    fn test_tie_breaks_to_first_column() {
        let mut cols = vec![Column::default(), Column::default()];

        layout_bricks(&mut cols, &test_geometry(), &[sized("a", 100, 80)]);
        assert_eq!(cols[0].bricks.len(), 1);
        assert_eq!(cols[1].bricks.len(), 0);

        // Equalize, then confirm the next brick lands on column 0 again.
        layout_bricks(&mut cols, &test_geometry(), &[sized("b", 100, 80)]);
        assert_eq!(cols[0].height, cols[1].height);
        layout_bricks(&mut cols, &test_geometry(), &[sized("c", 100, 40)]);
        assert_eq!(cols[0].bricks.len(), 2);
    }

    #[test]
    fn test_scaling_preserves_aspect_ratio() {
        let mut cols = vec![Column::default(), Column::default()];
        // 400x800 image into a 100-wide column: height scales to 200.
        layout_bricks(&mut cols, &test_geometry(), &[sized("a", 400, 800)]);
        let brick = &cols[0].bricks[0];
        assert_eq!(brick.width, 100.0);
        assert_eq!(brick.height, 200.0);
    }

    #[test]
    fn test_empty_page_is_noop() {
        let mut cols = vec![Column::default(), Column::default()];
        layout_bricks(&mut cols, &test_geometry(), &[sized("a", 100, 100)]);
        let before = cols.clone();

        layout_bricks(&mut cols, &test_geometry(), &[]);
        assert_eq!(cols, before);
    }
}
