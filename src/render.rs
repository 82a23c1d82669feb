use crate::types::PlacedPallet;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Top view of every layer, lowest first, each under a `z = ..` caption.
pub fn render_layers(placements: &[PlacedPallet]) -> String {
    let mut levels: Vec<u32> = placements.iter().map(|p| p.origin.z).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut result = String::new();
    for z in levels {
        result.push_str(&format!("z = {}:\n", z));
        result.push_str(&render_layer(placements, z));
    }
    result
}

/// Top view of the pallets whose base sits at height `z`.
///
/// The drawing spans the whole solution's floor so layers line up; x runs
/// to the right and y downwards. Each footprint is labeled with its type id.
pub fn render_layer(placements: &[PlacedPallet], z: u32) -> String {
    let length = placements.iter().map(|p| p.max_x()).max().unwrap_or(0);
    let width = placements.iter().map(|p| p.max_y()).max().unwrap_or(0);
    if length == 0 || width == 0 {
        return String::new();
    }

    let scale = f64::min(MAX_WIDTH / length as f64, MAX_HEIGHT / width as f64);
    let grid_w = (length as f64 * scale).round() as usize;
    let grid_h = (width as f64 * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    for p in placements.iter().filter(|p| p.origin.z == z) {
        let sx = (p.origin.x as f64 * scale).round() as usize;
        let sy = (p.origin.y as f64 * scale).round() as usize;
        let sw = (p.length as f64 * scale).round() as usize;
        let sh = (p.width as f64 * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label: Vec<char> = p.type_id().to_string().chars().collect();
        if sw > 1 && sh > 1 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label.len() / 2);

            for (i, &ch) in label.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn merge(current: char, edge: char) -> char {
    match (current, edge) {
        ('+', _) => '+',
        ('|', '-') | ('-', '|') => '+',
        _ => edge,
    }
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    for i in (x..=x + w).filter(|&i| i < cols) {
        for j in [y, y + h].into_iter().filter(|&j| j < rows) {
            grid[j][i] = merge(grid[j][i], '-');
        }
    }

    for j in (y..=y + h).filter(|&j| j < rows) {
        for i in [x, x + w].into_iter().filter(|&i| i < cols) {
            grid[j][i] = merge(grid[j][i], '|');
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
