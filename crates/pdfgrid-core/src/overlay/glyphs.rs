use imageproc::drawing::Canvas;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// 3x5 bitmaps, one row per entry, most significant of the low 3 bits on the left.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` with its baseline at `baseline`, left edge at `x`.
///
/// Pixels outside the canvas are dropped. Characters without a glyph
/// advance the pen but draw nothing.
pub fn draw_text<C: Canvas>(
    canvas: &mut C,
    x: i64,
    baseline: i64,
    text: &str,
    scale: u32,
    color: C::Pixel,
) {
    let (width, height) = canvas.dimensions();
    let scale = i64::from(scale.max(1));
    let top = baseline - i64::from(GLYPH_HEIGHT) * scale;
    let mut pen_x = x;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    let cell_x = pen_x + i64::from(col) * scale;
                    let cell_y = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = cell_x + dx;
                            let py = cell_y + dy;
                            if px >= 0 && py >= 0 && px < i64::from(width) && py < i64::from(height)
                            {
                                canvas.draw_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        pen_x += i64::from(GLYPH_WIDTH + 1) * scale;
    }
}
