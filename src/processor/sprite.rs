use super::Cpu;
use crate::error::ErrorDetail;
use crate::video::{Plane, VideoMode};

impl Cpu {
    /// Draws the sprite at memory address `I` at screen coordinates `(Vx, Vy)`, per the `DXYN`
    /// family of instructions.
    ///
    /// A sprite height of zero selects the 16x16 big-sprite form when [VideoMode::Extended] is
    /// active or [crate::options::Quirks::draw] is set; otherwise it falls back to the
    /// legacy 8x16 form some early SUPER-CHIP ROMs assume. Rows are iterated by logical row
    /// index rather than by a running byte offset, so a big sprite's second 8-row half is read
    /// from the correct plane offset rather than every other row.
    ///
    /// Sets `VF` to `1` if any previously-set pixel was cleared by the draw, across every
    /// affected plane, and marks a draw as pending for the next frame.
    pub(super) fn draw_sprite(&mut self, x: usize, y: usize, n: u8) -> Result<(), ErrorDetail> {
        let (width, height, bytes_per_row) = Self::sprite_dimensions(
            n,
            self.video.video_mode == VideoMode::Extended || self.quirks.draw,
        );
        let logical_width = self.video.width();
        let logical_height = self.video.height();
        let start_x = self.variable_registers[x] as usize % logical_width;
        let start_y = self.variable_registers[y] as usize % logical_height;

        let planes = self.active_draw_planes();
        let bytes_per_plane = bytes_per_row * height;
        let mut cursor = self.index_register as usize;
        let mut collision = false;

        for plane in planes {
            let sprite_bytes = self.memory.read_bytes(cursor, bytes_per_plane)?;
            for row in 0..height {
                let row_bytes = &sprite_bytes[row * bytes_per_row..(row + 1) * bytes_per_row];
                let mut sprite_row: u32 = 0;
                for byte in row_bytes {
                    sprite_row = (sprite_row << 8) | (*byte as u32);
                }
                for col in 0..width {
                    if (sprite_row >> (width - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    let (px, wrapped_x) = Self::wrap_or_clip(
                        start_x + col,
                        logical_width,
                        self.quirks.partial_wrap_h,
                    );
                    let (py, wrapped_y) = Self::wrap_or_clip(
                        start_y + row,
                        logical_height,
                        self.quirks.partial_wrap_v,
                    );
                    if !wrapped_x || !wrapped_y {
                        continue;
                    }
                    let was_set = self.video.get(plane, px, py);
                    if was_set {
                        collision = true;
                    }
                    self.video.set(plane, px, py, !was_set);
                }
            }
            cursor += bytes_per_plane;
        }
        self.variable_registers[0xF] = collision as u8;
        self.draw_requested = true;
        Ok(())
    }

    fn sprite_dimensions(n: u8, prefers_big_sprite: bool) -> (usize, usize, usize) {
        match (n, prefers_big_sprite) {
            (0, true) => (16, 16, 2),
            (0, false) => (8, 16, 1),
            (n, _) => (8, n as usize, 1),
        }
    }

    fn active_draw_planes(&self) -> Vec<Plane> {
        match self.video.plane {
            Plane::None => vec![],
            Plane::First => vec![Plane::First],
            Plane::Second => vec![Plane::Second],
            Plane::Both => vec![Plane::First, Plane::Second],
        }
    }

    /// Wraps or clips a single axis coordinate that has fallen past the logical boundary.
    /// Returns the resolved coordinate and whether the pixel should still be drawn.
    fn wrap_or_clip(coordinate: usize, bound: usize, wrap: bool) -> (usize, bool) {
        if coordinate < bound {
            (coordinate, true)
        } else if wrap {
            (coordinate % bound, true)
        } else {
            (0, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::options::Options;
    use crate::processor::Cpu;
    use crate::video::{Plane, VideoMode};

    const SOLID_8X5: [u8; 5] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

    fn setup_cpu() -> Cpu {
        Cpu::new(Options::default())
    }

    fn write_sprite(cpu: &mut Cpu, address: usize, data: &[u8]) {
        cpu.memory.write_bytes(address, data).unwrap();
        cpu.index_register = address as u16;
    }

    #[test]
    fn test_draw_solid_sprite_lights_expected_block_and_clears_vf() {
        let mut cpu = setup_cpu();
        write_sprite(&mut cpu, 0x300, &SOLID_8X5);
        cpu.variable_registers[0x0] = 7;
        cpu.variable_registers[0x1] = 2;
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        assert_eq!(cpu.variable_registers[0xF], 0);
        for y in 2..7 {
            for x in 7..15 {
                assert!(cpu.video.get(Plane::First, x, y), "expected ({x},{y}) lit");
            }
        }
    }

    #[test]
    fn test_draw_same_sprite_twice_erases_and_sets_collision() {
        let mut cpu = setup_cpu();
        write_sprite(&mut cpu, 0x300, &SOLID_8X5);
        cpu.variable_registers[0x0] = 7;
        cpu.variable_registers[0x1] = 2;
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        assert_eq!(cpu.variable_registers[0xF], 1);
        for y in 2..7 {
            for x in 7..15 {
                assert!(!cpu.video.get(Plane::First, x, y));
            }
        }
    }

    #[test]
    fn test_draw_coordinates_wrap_at_start_regardless_of_partial_wrap_quirks() {
        let mut cpu = setup_cpu();
        cpu.quirks.partial_wrap_h = false;
        cpu.quirks.partial_wrap_v = false;
        write_sprite(&mut cpu, 0x300, &SOLID_8X5);
        // 64x32 logical resolution: (71, 34) reduces to (7, 2) by the initial modulus.
        cpu.variable_registers[0x0] = 71;
        cpu.variable_registers[0x1] = 34;
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        for y in 2..7 {
            for x in 7..15 {
                assert!(cpu.video.get(Plane::First, x, y));
            }
        }
    }

    #[test]
    fn test_draw_wraps_horizontally_but_clips_vertically() {
        let mut cpu = setup_cpu();
        cpu.quirks.partial_wrap_h = true;
        cpu.quirks.partial_wrap_v = false;
        write_sprite(&mut cpu, 0x300, &SOLID_8X5);
        cpu.variable_registers[0x0] = 60;
        cpu.variable_registers[0x1] = 30;
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        // Rows 30/31 fit on-screen; columns wrap from 60..64 onto 0..4.
        for row in [30usize, 31usize] {
            for x in 60..64 {
                assert!(cpu.video.get(Plane::First, x, row));
            }
            for x in 0..4 {
                assert!(cpu.video.get(Plane::First, x, row));
            }
        }
        // Rows 32..34 fall past the bottom edge and are clipped (not wrapped), so the top
        // rows of the display must remain untouched by this sprite.
        for y in 0..2 {
            for x in 0..4 {
                assert!(!cpu.video.get(Plane::First, x, y));
            }
        }
    }

    #[test]
    fn test_draw_zero_height_big_sprite_in_extended_mode() {
        let mut cpu = setup_cpu();
        cpu.video.video_mode = VideoMode::Extended;
        let big_sprite = [0xFFu8; 32];
        write_sprite(&mut cpu, 0x300, &big_sprite);
        cpu.variable_registers[0x0] = 65;
        cpu.variable_registers[0x1] = 2;
        cpu.draw_sprite(0x0, 0x1, 0).unwrap();
        assert_eq!(cpu.variable_registers[0xF], 0);
        for y in 2..18 {
            for x in 65..81 {
                assert!(cpu.video.get(Plane::First, x, y), "expected ({x},{y}) lit");
            }
        }
    }

    #[test]
    fn test_draw_zero_height_legacy_sprite_defaults_to_sixteen_rows() {
        let mut cpu = setup_cpu();
        cpu.quirks.draw = false;
        let legacy_sprite = [0xFFu8; 16];
        write_sprite(&mut cpu, 0x300, &legacy_sprite);
        cpu.variable_registers[0x0] = 0;
        cpu.variable_registers[0x1] = 0;
        cpu.draw_sprite(0x0, 0x1, 0).unwrap();
        for y in 0..16 {
            assert!(cpu.video.get(Plane::First, 0, y));
        }
    }

    #[test]
    fn test_draw_respects_second_plane_only() {
        let mut cpu = setup_cpu();
        cpu.video.plane = Plane::Second;
        write_sprite(&mut cpu, 0x300, &SOLID_8X5);
        cpu.variable_registers[0x0] = 0;
        cpu.variable_registers[0x1] = 0;
        cpu.draw_sprite(0x0, 0x1, 5).unwrap();
        assert!(cpu.video.get(Plane::Second, 0, 0));
        assert!(!cpu.video.get(Plane::First, 0, 0));
    }
}
