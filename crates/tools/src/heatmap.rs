use fluxgrid_common::{GRID_HEIGHT, GRID_WIDTH};
use fluxgrid_kernel::Simulation;

/// Glyphs from empty to full; mass is bucketed evenly across them.
pub const HEATMAP_RAMP: &[u8] = b" .:-=+*#%@";

/// Render the mass field as ASCII, one text row per grid row.
///
/// Only empty cells are blank and only full cells use the last glyph.
pub fn heatmap(sim: &Simulation) -> String {
    let mut out = String::with_capacity((GRID_WIDTH + 1) * GRID_HEIGHT + 64);
    out.push_str(&format!(
        "=== Mass Field (tick={}, total={}) ===\n",
        sim.tick(),
        sim.total_mass()
    ));
    for row in sim.mass_field().chunks_exact(GRID_WIDTH) {
        out.extend(row.iter().map(|&m| glyph(m)));
        out.push('\n');
    }
    out
}

fn glyph(mass: u8) -> char {
    let last = HEATMAP_RAMP.len() - 1;
    let bucket = match mass {
        0 => 0,
        u8::MAX => last,
        m => 1 + usize::from(m) * (last - 1) / usize::from(u8::MAX),
    };
    char::from(HEATMAP_RAMP[bucket])
}
