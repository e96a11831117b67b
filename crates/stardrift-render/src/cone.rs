//! Solid cone primitive for the ship model.
//!
//! The cone points along +Z: base disc in the z = 0 plane, apex at
//! z = height. Tessellation follows the classic slices/stacks scheme, so
//! `generate_cone(0.5, 1.5, 16, 8, ..)` reproduces the standard solid-cone
//! primitive the ship is drawn with.

use std::f32::consts::TAU;

use crate::mesh::VertexPositionColor;

/// Generate cone vertices and u16 indices with a uniform color.
///
/// Returns `(stacks + 1) * slices + 1` vertices: one ring per stack
/// boundary (the top ring collapses onto the apex) plus the base center.
pub fn generate_cone(
    base_radius: f32,
    height: f32,
    slices: u32,
    stacks: u32,
    color: [f32; 4],
) -> (Vec<VertexPositionColor>, Vec<u16>) {
    assert!(slices >= 3, "a cone needs at least 3 slices");
    assert!(stacks >= 1, "a cone needs at least 1 stack");

    let mut vertices = Vec::with_capacity(((stacks + 1) * slices + 1) as usize);

    // Rings from base (full radius) to apex (radius 0).
    for stack in 0..=stacks {
        let t = stack as f32 / stacks as f32;
        let radius = base_radius * (1.0 - t);
        let z = height * t;
        for slice in 0..slices {
            let angle = TAU * slice as f32 / slices as f32;
            vertices.push(VertexPositionColor {
                position: [radius * angle.cos(), radius * angle.sin(), z],
                color,
            });
        }
    }

    // Base center for the cap fan.
    let center_index = vertices.len() as u16;
    vertices.push(VertexPositionColor {
        position: [0.0, 0.0, 0.0],
        color,
    });

    let ring = |stack: u32, slice: u32| -> u16 { (stack * slices + (slice % slices)) as u16 };

    let mut indices = Vec::with_capacity((stacks * slices * 6 + slices * 3) as usize);

    // Lateral surface: a quad (two triangles) per slice per stack.
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = ring(stack, slice);
            let b = ring(stack, slice + 1);
            let c = ring(stack + 1, slice);
            let d = ring(stack + 1, slice + 1);
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    // Base cap fan.
    for slice in 0..slices {
        indices.extend_from_slice(&[center_index, ring(0, slice + 1), ring(0, slice)]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR: [f32; 4] = [0.2, 0.4, 0.8, 1.0];

    #[test]
    fn test_vertex_and_index_counts() {
        let (vertices, indices) = generate_cone(0.5, 1.5, 16, 8, COLOR);
        assert_eq!(vertices.len(), (8 + 1) * 16 + 1);
        assert_eq!(indices.len() as u32, 8 * 16 * 6 + 16 * 3);
        assert_eq!(indices.len() % 3, 0);
    }

    #[test]
    fn test_apex_sits_at_height() {
        let (vertices, _) = generate_cone(0.5, 1.5, 16, 8, COLOR);
        // The final ring collapses onto the apex.
        let apex = &vertices[(8 * 16) as usize];
        assert!((apex.position[2] - 1.5).abs() < 1e-6);
        assert!(apex.position[0].abs() < 1e-6);
        assert!(apex.position[1].abs() < 1e-6);
    }

    #[test]
    fn test_base_ring_has_full_radius() {
        let (vertices, _) = generate_cone(0.5, 1.5, 16, 8, COLOR);
        for v in &vertices[..16] {
            let r = (v.position[0] * v.position[0] + v.position[1] * v.position[1]).sqrt();
            assert!((r - 0.5).abs() < 1e-6);
            assert!(v.position[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_all_indices_in_range() {
        let (vertices, indices) = generate_cone(0.5, 1.5, 16, 8, COLOR);
        for &i in &indices {
            assert!((i as usize) < vertices.len());
        }
    }

    #[test]
    fn test_uniform_color() {
        let (vertices, _) = generate_cone(0.5, 1.5, 16, 8, COLOR);
        assert!(vertices.iter().all(|v| v.color == COLOR));
    }
}
