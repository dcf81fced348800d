//! Hardcoded vertex data for the three demo variants.

use crate::abs::{Attribute, Vertex};

/// Position only.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl Vertex for PositionVertex {
    const ATTRIBUTES: &'static [Attribute] = &[Attribute {
        name: "a_position",
        components: 3,
        offset: 0,
    }];
}

/// Position and RGB color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for ColorVertex {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute {
            name: "a_position",
            components: 3,
            offset: 0,
        },
        Attribute {
            name: "a_color",
            components: 3,
            offset: 12,
        },
    ];
}

/// Position, texture coordinate and normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for TexturedVertex {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute {
            name: "a_position",
            components: 3,
            offset: 0,
        },
        Attribute {
            name: "a_uv",
            components: 2,
            offset: 12,
        },
        Attribute {
            name: "a_normal",
            components: 3,
            offset: 20,
        },
    ];
}

const fn p(x: f32, y: f32, z: f32) -> PositionVertex {
    PositionVertex { position: [x, y, z] }
}

/// Corners of the centered square, clockwise from top left.
pub const QUAD_VERTICES: [PositionVertex; 4] = [
    p(-0.5, 0.5, 0.0),
    p(0.5, 0.5, 0.0),
    p(0.5, -0.5, 0.0),
    p(-0.5, -0.5, 0.0),
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// The eight corners of a unit cube centered on the origin.
const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

/// Corner indices of each face, counter-clockwise seen from outside, with the face normal.
const FACES: [([usize; 4], [f32; 3]); 6] = [
    ([0, 1, 2, 3], [0.0, 0.0, 1.0]),
    ([5, 4, 7, 6], [0.0, 0.0, -1.0]),
    ([1, 5, 6, 2], [1.0, 0.0, 0.0]),
    ([4, 0, 3, 7], [-1.0, 0.0, 0.0]),
    ([3, 2, 6, 7], [0.0, 1.0, 0.0]),
    ([4, 5, 1, 0], [0.0, -1.0, 0.0]),
];

const FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
];

/// 36 vertices, two triangles per face, one color per face.
pub fn colored_cube() -> Vec<ColorVertex> {
    let mut vertices = Vec::with_capacity(36);
    for ((corners, _), color) in FACES.iter().zip(FACE_COLORS) {
        for i in [0, 1, 2, 2, 3, 0] {
            vertices.push(ColorVertex {
                position: CORNERS[corners[i]],
                color,
            });
        }
    }
    vertices
}

/// 24 vertices, four per face in strip order: bottom left, bottom right, top left, top right.
pub fn textured_cube() -> Vec<TexturedVertex> {
    const STRIP: [(usize, [f32; 2]); 4] = [
        (0, [0.0, 0.0]),
        (1, [1.0, 0.0]),
        (3, [0.0, 1.0]),
        (2, [1.0, 1.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    for (corners, normal) in FACES {
        for (i, uv) in STRIP {
            vertices.push(TexturedVertex {
                position: CORNERS[corners[i]],
                uv,
                normal,
            });
        }
    }
    vertices
}

/// Joins `faces` quads of four strip-ordered vertices into one triangle strip.
///
/// Consecutive faces are bridged by repeating the last index of one face and the first index
/// of the next, which produces degenerate triangles the rasterizer discards.
pub fn strip_indices(faces: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((faces * 6).saturating_sub(2) as usize);
    for face in 0..faces {
        let base = face * 4;
        if face > 0 {
            indices.push(base - 1);
            indices.push(base);
        }
        indices.extend([base, base + 1, base + 2, base + 3]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_match_layouts() {
        assert_eq!(PositionVertex::stride(), 12);
        assert_eq!(ColorVertex::stride(), 24);
        assert_eq!(TexturedVertex::stride(), 32);

        let last = TexturedVertex::ATTRIBUTES.last().unwrap();
        assert_eq!(last.offset + last.components * 4, TexturedVertex::stride());
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(
            TexturedVertex::attribute_names(),
            vec!["a_position", "a_uv", "a_normal"]
        );
    }

    #[test]
    fn test_quad_indices_in_range() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn test_colored_cube_counts() {
        let cube = colored_cube();
        assert_eq!(cube.len(), 36);
        assert!(cube.iter().all(|v| v.position.iter().all(|c| c.abs() == 0.5)));
    }

    #[test]
    fn test_textured_cube_normals_point_outward() {
        for v in textured_cube() {
            let dot: f32 = v.position.iter().zip(v.normal).map(|(p, n)| p * n).sum();
            assert_eq!(dot, 0.5);
        }
    }

    #[test]
    fn test_strip_indices_bridge_faces() {
        let indices = strip_indices(6);
        assert_eq!(indices.len(), 34);
        assert_eq!(&indices[..6], &[0, 1, 2, 3, 3, 4]);
        assert_eq!(*indices.last().unwrap(), 23);
    }

    #[test]
    fn test_strip_indices_single_face() {
        assert_eq!(strip_indices(1), vec![0, 1, 2, 3]);
        assert!(strip_indices(0).is_empty());
    }
}
