//! Inter-Quake Export (`.iqe`) text format.
//!
//! Only the records needed for static geometry and the bind skeleton are
//! read. Animation sections (`animation`, `frame`) end the skeleton: `pq`
//! records after them are frame data and are skipped.

use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};

use super::index_count;
use crate::assets::mesh::{BoneWeights, Mesh, MeshPart};
use crate::assets::skeleton::{Bone, Skeleton};
use crate::errors::AssetLoadError;
use crate::scene::transform::Transform;
use crate::utils::tokenize::split_words;

/// Everything an `.iqe` file contributes before its first animation.
#[derive(Debug, Default)]
pub struct IqeDocument {
    pub bones: Vec<Bone>,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub blend: Vec<BoneWeights>,
    pub indices: Vec<u32>,
    pub parts: Vec<MeshPart>,
}

struct LineParser<'a> {
    path: &'a str,
    line: usize,
}

impl LineParser<'_> {
    fn error(&self, message: impl Into<String>) -> AssetLoadError {
        AssetLoadError::Parse {
            path: self.path.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn floats<const N: usize>(&self, args: &[String], defaults: [f32; N]) -> Result<[f32; N], AssetLoadError> {
        let mut out = defaults;
        for (slot, arg) in out.iter_mut().zip(args) {
            *slot = arg
                .parse()
                .map_err(|_| self.error(format!("expected a number, found '{arg}'")))?;
        }
        Ok(out)
    }

    fn index(&self, arg: &str) -> Result<i64, AssetLoadError> {
        arg.parse()
            .map_err(|_| self.error(format!("expected an integer, found '{arg}'")))
    }
}

/// Parses the text of an `.iqe` file. `path` is only used in error messages.
pub fn parse(path: &str, text: &str) -> Result<IqeDocument, AssetLoadError> {
    let mut doc = IqeDocument::default();
    let mut in_animation = false;
    let mut mesh_first_vertex: u32 = 0;

    for (n, raw) in text.lines().enumerate() {
        let p = LineParser { path, line: n + 1 };
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let words = split_words(line);
        let Some((record, args)) = words.split_first() else {
            continue;
        };

        match record.as_str() {
            "joint" if !in_animation => {
                let name = args.first().ok_or_else(|| p.error("joint without a name"))?;
                let parent = match args.get(1) {
                    Some(arg) => p.index(arg)?,
                    None => -1,
                };
                doc.bones.push(Bone {
                    name: name.clone(),
                    parent: usize::try_from(parent).ok(),
                    rest: Transform::IDENTITY,
                });
            }
            "pq" if !in_animation => {
                let bone = doc
                    .bones
                    .last_mut()
                    .ok_or_else(|| p.error("pose record before any joint"))?;
                let [tx, ty, tz, qx, qy, qz, qw, sx, sy, sz] =
                    p.floats(args, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0])?;
                bone.rest = Transform {
                    location: Vec3::new(tx, ty, tz),
                    rotation: Quat::from_xyzw(qx, qy, qz, qw).normalize(),
                    scale: Vec3::new(sx, sy, sz),
                };
            }
            "animation" | "frame" => in_animation = true,
            "mesh" => {
                mesh_first_vertex = index_count(path, doc.positions.len(), "vertices")?;
                let first = index_count(path, doc.indices.len(), "indices")?;
                doc.parts.push(MeshPart {
                    name: args.first().cloned().unwrap_or_default(),
                    material: String::new(),
                    first,
                    count: 0,
                });
            }
            "material" => {
                let part = doc
                    .parts
                    .last_mut()
                    .ok_or_else(|| p.error("material record before any mesh"))?;
                part.material = args.first().cloned().unwrap_or_default();
            }
            "vp" => {
                let [x, y, z] = p.floats(args, [0.0; 3])?;
                doc.positions.push(Vec3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = p.floats(args, [0.0; 3])?;
                doc.normals.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = p.floats(args, [0.0; 2])?;
                doc.texcoords.push(Vec2::new(u, v));
            }
            "vb" => doc.blend.push(parse_blend(&p, args)?),
            "fm" | "fa" => {
                if args.len() < 3 {
                    return Err(p.error("face with fewer than three vertices"));
                }
                let base = if record == "fm" { mesh_first_vertex } else { 0 };
                let corners = args
                    .iter()
                    .map(|a| {
                        let i = p.index(a)?;
                        u32::try_from(i)
                            .ok()
                            .and_then(|i| base.checked_add(i))
                            .ok_or_else(|| p.error(format!("vertex index {i} out of range")))
                    })
                    .collect::<Result<Vec<u32>, _>>()?;

                // Polygons are fanned into triangles.
                for k in 1..corners.len() - 1 {
                    doc.indices.extend_from_slice(&[corners[0], corners[k], corners[k + 1]]);
                }
                if doc.parts.is_empty() {
                    doc.parts.push(MeshPart {
                        name: String::new(),
                        material: String::new(),
                        first: 0,
                        count: 0,
                    });
                }
                let total = index_count(path, doc.indices.len(), "indices")?;
                if let Some(part) = doc.parts.last_mut() {
                    part.count = total - part.first;
                }
            }
            _ => {}
        }
    }

    let vertex_count = index_count(path, doc.positions.len(), "vertices")?;
    if let Some(&bad) = doc.indices.iter().find(|&&i| i >= vertex_count) {
        return Err(AssetLoadError::Malformed {
            path: path.to_string(),
            message: format!("face references vertex {bad} but only {vertex_count} exist"),
        });
    }

    Ok(doc)
}

fn parse_blend(p: &LineParser<'_>, args: &[String]) -> Result<BoneWeights, AssetLoadError> {
    let mut out = BoneWeights::default();
    let mut total = 0.0;
    for (slot, pair) in args.chunks(2).take(4).enumerate() {
        let index = p.index(&pair[0])?;
        out.indices[slot] =
            u16::try_from(index).map_err(|_| p.error(format!("bone index {index} out of range")))?;
        let [weight] = p.floats(&pair[1..], [0.0])?;
        out.weights[slot] = weight;
        total += weight;
    }
    if total > 0.0 {
        for w in &mut out.weights {
            *w /= total;
        }
    }
    Ok(out)
}

/// Loads only the skeleton of an `.iqe` file.
pub fn load_skeleton(path: &str, text: &str) -> Result<Skeleton, AssetLoadError> {
    let doc = parse(path, text)?;
    if doc.bones.is_empty() {
        return Err(AssetLoadError::Malformed {
            path: path.to_string(),
            message: "file has no joints".to_string(),
        });
    }
    Skeleton::new(path, doc.bones)
}

/// Loads the geometry of an `.iqe` file. When the file also declares
/// joints, the mesh carries them as its own skeleton.
pub fn load_mesh(path: &str, text: &str) -> Result<Mesh, AssetLoadError> {
    let doc = parse(path, text)?;

    if let Some(bad) = doc
        .blend
        .iter()
        .flat_map(|b| b.indices.iter().zip(b.weights))
        .find(|&(&i, w)| w > 0.0 && usize::from(i) >= doc.bones.len())
    {
        return Err(AssetLoadError::Malformed {
            path: path.to_string(),
            message: format!("vertex weight references missing bone {}", bad.0),
        });
    }

    let mut mesh = Mesh::new(path);
    mesh.positions = doc.positions;
    mesh.normals = doc.normals;
    mesh.texcoords = doc.texcoords;
    mesh.blend = doc.blend;
    mesh.indices = doc.indices;
    mesh.parts = doc.parts;

    if !doc.bones.is_empty() {
        mesh.skeleton = Some(Arc::new(Skeleton::new(path, doc.bones)?));
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = r#"# Inter-Quake Export
joint "root" -1
pq 0 0 0 0 0 0 1
joint "arm" 0
pq 1 0 0 0 0 0 1 2 2 2
mesh "plane"
material "stone"
vp 0 0 0
vp 1 0 0
vp 1 1 0
vp 0 1 0
vb 0 3 1 1
vb 0 1
vb 1 1
vb 1 1
fm 0 1 2 3
animation "idle"
frame
pq 5 5 5 0 0 0 1
"#;

    #[test]
    fn parses_joints_and_rest_pose() {
        let skel = load_skeleton("quad.iqe", QUAD).unwrap();
        assert_eq!(skel.len(), 2);
        assert_eq!(skel.bones()[0].parent, None);
        assert_eq!(skel.bones()[1].parent, Some(0));
        assert_eq!(skel.bones()[1].rest.location, Vec3::X);
        assert_eq!(skel.bones()[1].rest.scale, Vec3::splat(2.0));
    }

    #[test]
    fn animation_frames_do_not_touch_rest_pose() {
        let skel = load_skeleton("quad.iqe", QUAD).unwrap();
        assert_eq!(skel.bones()[0].rest.location, Vec3::ZERO);
    }

    #[test]
    fn fans_polygons_into_triangles() {
        let mesh = load_mesh("quad.iqe", QUAD).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.parts[0].material, "stone");
        assert_eq!(mesh.parts[0].count, 6);
        assert!(mesh.is_skinned());
    }

    #[test]
    fn normalizes_blend_weights() {
        let mesh = load_mesh("quad.iqe", QUAD).unwrap();
        assert_eq!(mesh.blend[0].indices[..2], [0, 1]);
        assert!((mesh.blend[0].weights[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn mesh_relative_faces_offset_by_mesh_start() {
        let text = "mesh a\nvp 0 0 0\nvp 1 0 0\nvp 0 1 0\nfm 0 1 2\nmesh b\nvp 0 0 1\nvp 1 0 1\nvp 0 1 1\nfm 0 1 2\n";
        let mesh = load_mesh("two.iqe", text).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.parts.len(), 2);
        assert_eq!(mesh.parts[1].first, 3);
        assert!(!mesh.is_skinned());
    }

    #[test]
    fn reports_line_of_bad_number() {
        let err = parse("bad.iqe", "vp 0 0 0\nvp 1 nope 0\n").unwrap_err();
        match err {
            AssetLoadError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_face() {
        let err = parse("bad.iqe", "vp 0 0 0\nfa 0 1 2\n").unwrap_err();
        assert!(matches!(err, AssetLoadError::Malformed { .. }));
    }

    #[test]
    fn huge_mesh_relative_index_is_an_error() {
        let text = "mesh a\nvp 0 0 0\nmesh b\nvp 1 0 0\nfm 4294967295 0 0\n";
        match load_mesh("huge.iqe", text).unwrap_err() {
            AssetLoadError::Parse { line, message, .. } => {
                assert_eq!(line, 5);
                assert!(message.contains("out of range"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_face_index_is_an_error() {
        let err = parse("neg.iqe", "vp 0 0 0\nfa 0 -1 0\n").unwrap_err();
        assert!(matches!(err, AssetLoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn skeleton_requires_joints() {
        assert!(load_skeleton("empty.iqe", "vp 0 0 0\n").is_err());
    }
}
