//! Console command language.
//!
//! One command per line, words separated by whitespace, double quotes group
//! words. Nodes are referred to by the name given when they were created.
//!
//! ```text
//! armature hero hero.iqe
//! object sword sword.iqe
//! attach sword hero hand.R
//! move hero 0 0 1
//! =sword
//! ```

use glam::{Mat4, Vec3};

use crate::assets::AssetCache;
use crate::errors::{AttachError, CommandError};
use crate::scene::{LightKind, NodeRef, Scene};
use crate::utils::split_words;

pub const HELP: &[&str] = &[
    "armature NAME FILE       load a skeleton and place an armature",
    "object NAME FILE         load a mesh and place an object",
    "light NAME [KIND]        place a light (point, spot, sun)",
    "attach CHILD PARENT [BONE]",
    "detach NODE",
    "move NODE X Y Z          set location",
    "rotate NODE X Y Z        set rotation (degrees)",
    "scale NODE S | X Y Z     set scale",
    "remove NODE",
    "bones ARMATURE           list skeleton bones",
    "list                     list nodes",
    "print TEXT...",
    "=NODE                    show world transform",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Print(String),
    Armature { name: String, file: String },
    Object { name: String, file: String },
    Light { name: String, kind: LightKind },
    Attach { child: String, parent: String, bone: Option<String> },
    Detach(String),
    Move { node: String, location: Vec3 },
    Rotate { node: String, degrees: Vec3 },
    Scale { node: String, scale: Vec3 },
    Remove(String),
    Bones(String),
    List,
    Show(String),
}

fn number(word: &str) -> Result<f32, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

fn vec3(words: &[String]) -> Result<Vec3, CommandError> {
    Ok(Vec3::new(number(&words[0])?, number(&words[1])?, number(&words[2])?))
}

impl Command {
    /// Parses one line. Blank lines and `#` comments parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if let Some(rest) = line.strip_prefix('=') {
            let words = split_words(rest);
            return match words.as_slice() {
                [node] => Ok(Some(Self::Show(node.clone()))),
                _ => Err(CommandError::Usage("=NODE")),
            };
        }

        let words = split_words(line);
        let (verb, args) = match words.split_first() {
            Some((verb, args)) => (verb.as_str(), args),
            None => return Ok(None),
        };

        let command = match (verb, args) {
            ("help", _) => Self::Help,
            ("print", args) => Self::Print(args.join(" ")),
            ("list", []) => Self::List,

            ("armature", [name, file]) => Self::Armature {
                name: name.clone(),
                file: file.clone(),
            },
            ("armature", _) => return Err(CommandError::Usage("armature NAME FILE")),

            ("object", [name, file]) => Self::Object {
                name: name.clone(),
                file: file.clone(),
            },
            ("object", _) => return Err(CommandError::Usage("object NAME FILE")),

            ("light", [name]) => Self::Light {
                name: name.clone(),
                kind: LightKind::Point,
            },
            ("light", [name, kind]) => Self::Light {
                name: name.clone(),
                kind: LightKind::parse(kind).ok_or_else(|| CommandError::InvalidLightKind(kind.clone()))?,
            },
            ("light", _) => return Err(CommandError::Usage("light NAME [KIND]")),

            ("attach", [child, parent]) => Self::Attach {
                child: child.clone(),
                parent: parent.clone(),
                bone: None,
            },
            ("attach", [child, parent, bone]) => Self::Attach {
                child: child.clone(),
                parent: parent.clone(),
                bone: Some(bone.clone()),
            },
            ("attach", _) => return Err(CommandError::Usage("attach CHILD PARENT [BONE]")),

            ("detach", [node]) => Self::Detach(node.clone()),
            ("detach", _) => return Err(CommandError::Usage("detach NODE")),

            ("move", [node, xyz @ ..]) if xyz.len() == 3 => Self::Move {
                node: node.clone(),
                location: vec3(xyz)?,
            },
            ("move", _) => return Err(CommandError::Usage("move NODE X Y Z")),

            ("rotate", [node, xyz @ ..]) if xyz.len() == 3 => Self::Rotate {
                node: node.clone(),
                degrees: vec3(xyz)?,
            },
            ("rotate", _) => return Err(CommandError::Usage("rotate NODE X Y Z")),

            ("scale", [node, s]) => Self::Scale {
                node: node.clone(),
                scale: Vec3::splat(number(s)?),
            },
            ("scale", [node, xyz @ ..]) if xyz.len() == 3 => Self::Scale {
                node: node.clone(),
                scale: vec3(xyz)?,
            },
            ("scale", _) => return Err(CommandError::Usage("scale NODE S | X Y Z")),

            ("remove", [node]) => Self::Remove(node.clone()),
            ("remove", _) => return Err(CommandError::Usage("remove NODE")),

            ("bones", [node]) => Self::Bones(node.clone()),
            ("bones", _) => return Err(CommandError::Usage("bones ARMATURE")),

            ("list", _) => return Err(CommandError::Usage("list")),
            (verb, _) => return Err(CommandError::UnknownCommand(verb.to_string())),
        };
        Ok(Some(command))
    }

    /// Runs the command, returning the lines to print.
    pub fn run(self, scene: &mut Scene, assets: &AssetCache) -> Result<Vec<String>, CommandError> {
        let mut out = Vec::new();
        match self {
            Self::Help => out.extend(HELP.iter().map(ToString::to_string)),
            Self::Print(text) => out.push(text),

            Self::Armature { name, file } => {
                ensure_unused(scene, &name)?;
                let skeleton = assets.load_skel(&file)?;
                let key = scene.create_armature(skeleton);
                scene.set_name(key, name);
            }
            Self::Object { name, file } => {
                ensure_unused(scene, &name)?;
                let mesh = assets.load_mesh(&file)?;
                let key = scene.create_object(mesh);
                scene.set_name(key, name);
            }
            Self::Light { name, kind } => {
                ensure_unused(scene, &name)?;
                let key = scene.create_light();
                scene.set_name(key, name);
                if let Some(light) = scene.light_mut(key) {
                    light.kind = kind;
                }
            }

            Self::Attach { child, parent, bone } => {
                let child = lookup(scene, &child)?;
                let parent = lookup(scene, &parent)?
                    .as_armature()
                    .ok_or(CommandError::Attach(AttachError::InvalidParent))?;
                scene.attach(child, parent, bone.as_deref())?;
            }
            Self::Detach(node) => {
                let node = lookup(scene, &node)?;
                scene.detach(node);
            }

            Self::Move { node, location } => {
                let key = lookup(scene, &node)?;
                if let Some(t) = scene.transform_mut(key) {
                    t.location = location;
                }
            }
            Self::Rotate { node, degrees } => {
                let key = lookup(scene, &node)?;
                if let Some(t) = scene.transform_mut(key) {
                    t.set_rotation_euler_degrees(degrees.x, degrees.y, degrees.z);
                }
            }
            Self::Scale { node, scale } => {
                let key = lookup(scene, &node)?;
                if let Some(t) = scene.transform_mut(key) {
                    t.scale = scale;
                }
            }

            Self::Remove(node) => {
                let key = lookup(scene, &node)?;
                scene.remove(key);
            }

            Self::Bones(node) => {
                let key = lookup(scene, &node)?
                    .as_armature()
                    .ok_or_else(|| CommandError::NotAnArmature(node.clone()))?;
                if let Some(armature) = scene.armature(key) {
                    for (i, bone) in armature.skeleton().bones().iter().enumerate() {
                        match bone.parent {
                            Some(p) => out.push(format!("{i:3} {} (parent {p})", bone.name)),
                            None => out.push(format!("{i:3} {}", bone.name)),
                        }
                    }
                }
            }

            Self::List => out.extend(list_nodes(scene)),

            Self::Show(node) => {
                let key = lookup(scene, &node)?;
                scene.resolve();
                if let Some(world) = scene.world_transform(key) {
                    out.extend(format_matrix(&world));
                }
            }
        }
        Ok(out)
    }
}

/// Parses and runs one line.
pub fn execute(line: &str, scene: &mut Scene, assets: &AssetCache) -> Result<Vec<String>, CommandError> {
    match Command::parse(line)? {
        Some(command) => command.run(scene, assets),
        None => Ok(Vec::new()),
    }
}

fn lookup(scene: &Scene, name: &str) -> Result<NodeRef, CommandError> {
    scene.find(name).ok_or_else(|| CommandError::UnknownNode(name.to_string()))
}

fn ensure_unused(scene: &Scene, name: &str) -> Result<(), CommandError> {
    match scene.find(name) {
        Some(_) => Err(CommandError::NameTaken(name.to_string())),
        None => Ok(()),
    }
}

fn list_nodes(scene: &Scene) -> Vec<String> {
    let armatures = scene.armatures().map(|(k, _)| NodeRef::from(k));
    let objects = scene.objects().map(|(k, _)| NodeRef::from(k));
    let lights = scene.lights().map(|(k, _)| NodeRef::from(k));

    let mut out = Vec::new();
    for node in armatures.chain(objects).chain(lights) {
        let Some(n) = scene.node(node) else {
            continue;
        };
        let mut line = format!("{:<8} {}", node.kind(), n.name());
        if let Some(attachment) = n.attachment()
            && let Some(parent) = scene.armature(attachment.parent)
        {
            let bone = parent
                .skeleton()
                .bone(attachment.parent_tag)
                .map_or("?", |b| b.name.as_str());
            line.push_str(&format!(" -> {}:{bone}", parent.node().name()));
        }
        out.push(line);
    }
    out
}

fn format_matrix(m: &Mat4) -> Vec<String> {
    (0..4)
        .map(|i| {
            let r = m.row(i);
            format!("{:9.3} {:9.3} {:9.3} {:9.3}", r.x, r.y, r.z, r.w)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_prefix() {
        assert_eq!(Command::parse("=cube").unwrap(), Some(Command::Show("cube".into())));
        assert_eq!(Command::parse("= cube").unwrap(), Some(Command::Show("cube".into())));
    }

    #[test]
    fn parses_uniform_and_per_axis_scale() {
        assert_eq!(
            Command::parse("scale a 2").unwrap(),
            Some(Command::Scale {
                node: "a".into(),
                scale: Vec3::splat(2.0)
            })
        );
        assert_eq!(
            Command::parse("scale a 1 2 3").unwrap(),
            Some(Command::Scale {
                node: "a".into(),
                scale: Vec3::new(1.0, 2.0, 3.0)
            })
        );
    }

    #[test]
    fn blank_and_comment_lines_do_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# note").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Command::parse("frobnicate"), Err(CommandError::UnknownCommand(_))));
        assert!(matches!(Command::parse("move a 1 2"), Err(CommandError::Usage(_))));
        assert!(matches!(Command::parse("move a 1 x 2"), Err(CommandError::InvalidNumber(_))));
        assert!(matches!(Command::parse("light l laser"), Err(CommandError::InvalidLightKind(_))));
    }
}
