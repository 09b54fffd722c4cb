//! Description parser: indentation tree → [`GameDef`].

use indexmap::IndexMap;
use ludi_core::{
    BehaviorClass, CollisionRule, CollisionTarget, EffectKind, EntityTypeDef, GameDef, ParseError,
    TerminationClass, TerminationRule, Value,
};
use smallvec::SmallVec;

use crate::indent::{parse_tree, Node};

/// Sentinel group name matching sprites outside the level bounds.
const OUT_OF_BOUNDS: &str = "EOS";

/// Parse a game description into an immutable [`GameDef`].
///
/// The document must start with a `BasicGame` declaration; its four
/// sections (`SpriteSet`, `InteractionSet`, `LevelMapping`,
/// `TerminationSet`) are each optional and may appear in any order.
///
/// # Errors
///
/// Any malformed line, unresolvable identifier, or inconsistent
/// indentation aborts the parse with a [`ParseError`].
pub fn parse(text: &str) -> Result<GameDef, ParseError> {
    let roots = parse_tree(text)?;
    let root = &roots[0];

    let mut tokens = root.content.split_whitespace();
    match tokens.next() {
        Some("BasicGame") => {}
        Some(other) => {
            return Err(ParseError::UnknownClass {
                name: other.to_string(),
            })
        }
        None => return Err(ParseError::EmptyDocument),
    }
    let root_args = parse_kwargs(tokens, root.line)?;

    let mut def = GameDef::default();
    if let Some(n) = root_args.get("block_size").and_then(Value::as_i64) {
        def.block_size = n.max(1) as u32;
    }
    if let Some(n) = root_args.get("seed").and_then(Value::as_i64) {
        def.seed = n as u64;
    }

    for section in &root.children {
        match section.content.as_str() {
            "SpriteSet" => parse_sprites(
                &mut def,
                &section.children,
                None,
                &IndexMap::new(),
                &SmallVec::new(),
            )?,
            "InteractionSet" => parse_interactions(&mut def, &section.children)?,
            "LevelMapping" => parse_mappings(&mut def, &section.children)?,
            "TerminationSet" => parse_terminations(&mut def, &section.children)?,
            // Unrecognized sections are tolerated and skipped, like
            // unrecognized root kwargs.
            _ => {}
        }
    }
    Ok(def)
}

// ── SpriteSet ──────────────────────────────────────────────────────

fn parse_sprites(
    def: &mut GameDef,
    nodes: &[Node],
    parent_class: Option<BehaviorClass>,
    parent_args: &IndexMap<String, Value>,
    parent_types: &SmallVec<[String; 4]>,
) -> Result<(), ParseError> {
    for node in nodes {
        let (name, rhs) = split_arrow(&node.content, node.line)?;
        let mut tokens = rhs.split_whitespace().peekable();

        // A bare leading token is the behavior class; kwargs inherit
        // down the nesting chain, child overriding parent.
        let mut class = parent_class;
        if let Some(first) = tokens.peek() {
            if !first.contains('=') {
                let token = tokens.next().expect("peeked token");
                class = Some(BehaviorClass::from_name(token).ok_or_else(|| {
                    ParseError::UnknownClass {
                        name: token.to_string(),
                    }
                })?);
            }
        }
        let mut args = parent_args.clone();
        for (key, value) in parse_kwargs(tokens, node.line)? {
            args.insert(key, value);
        }

        let mut stypes = parent_types.clone();
        stypes.push(name.to_string());

        if let Some(v) = args.shift_remove("singleton") {
            if v.as_bool() == Some(true) && !def.singletons.iter().any(|s| s == name) {
                def.singletons.push(name.to_string());
            }
        }

        if node.children.is_empty() {
            let class = class.ok_or_else(|| ParseError::MissingClass {
                name: name.to_string(),
            })?;
            def.register_sprite(EntityTypeDef {
                name: name.to_string(),
                class,
                args,
                stypes,
            });
        } else {
            parse_sprites(def, &node.children, class, &args, &stypes)?;
        }
    }
    Ok(())
}

// ── InteractionSet ─────────────────────────────────────────────────

fn parse_interactions(def: &mut GameDef, nodes: &[Node]) -> Result<(), ParseError> {
    for node in nodes {
        let (lhs, rhs) = split_arrow(&node.content, node.line)?;
        let groups: Vec<&str> = lhs.split_whitespace().collect();
        let (first, second) = match groups.as_slice() {
            // A lone group collides with itself.
            [a] => (a.to_string(), CollisionTarget::Group(a.to_string())),
            [a, b] if *b == OUT_OF_BOUNDS => (a.to_string(), CollisionTarget::OutOfBounds),
            [a, b] => (a.to_string(), CollisionTarget::Group(b.to_string())),
            _ => {
                return Err(ParseError::BadGroupCount {
                    line: node.line,
                    found: groups.len(),
                })
            }
        };

        let mut tokens = rhs.split_whitespace();
        let effect_name = tokens.next().unwrap_or("");
        let effect =
            EffectKind::from_name(effect_name).ok_or_else(|| ParseError::UnknownEffect {
                name: effect_name.to_string(),
            })?;
        let mut args = parse_kwargs(tokens, node.line)?;
        // The score delta is engine bookkeeping, not an effect argument.
        let score_change = args
            .shift_remove("scoreChange")
            .and_then(|v| v.as_i64())
            .unwrap_or(0);

        def.collision_rules.push(CollisionRule {
            first,
            second,
            effect,
            score_change,
            args,
        });
    }
    Ok(())
}

// ── LevelMapping ───────────────────────────────────────────────────

fn parse_mappings(def: &mut GameDef, nodes: &[Node]) -> Result<(), ParseError> {
    for node in nodes {
        let (lhs, rhs) = split_arrow(&node.content, node.line)?;
        let mut chars = lhs.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ParseError::BadMappingChar {
                    line: node.line,
                    token: lhs.to_string(),
                })
            }
        };
        let names: Vec<String> = rhs.split_whitespace().map(str::to_string).collect();
        // Re-declared characters overwrite their previous mapping.
        def.char_mapping.insert(key, names);
    }
    Ok(())
}

// ── TerminationSet ─────────────────────────────────────────────────

fn parse_terminations(def: &mut GameDef, nodes: &[Node]) -> Result<(), ParseError> {
    for node in nodes {
        let mut tokens = node.content.split_whitespace();
        let class_name = tokens.next().unwrap_or("");
        let class = TerminationClass::from_name(class_name).ok_or_else(|| {
            ParseError::UnknownTermination {
                name: class_name.to_string(),
            }
        })?;
        let args = parse_kwargs(tokens, node.line)?;

        let limit = args.get("limit").and_then(|v| v.as_i64()).unwrap_or(0);
        let rule = match class {
            TerminationClass::SpriteCounter => TerminationRule::SpriteCounter {
                stype: require_str(&args, "SpriteCounter", "stype")?,
                limit,
                win: args.get("win").and_then(Value::as_bool).unwrap_or(true),
            },
            TerminationClass::MultiSpriteCounter => TerminationRule::MultiSpriteCounter {
                stype1: require_str(&args, "MultiSpriteCounter", "stype1")?,
                stype2: require_str(&args, "MultiSpriteCounter", "stype2")?,
                limit,
                win: args.get("win").and_then(Value::as_bool).unwrap_or(true),
            },
            TerminationClass::Timeout => TerminationRule::Timeout {
                limit: limit.max(0) as u64,
                win: args.get("win").and_then(Value::as_bool).unwrap_or(false),
            },
        };
        def.terminations.push(rule);
    }
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

/// Split a line on its first `>`, trimming both sides.
fn split_arrow(content: &str, line: usize) -> Result<(&str, &str), ParseError> {
    let (lhs, rhs) = content
        .split_once('>')
        .ok_or(ParseError::MissingSeparator { line })?;
    Ok((lhs.trim(), rhs.trim()))
}

/// Parse the remaining tokens of a line as `key=value` pairs.
fn parse_kwargs<'a, I>(tokens: I, line: usize) -> Result<IndexMap<String, Value>, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    let mut args = IndexMap::new();
    for token in tokens {
        let (key, raw) = token.split_once('=').ok_or_else(|| ParseError::BadKeyword {
            line,
            token: token.to_string(),
        })?;
        if key.is_empty() {
            return Err(ParseError::BadKeyword {
                line,
                token: token.to_string(),
            });
        }
        args.insert(key.to_string(), Value::from_token(raw));
    }
    Ok(args)
}

/// A required string-valued keyword; group names stay literal tokens.
fn require_str(
    args: &IndexMap<String, Value>,
    class: &str,
    key: &'static str,
) -> Result<String, ParseError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ParseError::MissingArgument {
            class: class.to_string(),
            key,
        })
}
