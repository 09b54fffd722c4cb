//! Building an episode from a character grid.

use ludi_core::{BehaviorClass, GameDef, LevelError, Value};

use crate::game::Game;

/// Instantiate a definition onto a level grid.
///
/// Rows are the grid's lines top to bottom; each character becomes one
/// cell of `block_size` pixels. Characters resolve through the
/// definition's mapping first, then the built-in fallback; anything
/// else is an empty cell.
pub(crate) fn build(def: GameDef, level: &str) -> Result<Game, LevelError> {
    let rows: Vec<&str> = level
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.chars().count());
    for (i, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(LevelError::InconsistentRowLength {
                row: i,
                expected: width,
                found,
            });
        }
    }
    if width < 2 || height < 2 {
        return Err(LevelError::TooSmall { width, height });
    }

    let mut game = Game::empty(def, width, height);
    index_resources(&mut game);

    let block = game.block_size as i32;
    for (row, line) in rows.iter().enumerate() {
        for (col, c) in line.chars().enumerate() {
            let pos = (col as i32 * block, row as i32 * block);
            if let Some(keys) = game.def.char_mapping.get(&c) {
                let keys = keys.clone();
                game.create_sprites(&keys, pos);
            } else if let Some(keys) = GameDef::default_char_mapping(c) {
                let keys: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
                game.create_sprites(&keys, pos);
            }
        }
    }

    // The avatar always updates and draws after everything else.
    if let Some(avatar) = game
        .z_order
        .iter()
        .find(|name| {
            game.def
                .sprite_defs
                .get(*name)
                .is_some_and(|d| d.class.is_avatar())
        })
        .cloned()
    {
        game.z_order.retain(|n| n != &avatar);
        game.z_order.push(avatar);
    }
    Ok(game)
}

/// Record the limit and color of every resource counter declared by a
/// resource type, keyed by the counter name.
fn index_resources(game: &mut Game) {
    let pairs: Vec<(String, i64, Option<ludi_core::Color>)> = game
        .def
        .sprite_defs
        .values()
        .filter(|d| d.class == BehaviorClass::Resource)
        .map(|d| {
            let name = d
                .args
                .get("res_type")
                .and_then(Value::as_str)
                .unwrap_or(&d.name)
                .to_string();
            let limit = d.args.get("limit").and_then(Value::as_i64).unwrap_or(2);
            let color = d.args.get("color").and_then(Value::as_color);
            (name, limit, color)
        })
        .collect();
    for (name, limit, color) in pairs {
        game.resource_limits.insert(name.clone(), limit);
        if let Some(color) = color {
            game.resource_colors.insert(name, color);
        }
    }
}
