use thiserror::Error;
use tiger_run_core::Direction;

/// Errors raised while parsing a scripted move list.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// A token is neither a direction word nor a run of `U`, `D`, `L` and `R` letters.
    #[error("unrecognised move `{token}` at token {position}")]
    UnknownMove {
        /// One-based index of the offending token.
        position: usize,
        /// Token as written in the script.
        token: String,
    },
}

/// Parses a move script such as `"RRDL"` or `"right, right, down"`.
///
/// Tokens are separated by whitespace or commas and matched case-insensitively.
pub(crate) fn parse_script(script: &str) -> Result<Vec<Direction>, ScriptError> {
    let mut moves = Vec::new();
    let tokens = script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty());

    for (index, token) in tokens.enumerate() {
        if let Some(direction) = direction_word(token) {
            moves.push(direction);
            continue;
        }

        let letters: Option<Vec<Direction>> = token.chars().map(direction_letter).collect();
        match letters {
            Some(letters) => moves.extend(letters),
            None => {
                return Err(ScriptError::UnknownMove {
                    position: index + 1,
                    token: token.to_owned(),
                })
            }
        }
    }

    Ok(moves)
}

fn direction_word(token: &str) -> Option<Direction> {
    match token.to_ascii_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

fn direction_letter(letter: char) -> Option<Direction> {
    match letter.to_ascii_uppercase() {
        'U' => Some(Direction::Up),
        'D' => Some(Direction::Down),
        'L' => Some(Direction::Left),
        'R' => Some(Direction::Right),
        _ => None,
    }
}
