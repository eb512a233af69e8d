//! Binary save format for a loaded game.
//!
//! A saved game is the bincode encoding of [`GameData`]: properties
//! (including the identity token), rules, catalog, attachments and map.

use std::io::{Read, Write};

use super::GameData;
use crate::core::Result;

/// Encode a game.
pub fn to_bytes(data: &GameData) -> Result<Vec<u8>> {
    Ok(bincode::serialize(data)?)
}

/// Decode a game.
pub fn from_bytes(bytes: &[u8]) -> Result<GameData> {
    Ok(bincode::deserialize(bytes)?)
}

/// Write a game to `writer`.
pub fn save_game(data: &GameData, mut writer: impl Write) -> Result<()> {
    let bytes = to_bytes(data)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    tracing::debug!(
        "Saved game {} ({} bytes, {} attachments)",
        data.game_uuid().unwrap_or("<untagged>"),
        bytes.len(),
        data.attachments.len()
    );
    Ok(())
}

/// Read a game previously written by [`save_game`].
pub fn load_game(mut reader: impl Read) -> Result<GameData> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let data = from_bytes(&bytes)?;
    tracing::debug!(
        "Loaded game {} ({} bytes, {} attachments)",
        data.game_uuid().unwrap_or("<untagged>"),
        bytes.len(),
        data.attachments.len()
    );
    Ok(data)
}
