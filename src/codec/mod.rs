//! Value codec: turns option tokens into typed values.
//!
//! Every attachment setter delegates here. The codec has no knowledge of
//! attachments; entity references resolve through the `EntityCatalog`.

pub mod tokens;

pub use tokens::{
    expect_shape, parse_bool, parse_int, parse_player_ref, parse_quantity, parse_unit_quantity,
    split, EntityRef, QuantityDomain, Sentinel, TokenList, DELIMITER,
};
