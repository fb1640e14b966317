/// Errors returned while choosing where a tile goes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no open end shows {value}")]
    NoLegalMatch { value: u8 },
    #[error("tile {tile} has no free placement direction")]
    NoLegalDirection { tile: usize },
    #[error("value {value} is not on the chosen tile")]
    ValueNotOnTile { value: u8 },
    #[error("pip value could not be read")]
    UnknownValue,
}
