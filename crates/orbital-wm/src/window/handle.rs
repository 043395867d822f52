//! Resize handles on a window border

use serde::{Deserialize, Serialize};

use crate::constraint::EdgeMotion;
use crate::error::{WmError, WmResult};

/// One of the eight edges or corners a resize can start from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    /// Get all handles
    pub fn all() -> &'static [ResizeHandle] {
        &[
            ResizeHandle::N,
            ResizeHandle::S,
            ResizeHandle::E,
            ResizeHandle::W,
            ResizeHandle::NE,
            ResizeHandle::NW,
            ResizeHandle::SE,
            ResizeHandle::SW,
        ]
    }

    /// How this handle moves the horizontal edges
    pub fn horizontal(&self) -> EdgeMotion {
        match self {
            ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW => EdgeMotion::Leading,
            ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE => EdgeMotion::Trailing,
            ResizeHandle::N | ResizeHandle::S => EdgeMotion::Fixed,
        }
    }

    /// How this handle moves the vertical edges
    pub fn vertical(&self) -> EdgeMotion {
        match self {
            ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW => EdgeMotion::Leading,
            ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW => EdgeMotion::Trailing,
            ResizeHandle::E | ResizeHandle::W => EdgeMotion::Fixed,
        }
    }

    /// Parse from the host's direction string ("n", "se", ...)
    pub fn from_id(id: &str) -> WmResult<Self> {
        match id.to_ascii_lowercase().as_str() {
            "n" => Ok(ResizeHandle::N),
            "s" => Ok(ResizeHandle::S),
            "e" => Ok(ResizeHandle::E),
            "w" => Ok(ResizeHandle::W),
            "ne" => Ok(ResizeHandle::NE),
            "nw" => Ok(ResizeHandle::NW),
            "se" => Ok(ResizeHandle::SE),
            "sw" => Ok(ResizeHandle::SW),
            _ => Err(WmError::UnknownResizeHandle(id.to_string())),
        }
    }

    /// Get the string ID for this handle
    pub fn id(&self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }
}

impl std::str::FromStr for ResizeHandle {
    type Err = WmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for handle in ResizeHandle::all() {
            assert_eq!(ResizeHandle::from_id(handle.id()).unwrap(), *handle);
        }
        assert_eq!("SE".parse::<ResizeHandle>().unwrap(), ResizeHandle::SE);
        assert!(ResizeHandle::from_id("x").is_err());
    }

    #[test]
    fn test_corner_handles_combine_edges() {
        assert_eq!(ResizeHandle::NW.horizontal(), ResizeHandle::W.horizontal());
        assert_eq!(ResizeHandle::NW.vertical(), ResizeHandle::N.vertical());
        assert_eq!(ResizeHandle::SE.horizontal(), ResizeHandle::E.horizontal());
        assert_eq!(ResizeHandle::SE.vertical(), ResizeHandle::S.vertical());
        assert_eq!(ResizeHandle::N.horizontal(), EdgeMotion::Fixed);
        assert_eq!(ResizeHandle::E.vertical(), EdgeMotion::Fixed);
    }
}
