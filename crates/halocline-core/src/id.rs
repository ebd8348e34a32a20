//! Strongly-typed identifiers: axes, sides, faces, and channels.

use std::fmt;

/// One of the three spatial axes of the local sub-domain.
///
/// By convention `X` is the primary decomposition axis (the axis split
/// across processes), and `Z` is the slab axis whose two faces span the
/// full lateral extent of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The primary decomposition axis.
    X,
    /// Second lateral axis.
    Y,
    /// The slab axis (full-extent faces).
    Z,
}

impl Axis {
    /// All three axes in canonical order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Array index of this axis (X = 0, Y = 1, Z = 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Low or high side of an axis.
///
/// `Bot` is the side with the smaller coordinates, `Top` the larger.
/// Also used as the BOT/TOP selector of the single-slab store primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Low-coordinate side.
    Bot,
    /// High-coordinate side.
    Top,
}

impl Side {
    /// Both sides in canonical order.
    pub const ALL: [Side; 2] = [Side::Bot, Side::Top];

    /// Array index of this side (Bot = 0, Top = 1).
    pub fn index(self) -> usize {
        match self {
            Side::Bot => 0,
            Side::Top => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bot => write!(f, "bot"),
            Side::Top => write!(f, "top"),
        }
    }
}

/// One of the six boundary faces of the local sub-domain.
///
/// Two faces per spatial axis:
///
/// | Face    | Axis | Side | Kind            |
/// |---------|------|------|-----------------|
/// | `Front` | Z    | Bot  | full-extent slab |
/// | `Back`  | Z    | Top  | full-extent slab |
/// | `Bot`   | Y    | Bot  | buffer-mediated |
/// | `Top`   | Y    | Top  | buffer-mediated |
/// | `Left`  | X    | Bot  | buffer-mediated |
/// | `Right` | X    | Top  | buffer-mediated |
///
/// The slab faces carry the entire XY plane and transfer by direct
/// contiguous copy; the other four exclude the regions already covered
/// by the slab faces and transfer through a dedicated staging buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Z-low slab face.
    Front,
    /// Z-high slab face.
    Back,
    /// Y-low plate face.
    Bot,
    /// Y-high plate face.
    Top,
    /// X-low plate face.
    Left,
    /// X-high plate face.
    Right,
}

impl Face {
    /// All six faces in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Bot,
        Face::Top,
        Face::Left,
        Face::Right,
    ];

    /// The four buffer-mediated faces in canonical order.
    pub const BUFFERED: [Face; 4] = [Face::Bot, Face::Top, Face::Left, Face::Right];

    /// The axis this face is normal to.
    pub fn axis(self) -> Axis {
        match self {
            Face::Front | Face::Back => Axis::Z,
            Face::Bot | Face::Top => Axis::Y,
            Face::Left | Face::Right => Axis::X,
        }
    }

    /// Which side of its axis this face sits on.
    pub fn side(self) -> Side {
        match self {
            Face::Front | Face::Bot | Face::Left => Side::Bot,
            Face::Back | Face::Top | Face::Right => Side::Top,
        }
    }

    /// Whether this face transfers as a full-extent contiguous slab.
    pub fn is_slab(self) -> bool {
        matches!(self, Face::Front | Face::Back)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Front => write!(f, "front"),
            Face::Back => write!(f, "back"),
            Face::Bot => write!(f, "bot"),
            Face::Top => write!(f, "top"),
            Face::Left => write!(f, "left"),
            Face::Right => write!(f, "right"),
        }
    }
}

/// Identifies one independent accelerator execution queue.
///
/// Commands issued on the same channel execute in issue order; commands
/// on different channels have no relative ordering guarantee. The value
/// is opaque to the core and interpreted by the [`DeviceRuntime`]
/// implementation.
///
/// [`DeviceRuntime`]: crate::traits::DeviceRuntime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChannelId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_axis_side_table() {
        assert_eq!(Face::Front.axis(), Axis::Z);
        assert_eq!(Face::Front.side(), Side::Bot);
        assert_eq!(Face::Back.axis(), Axis::Z);
        assert_eq!(Face::Back.side(), Side::Top);
        assert_eq!(Face::Bot.axis(), Axis::Y);
        assert_eq!(Face::Top.side(), Side::Top);
        assert_eq!(Face::Left.axis(), Axis::X);
        assert_eq!(Face::Right.side(), Side::Top);
    }

    #[test]
    fn only_z_faces_are_slabs() {
        for face in Face::ALL {
            assert_eq!(face.is_slab(), face.axis() == Axis::Z, "{face}");
        }
    }

    #[test]
    fn buffered_faces_exclude_slabs() {
        for face in Face::BUFFERED {
            assert!(!face.is_slab());
        }
        assert_eq!(Face::BUFFERED.len() + 2, Face::ALL.len());
    }

    #[test]
    fn axis_indices_are_canonical() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }
}
