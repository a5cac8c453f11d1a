//! Logical port numbering and chip profiles
//!
//! The API speaks in *logical* ports (`UTP_PORT0..7` = 0..7,
//! `EXT_PORT0..2` = 16..18) while the ASIC registers are indexed by
//! *physical* port. Which logical ports exist, and where they land on the
//! die, depends on the package; a [`ChipProfile`] carries that table.

use core::ops::{BitOr, BitOrAssign};

use crate::asic::chip::ChipFamily;
use crate::constants::LOGICAL_PORT_SLOTS;

// =============================================================================
// Logical Ports
// =============================================================================

/// Logical switch port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    /// UTP port 0
    Utp0 = 0,
    /// UTP port 1
    Utp1 = 1,
    /// UTP port 2
    Utp2 = 2,
    /// UTP port 3
    Utp3 = 3,
    /// UTP port 4
    Utp4 = 4,
    /// UTP port 5
    Utp5 = 5,
    /// UTP port 6
    Utp6 = 6,
    /// UTP port 7
    Utp7 = 7,
    /// External MAC port 0
    Ext0 = 16,
    /// External MAC port 1
    Ext1 = 17,
    /// External MAC port 2
    Ext2 = 18,
}

impl Port {
    /// Every logical port, in id order
    pub const ALL: [Port; 11] = [
        Port::Utp0,
        Port::Utp1,
        Port::Utp2,
        Port::Utp3,
        Port::Utp4,
        Port::Utp5,
        Port::Utp6,
        Port::Utp7,
        Port::Ext0,
        Port::Ext1,
        Port::Ext2,
    ];

    /// Logical port id
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Port with the given logical id
    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Port::Utp0,
            1 => Port::Utp1,
            2 => Port::Utp2,
            3 => Port::Utp3,
            4 => Port::Utp4,
            5 => Port::Utp5,
            6 => Port::Utp6,
            7 => Port::Utp7,
            16 => Port::Ext0,
            17 => Port::Ext1,
            18 => Port::Ext2,
            _ => return None,
        })
    }

    /// Whether this is an external MAC port
    pub const fn is_ext(self) -> bool {
        matches!(self, Port::Ext0 | Port::Ext1 | Port::Ext2)
    }

    /// Index of the external interface behind this port
    ///
    /// `EXT_PORT0` drives interface 1; interface 0 is the internal CPU side.
    pub const fn ext_id(self) -> Option<u8> {
        match self {
            Port::Ext0 => Some(1),
            Port::Ext1 => Some(2),
            Port::Ext2 => Some(3),
            _ => None,
        }
    }

    /// Bit of this port in a [`PortMask`]
    pub const fn bit(self) -> u32 {
        1 << self.id()
    }
}

// =============================================================================
// Logical Port Mask
// =============================================================================

/// Set of logical ports, one bit per logical id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortMask(u32);

impl PortMask {
    /// No ports
    pub const EMPTY: Self = Self(0);

    /// Wrap raw logical bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw logical bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether `port` is in the set
    pub const fn contains(self, port: Port) -> bool {
        self.0 & port.bit() != 0
    }

    /// Copy of the set with `port` added
    #[must_use]
    pub const fn with(self, port: Port) -> Self {
        Self(self.0 | port.bit())
    }

    /// Add `port`
    pub fn insert(&mut self, port: Port) {
        self.0 |= port.bit();
    }

    /// Remove `port`
    pub fn remove(&mut self, port: Port) {
        self.0 &= !port.bit();
    }

    /// Whether the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of ports in the set
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Ports in the set, in id order
    pub fn iter(self) -> impl Iterator<Item = Port> {
        Port::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl From<Port> for PortMask {
    fn from(port: Port) -> Self {
        Self(port.bit())
    }
}

impl BitOr for PortMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Port> for PortMask {
    type Output = Self;

    fn bitor(self, rhs: Port) -> Self {
        self.with(rhs)
    }
}

impl BitOrAssign<Port> for PortMask {
    fn bitor_assign(&mut self, rhs: Port) {
        self.insert(rhs);
    }
}

impl FromIterator<Port> for PortMask {
    fn from_iter<I: IntoIterator<Item = Port>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |mask, port| mask.with(port))
    }
}

// =============================================================================
// Chip Profiles
// =============================================================================

/// Package-specific port layout and init sequence
///
/// Boards with a vendor-supplied silicon patch table can build their own
/// profile around it:
///
/// ```ignore
/// static MY_BOARD: ChipProfile = ChipProfile {
///     init_patch: &[(0x13C2, 0x0249), /* ... */ (0x13C2, 0x0000)],
///     ..ChipProfile::RTL8363NB
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipProfile {
    /// Human-readable package name
    pub name: &'static str,
    /// Silicon family the chip number must report
    pub family: ChipFamily,
    /// Physical port of each logical id, `None` where the package has none
    pub l2p: [Option<u8>; LOGICAL_PORT_SLOTS],
    /// Register writes applied by `Switch::init` after detection
    pub init_patch: &'static [(u16, u16)],
}

const fn l2p_table(pairs: &[(Port, u8)]) -> [Option<u8>; LOGICAL_PORT_SLOTS] {
    let mut table = [None; LOGICAL_PORT_SLOTS];
    let mut i = 0;
    while i < pairs.len() {
        table[pairs[i].0.id() as usize] = Some(pairs[i].1);
        i += 1;
    }
    table
}

impl ChipProfile {
    /// RTL8363NB: two UTP ports and one RGMII/MII uplink
    pub const RTL8363NB: Self = Self {
        name: "RTL8363NB",
        family: ChipFamily::Rtl8367c,
        l2p: l2p_table(&[(Port::Utp1, 1), (Port::Utp3, 3), (Port::Ext0, 6)]),
        init_patch: &[],
    };

    /// RTL8367C: five UTP ports and two external MACs
    pub const RTL8367C: Self = Self {
        name: "RTL8367C",
        family: ChipFamily::Rtl8367c,
        l2p: l2p_table(&[
            (Port::Utp0, 0),
            (Port::Utp1, 1),
            (Port::Utp2, 2),
            (Port::Utp3, 3),
            (Port::Utp4, 4),
            (Port::Ext0, 6),
            (Port::Ext1, 7),
        ]),
        init_patch: &[],
    };

    /// Physical port behind a logical port
    pub const fn phy_port(&self, port: Port) -> Option<u8> {
        self.l2p[port.id() as usize]
    }

    /// Logical port sitting on a physical port
    pub fn logical_port(&self, phy_port: u8) -> Option<Port> {
        Port::ALL
            .into_iter()
            .find(|&port| self.phy_port(port) == Some(phy_port))
    }

    /// Whether the package has this port
    pub const fn has_port(&self, port: Port) -> bool {
        self.phy_port(port).is_some()
    }

    /// All ports the package has
    pub fn ports(&self) -> PortMask {
        Port::ALL.into_iter().filter(|&p| self.has_port(p)).collect()
    }

    /// Physical ports of internal PHYs (UTP ports)
    pub fn utp_phys(&self) -> impl Iterator<Item = u8> + '_ {
        Port::ALL
            .into_iter()
            .filter(|p| !p.is_ext())
            .filter_map(|p| self.phy_port(p))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
