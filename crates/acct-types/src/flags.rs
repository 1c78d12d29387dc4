use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Termination-cause bitmask from `ac_flag`.
///
/// ```text
/// ┌───────┬─────────┬──────────────────────────────────────────┐
/// │ Bit   │ Name    │ Description                              │
/// ├───────┼─────────┼──────────────────────────────────────────┤
/// │ 0x001 │ AFORK   │ fork but not exec                        │
/// │ 0x004 │ AMAP    │ system call or stack mapping violation   │
/// │ 0x008 │ ACORE   │ dumped core                              │
/// │ 0x010 │ AXSIG   │ killed by a signal                       │
/// │ 0x020 │ APLEDGE │ killed due to pledge violation           │
/// │ 0x040 │ ATRAP   │ memory access violation                  │
/// │ 0x080 │ AUNVEIL │ unveil access violation                  │
/// │ 0x200 │ APINSYS │ killed by syscall pin violation          │
/// │ 0x400 │ ABTCFI  │ BT CFI violation                         │
/// └───────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// Bits outside the table are kept in [`raw`](Self::raw) but never
/// described, so files from newer kernels still decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TerminationFlags(u32);

impl TerminationFlags {
  pub const NONE: Self = Self(0);
  pub const FORK: Self = Self(0x001);
  pub const MAP: Self = Self(0x004);
  pub const CORE: Self = Self(0x008);
  pub const SIGNAL: Self = Self(0x010);
  pub const PLEDGE: Self = Self(0x020);
  pub const TRAP: Self = Self(0x040);
  pub const UNVEIL: Self = Self(0x080);
  pub const PIN_SYSCALL: Self = Self(0x200);
  pub const BT_CFI: Self = Self(0x400);

  /// Known bits and their descriptions, in ascending bit order. Output
  /// always follows this order.
  pub const DESCRIPTIONS: [(Self, &'static str); 9] = [
    (Self::FORK, "fork but not exec"),
    (Self::MAP, "system call or stack mapping violation"),
    (Self::CORE, "dumped core"),
    (Self::SIGNAL, "killed by a signal"),
    (Self::PLEDGE, "killed due to pledge violation"),
    (Self::TRAP, "memory access violation"),
    (Self::UNVEIL, "unveil access violation"),
    (Self::PIN_SYSCALL, "killed by syscall pin violation"),
    (Self::BT_CFI, "BT CFI violation"),
  ];

  pub fn from_raw(raw: u32) -> Self {
    Self(raw)
  }

  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub fn contains(self, other: Self) -> bool {
    self.0 & other.0 == other.0
  }

  /// Bits set in this mask that have no description.
  pub fn unknown_bits(self) -> u32 {
    let known = Self::DESCRIPTIONS
      .iter()
      .fold(0u32, |acc, (flag, _)| acc | flag.0);
    self.0 & !known
  }

  /// Descriptions of every known bit that is set, in table order.
  pub fn descriptions(self) -> Vec<&'static str> {
    Self::DESCRIPTIONS
      .iter()
      .filter(|(flag, _)| self.0 & flag.0 != 0)
      .map(|&(_, text)| text)
      .collect()
  }

  /// Descriptions joined with `", "`. Empty for an empty mask.
  pub fn describe(self) -> String {
    self.descriptions().join(", ")
  }
}

impl std::ops::BitOr for TerminationFlags {
  type Output = Self;

  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}

impl Serialize for TerminationFlags {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let names = self.descriptions();
    let mut seq = serializer.serialize_seq(Some(names.len()))?;
    for name in names {
      seq.serialize_element(name)?;
    }
    seq.end()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_mask_describes_as_empty_string() {
    assert_eq!(TerminationFlags::NONE.describe(), "");
    assert!(TerminationFlags::NONE.descriptions().is_empty());
  }

  #[test]
  fn fork_and_core() {
    let flags = TerminationFlags::from_raw(0x009);
    assert_eq!(flags.describe(), "fork but not exec, dumped core");
  }

  #[test]
  fn order_follows_table_not_construction() {
    let flags = TerminationFlags::BT_CFI | TerminationFlags::SIGNAL | TerminationFlags::FORK;
    assert_eq!(
      flags.descriptions(),
      vec!["fork but not exec", "killed by a signal", "BT CFI violation"]
    );
  }

  #[test]
  fn every_known_bit_is_described() {
    let all = TerminationFlags::from_raw(0x6FD);
    assert_eq!(all.descriptions().len(), 9);
    assert_eq!(all.unknown_bits(), 0);
  }

  #[test]
  fn unknown_bits_are_ignored() {
    // 0x002 (the retired ASU bit) and 0x100 are not in the table.
    let flags = TerminationFlags::from_raw(0x102 | 0x8000_0000);
    assert_eq!(flags.describe(), "");
    assert_eq!(flags.unknown_bits(), 0x8000_0102);
    assert!(!flags.is_empty());
  }

  #[test]
  fn contains_checks_all_bits() {
    let flags = TerminationFlags::FORK | TerminationFlags::CORE;
    assert!(flags.contains(TerminationFlags::CORE));
    assert!(!flags.contains(TerminationFlags::SIGNAL));
  }

  #[test]
  fn serializes_as_list_of_names() {
    let flags = TerminationFlags::from_raw(0x018);
    let json = serde_json::to_string(&flags).unwrap();
    assert_eq!(json, r#"["dumped core","killed by a signal"]"#);
  }
}
