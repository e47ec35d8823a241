//! Shape targets: the four dependency shapes at sizes 5 and 20.
//!
//! Every target declares the `repository` double first, followed by the
//! injected components in the order below.

use std::fmt;
use std::str::FromStr;

use wireup_di::Target;

use super::components::*;
use super::{FixtureError, FixtureResult};
use crate::doubles::Repository;

/// Target sizes every shape supports.
pub const SUPPORTED_SIZES: [usize; 2] = [5, 20];

macro_rules! target {
	($name:literal { $($slot:ident : $ty:ty),+ $(,)? }) => {
		Target::builder($name)
			.mock::<dyn Repository>("repository")
			$(.inject::<$ty>(stringify!($slot)))+
			.build()
	};
}

/// Dependency shape of a fixture target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	/// Unrelated components sharing only the repository.
	Independent,
	/// Leaves fanning into one root that takes them all.
	Wide,
	/// A chain where each component needs the previous one.
	Linear,
	/// Repeated split-and-converge pairs.
	Diamond,
}

impl Shape {
	pub const ALL: [Shape; 4] = [Shape::Independent, Shape::Wide, Shape::Linear, Shape::Diamond];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Independent => "independent",
			Self::Wide => "wide",
			Self::Linear => "linear",
			Self::Diamond => "diamond",
		}
	}

	/// A fresh, unseeded target of this shape.
	///
	/// # Examples
	///
	/// ```
	/// use wireup_test::fixtures::Shape;
	///
	/// let target = Shape::Linear.target(5).unwrap();
	/// assert_eq!(target.name(), "LinearTarget5");
	/// assert_eq!(target.len(), 6);
	/// assert!(Shape::Linear.target(7).is_err());
	/// ```
	pub fn target(self, size: usize) -> FixtureResult<Target> {
		let target = match (self, size) {
			(Self::Independent, 5) => independent_target_5(),
			(Self::Independent, 20) => independent_target_20(),
			(Self::Wide, 5) => wide_target_5(),
			(Self::Wide, 20) => wide_target_20(),
			(Self::Linear, 5) => linear_target_5(),
			(Self::Linear, 20) => linear_target_20(),
			(Self::Diamond, 5) => diamond_target_5(),
			(Self::Diamond, 20) => diamond_target_20(),
			_ => return Err(FixtureError::UnsupportedSize { shape: self, size }),
		};
		Ok(target)
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Shape {
	type Err = FixtureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|shape| shape.as_str() == s)
			.ok_or_else(|| FixtureError::UnknownShape(s.to_string()))
	}
}

fn independent_target_5() -> Target {
	target!("IndependentTarget5" {
		n01: Independent01,
		n02: Independent02,
		n03: Independent03,
		n04: Independent04,
		n05: Independent05,
	})
}

// Ten numbered components plus Independent20, eleven in all.
fn independent_target_20() -> Target {
	target!("IndependentTarget20" {
		n01: Independent01,
		n02: Independent02,
		n03: Independent03,
		n04: Independent04,
		n05: Independent05,
		n06: Independent06,
		n07: Independent07,
		n08: Independent08,
		n09: Independent09,
		n10: Independent10,
		n20: Independent20,
	})
}

fn wide_target_5() -> Target {
	target!("WideTarget5" {
		n01: Wide01,
		n02: Wide02,
		n03: Wide03,
		n04: Wide04,
		root: WideRoot5,
	})
}

fn wide_target_20() -> Target {
	target!("WideTarget20" {
		n01: Wide01,
		n02: Wide02,
		n03: Wide03,
		n04: Wide04,
		n05: Wide05,
		n06: Wide06,
		n07: Wide07,
		n08: Wide08,
		n09: Wide09,
		n10: Wide10,
		n11: Wide11,
		n12: Wide12,
		n13: Wide13,
		n14: Wide14,
		n15: Wide15,
		n16: Wide16,
		n17: Wide17,
		n18: Wide18,
		n19: Wide19,
		root: WideRoot20,
	})
}

fn linear_target_5() -> Target {
	target!("LinearTarget5" {
		n01: Linear01,
		n02: Linear02,
		n03: Linear03,
		n04: Linear04,
		n05: Linear05,
	})
}

fn linear_target_20() -> Target {
	target!("LinearTarget20" {
		n01: Linear01,
		n02: Linear02,
		n03: Linear03,
		n04: Linear04,
		n05: Linear05,
		n06: Linear06,
		n07: Linear07,
		n08: Linear08,
		n09: Linear09,
		n10: Linear10,
		n11: Linear11,
		n12: Linear12,
		n13: Linear13,
		n14: Linear14,
		n15: Linear15,
		n16: Linear16,
		n17: Linear17,
		n18: Linear18,
		n19: Linear19,
		n20: Linear20,
	})
}

fn diamond_target_5() -> Target {
	target!("DiamondTarget5" {
		n01: Diamond01,
		n02: Diamond02,
		n03: Diamond03,
		n04: Diamond04,
		n05: Diamond05,
	})
}

fn diamond_target_20() -> Target {
	target!("DiamondTarget20" {
		n01: Diamond01,
		n02: Diamond02,
		n03: Diamond03,
		n04: Diamond04,
		n05: Diamond05,
		n06: Diamond06,
		n07: Diamond07,
		n08: Diamond08,
		n09: Diamond09,
		n10: Diamond10,
		n11: Diamond11,
		n12: Diamond12,
		n13: Diamond13,
		n14: Diamond14,
		n15: Diamond15,
		n16: Diamond16,
		n17: Diamond17,
		n18: Diamond18,
		n19: Diamond19,
		n20: Diamond20,
	})
}

/// The linear chain of `size` declared last-to-first.
///
/// Used to check that dependency order does not lean on declaration order.
pub fn reversed_linear_target(size: usize) -> FixtureResult<Target> {
	let forward = Shape::Linear.target(size)?;
	let mut builder = Target::builder(format!("ReversedLinearTarget{size}"));
	for slot in forward.slots().iter().rev() {
		builder = builder.slot(slot.clone());
	}
	Ok(builder.build())
}
